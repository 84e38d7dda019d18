//! Session and account commands.

use tracing::info;

use cendev_storefront::models::{ProfileUpdate, Registration, User};
use cendev_storefront::{SessionState, Storefront};

fn print_user(user: &User) {
    info!("  Name:    {}", user.name);
    info!("  Email:   {}", user.email);
    info!("  Role:    {}", user.role);
    if let Some(company) = &user.company {
        info!("  Company: {company}");
    }
    if let Some(phone) = &user.phone {
        info!("  Phone:   {phone}");
    }
    if let Some(address) = &user.address {
        info!("  Address: {address}");
    }
    info!("  Member since {}", user.created_at.format("%Y-%m-%d"));
}

/// Sign in.
///
/// # Errors
///
/// Returns an error if the credentials are wrong or the session cannot be
/// saved.
pub async fn login(
    storefront: &mut Storefront,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Signing in...");
    let user = storefront.auth_mut().login(email, password).await?;
    info!("Welcome back, {}!", user.name);
    Ok(())
}

/// Create an account and sign in.
///
/// # Errors
///
/// Returns an error if the email is invalid or taken, or a snapshot cannot
/// be saved.
pub async fn register(
    storefront: &mut Storefront,
    registration: Registration,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Creating account...");
    let user = storefront.auth_mut().register(registration).await?;
    info!("Account created for {} ({})", user.email, user.role);
    Ok(())
}

/// Sign out.
///
/// # Errors
///
/// Returns an error if the session cannot be removed.
pub fn logout(storefront: &mut Storefront) -> Result<(), Box<dyn std::error::Error>> {
    let was_signed_in = storefront.auth().is_authenticated();
    storefront.auth_mut().logout()?;
    if was_signed_in {
        info!("Signed out");
    } else {
        info!("Not signed in");
    }
    Ok(())
}

/// Show the signed-in user.
pub fn whoami(storefront: &Storefront) {
    match storefront.auth().state() {
        SessionState::Authenticated(user) => {
            info!("Signed in as {}", user.id);
            print_user(user);
            if user.role.is_seller() {
                info!("  Seller dashboard available");
            }
        }
        SessionState::Anonymous => info!("Not signed in"),
    }
}

/// Update the signed-in user's profile.
///
/// # Errors
///
/// Returns an error if nothing is given, nobody is signed in, or a snapshot
/// cannot be saved.
pub fn update_profile(
    storefront: &mut Storefront,
    update: &ProfileUpdate,
) -> Result<(), Box<dyn std::error::Error>> {
    if update.is_empty() {
        return Err("Nothing to update; pass at least one field".into());
    }
    let Some(user) = storefront.auth_mut().update_profile(update)? else {
        return Err("Sign in to update your profile".into());
    };
    info!("Profile updated");
    print_user(&user);
    Ok(())
}

/// Report the directory after seeding.
pub fn seed(storefront: &Storefront) {
    let entries = storefront.auth().backend().entries();
    info!("{} account(s) in the directory", entries.len());
    for entry in entries {
        info!("  {} ({})", entry.user.email, entry.user.role);
    }
}
