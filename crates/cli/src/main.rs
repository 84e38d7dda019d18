//! Cendev CLI - browse the catalog and drive the cart, wishlist and session.
//!
//! # Usage
//!
//! ```bash
//! # Browse hardware under $300, cheapest first
//! cendev products list --category hardware --max-price 300 --sort price-low
//!
//! # Sign in as the demo buyer and fill the cart
//! cendev login -e buyer@example.com -p password123
//! cendev cart add 2
//! cendev cart set 2 3
//! cendev cart show
//!
//! # Create a seller account
//! cendev register -e me@example.com -p secret -n "Me" --role seller --company "Me Inc."
//! ```
//!
//! State persists under `CENDEV_DATA_DIR` (default `.cendev`) so each
//! invocation picks up where the last one left off.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use cendev_core::UserRole;
use cendev_storefront::{SortOrder, Storefront, StorefrontConfig};

mod commands;

/// Data directory used when neither `--data-dir` nor `CENDEV_DATA_DIR` is set.
const DEFAULT_DATA_DIR: &str = ".cendev";

#[derive(Parser)]
#[command(name = "cendev")]
#[command(author, version, about = "Cendev storefront CLI")]
struct Cli {
    /// Directory for persisted state (overrides `CENDEV_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account role (`buyer`, `seller`)
        #[arg(short, long, default_value = "buyer")]
        role: UserRole,

        /// Company name
        #[arg(short, long)]
        company: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Update the signed-in user's profile
    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        avatar: Option<String>,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },
    /// Seed the demo accounts if the directory does not exist yet
    Seed,
    /// Empty the cart and wishlist and sign out
    Reset,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products matching the filters
    List {
        /// Category (`all`, `hardware`, `books`, ...)
        #[arg(short, long)]
        category: Option<String>,

        /// Text to look for in the name or description
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long)]
        min_price: Option<Decimal>,

        #[arg(long)]
        max_price: Option<Decimal>,

        #[arg(long)]
        min_rating: Option<f32>,

        /// Sort order (`featured`, `price-low`, `price-high`, `rating`, `name`)
        #[arg(long, default_value = "featured")]
        sort: SortOrder,
    },
    /// Show one product and related items
    Show { id: String },
    /// List categories with product counts
    Categories,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and the order summary
    Show,
    /// Add one unit of a product
    Add { id: String },
    /// Remove a product
    Remove { id: String },
    /// Set a product's quantity (0 or less removes it)
    Set {
        id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove everything
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show saved products
    Show,
    /// Save a product
    Add { id: String },
    /// Remove a saved product
    Remove { id: String },
    /// Save or unsave a product
    Toggle { id: String },
    /// Remove everything
    Clear,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cendev_storefront=info,cendev_cli=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn open(
    cli_data_dir: Option<PathBuf>,
    force_seed: bool,
) -> Result<Storefront, Box<dyn std::error::Error>> {
    let mut config = StorefrontConfig::from_env()?;
    let data_dir = cli_data_dir
        .or_else(|| config.data_dir.take())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    config = config.with_data_dir(data_dir);
    if force_seed {
        config.seed_demo_users = true;
    }
    Ok(Storefront::open(config)?)
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let seed = matches!(cli.command, Commands::Seed);
    let mut storefront = open(cli.data_dir, seed)?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List {
                category,
                search,
                min_price,
                max_price,
                min_rating,
                sort,
            } => {
                let query = cendev_storefront::ProductQuery {
                    category,
                    search,
                    min_price,
                    max_price,
                    min_rating,
                    sort,
                };
                commands::products::list(&storefront, &query);
            }
            ProductsAction::Show { id } => commands::products::show(&storefront, &id)?,
            ProductsAction::Categories => commands::products::categories(&storefront),
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&storefront),
            CartAction::Add { id } => commands::cart::add(&mut storefront, &id)?,
            CartAction::Remove { id } => commands::cart::remove(&mut storefront, &id)?,
            CartAction::Set { id, quantity } => {
                commands::cart::set_quantity(&mut storefront, &id, quantity)?;
            }
            CartAction::Clear => commands::cart::clear(&mut storefront)?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(&storefront),
            WishlistAction::Add { id } => commands::wishlist::add(&mut storefront, &id)?,
            WishlistAction::Remove { id } => commands::wishlist::remove(&mut storefront, &id)?,
            WishlistAction::Toggle { id } => commands::wishlist::toggle(&mut storefront, &id)?,
            WishlistAction::Clear => commands::wishlist::clear(&mut storefront)?,
        },
        Commands::Login { email, password } => {
            commands::account::login(&mut storefront, &email, &password).await?;
        }
        Commands::Register {
            email,
            password,
            name,
            role,
            company,
        } => {
            let mut registration =
                cendev_storefront::models::Registration::new(email, password, name, role);
            if let Some(company) = company {
                registration = registration.with_company(company);
            }
            commands::account::register(&mut storefront, registration).await?;
        }
        Commands::Logout => commands::account::logout(&mut storefront)?,
        Commands::Whoami => commands::account::whoami(&storefront),
        Commands::Profile {
            name,
            avatar,
            company,
            phone,
            address,
        } => {
            let update = cendev_storefront::models::ProfileUpdate {
                name,
                avatar,
                company,
                phone,
                address,
            };
            commands::account::update_profile(&mut storefront, &update)?;
        }
        Commands::Seed => commands::account::seed(&storefront),
        Commands::Reset => {
            storefront.reset()?;
            tracing::info!("Cart and wishlist cleared, signed out");
        }
    }
    Ok(())
}
