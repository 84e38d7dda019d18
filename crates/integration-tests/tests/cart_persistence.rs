//! Cart and wishlist state survives reopening the storefront.

#![allow(clippy::unwrap_used)]

use cendev_core::{Price, ProductId};
use cendev_integration_tests::TestContext;
use cendev_storefront::models::Product;
use cendev_storefront::storage::{PersistenceAdapter, keys};

fn product(id: &str, cents: i64) -> Product {
    Product::new(id, format!("Product {id}"), Price::from_cents(cents).unwrap())
}

#[test]
fn test_cart_restored_in_order() {
    let ctx = TestContext::new().unwrap();
    {
        let mut storefront = ctx.open().unwrap();
        let cart = storefront.cart_mut();
        cart.add_to_cart(&product("3", 27_999)).unwrap();
        cart.add_to_cart(&product("1", 189_999)).unwrap();
        cart.add_to_cart(&product("3", 27_999)).unwrap();
    }

    let storefront = ctx.open().unwrap();
    let lines: Vec<(String, u32)> = storefront
        .cart()
        .lines()
        .iter()
        .map(|l| (l.product_id().to_string(), l.quantity()))
        .collect();
    assert_eq!(lines, [("3".to_owned(), 2), ("1".to_owned(), 1)]);
    assert_eq!(storefront.cart().total_items(), 3);
}

#[test]
fn test_add_twice_then_set_quantity() {
    let ctx = TestContext::new().unwrap();
    let mut storefront = ctx.open().unwrap();
    let item = product("1", 1_000);

    storefront.cart_mut().add_to_cart(&item).unwrap();
    storefront.cart_mut().add_to_cart(&item).unwrap();
    storefront
        .cart_mut()
        .update_quantity(&ProductId::new("1"), 5)
        .unwrap();

    let reopened = ctx.open().unwrap();
    assert_eq!(reopened.cart().len(), 1);
    assert_eq!(reopened.cart().total_price(), Price::from_cents(5_000).unwrap());
    assert_eq!(
        reopened.order_summary().total,
        Price::from_cents(5_500).unwrap()
    );
}

#[test]
fn test_cart_snapshot_uses_camel_case_fields() {
    let ctx = TestContext::new().unwrap();
    let mut storefront = ctx.open().unwrap();
    let laptop = storefront
        .catalog()
        .get(&ProductId::new("1"))
        .cloned()
        .unwrap();
    storefront.cart_mut().add_to_cart(&laptop).unwrap();

    let raw = ctx.storage().unwrap().read(keys::CART).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["id"], "1");
    assert_eq!(json[0]["quantity"], 1);
    assert_eq!(json[0]["originalPrice"], "2199.99");
    assert_eq!(json[0]["inStock"], true);
}

#[test]
fn test_clear_cart_persists_empty_list() {
    let ctx = TestContext::new().unwrap();
    let mut storefront = ctx.open().unwrap();
    storefront.cart_mut().add_to_cart(&product("2", 14_999)).unwrap();
    storefront.cart_mut().clear_cart().unwrap();

    let raw = ctx.storage().unwrap().read(keys::CART).unwrap().unwrap();
    assert_eq!(raw, "[]");
    assert!(ctx.open().unwrap().cart().is_empty());
}

#[test]
fn test_wishlist_restored() {
    let ctx = TestContext::new().unwrap();
    {
        let mut storefront = ctx.open().unwrap();
        let products = storefront.catalog().products().to_vec();
        storefront.wishlist_mut().add_to_wishlist(&products[5]).unwrap();
        storefront.wishlist_mut().add_to_wishlist(&products[0]).unwrap();
        storefront.wishlist_mut().add_to_wishlist(&products[5]).unwrap();
        storefront.wishlist_mut().toggle(&products[0]).unwrap();
    }

    let storefront = ctx.open().unwrap();
    let ids: Vec<&str> = storefront
        .wishlist()
        .items()
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, ["6"]);
}

#[test]
fn test_corrupt_cart_snapshot_starts_empty() {
    let ctx = TestContext::new().unwrap();
    ctx.storage()
        .unwrap()
        .write(keys::CART, "{ not json")
        .unwrap();

    let mut storefront = ctx.open().unwrap();
    assert!(storefront.cart().is_empty());

    storefront.cart_mut().add_to_cart(&product("4", 59_999)).unwrap();
    assert_eq!(ctx.open().unwrap().cart().len(), 1);
}
