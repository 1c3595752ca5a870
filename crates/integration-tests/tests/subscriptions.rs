//! Snapshot subscriptions: observers see complete, immutable state.

#![allow(clippy::unwrap_used)]

use arcadia_integration_tests::TestContext;

#[tokio::test]
async fn test_cart_subscribers_see_each_mutation() {
    let ctx = TestContext::new();
    let product = ctx.engine.catalog().list().first().cloned().unwrap();
    let mut rx = ctx.engine.cart().subscribe();

    ctx.engine.cart().add_to_cart(product.id, 2).unwrap();
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().item_count, 2);

    ctx.engine.cart().clear().unwrap();
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_empty());
}

#[tokio::test]
async fn test_catalog_subscribers_see_stock_changes() {
    let ctx = TestContext::new();
    let product = ctx.engine.catalog().list().first().cloned().unwrap();
    let mut rx = ctx.engine.catalog().subscribe();

    ctx.engine.cart().add_to_cart(product.id, 1).unwrap();
    ctx.engine.checkout("admin").unwrap();

    rx.changed().await.unwrap();
    let snapshot = rx.borrow_and_update().clone();
    let observed = snapshot.iter().find(|p| p.id == product.id).unwrap();
    assert_eq!(observed.stock, product.stock - 1);
}

#[tokio::test]
async fn test_clones_publish_into_the_same_channel() {
    let ctx = TestContext::new();
    let product = ctx.engine.catalog().list().first().cloned().unwrap();

    let observer = ctx.engine.clone();
    let mut rx = observer.cart().subscribe();

    ctx.engine.cart().add_to_cart(product.id, 1).unwrap();
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().item_count, 1);
}
