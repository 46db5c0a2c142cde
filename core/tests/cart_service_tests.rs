// tests/cart_service_tests.rs
mod common;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use cart_core::{CartError, CartOutcome, CartStore, MemoryCatalog, Product};
use common::*;
use uuid::Uuid;

#[tokio::test]
async fn list_without_cart_is_empty() {
  setup_tracing();
  let fx = Fixture::new();

  let reply = fx.service.list_items(Uuid::new_v4()).await.unwrap();

  assert_eq!(reply.outcome, CartOutcome::Fetched);
  assert!(reply.view.items.is_empty());
  assert_eq!(reply.view.total_items, 0);
  assert_eq!(fx.store.cart_count(), 0);
}

#[tokio::test]
async fn add_creates_cart_and_expands_product() {
  setup_tracing();
  let fx = Fixture::new();
  let user = Uuid::new_v4();
  let product = fx.stock("Linen shirt");

  let reply = fx.service.add_item(user, product).await.unwrap();

  assert_eq!(reply.outcome, CartOutcome::Added);
  assert_eq!(reply.outcome.message(), Some("Item added to cart successfully"));
  assert_eq!(reply.view.total_items, 1);
  let line = &reply.view.items[0];
  assert_eq!(line.product_id, product);
  let details = line.product.as_ref().expect("product should be expanded");
  assert_eq!(details.title, "Linen shirt");
  assert_eq!(details.price_cents, 1_999);
  assert_eq!(details.stock_quantity, 5);
}

#[tokio::test]
async fn adding_twice_keeps_one_line() {
  setup_tracing();
  let fx = Fixture::new();
  let user = Uuid::new_v4();
  let product = fx.stock("Mug");

  let first = fx.service.add_item(user, product).await.unwrap();
  let second = fx.service.add_item(user, product).await.unwrap();

  assert_eq!(first.outcome, CartOutcome::Added);
  assert_eq!(second.outcome, CartOutcome::AlreadyInCart);
  assert_eq!(second.outcome.message(), Some("Item already in cart"));
  assert_eq!(second.view.total_items, first.view.total_items);
  assert_eq!(product_ids(&second), vec![product]);
  assert_eq!(second.view.items[0].added_at, first.view.items[0].added_at);
}

#[tokio::test]
async fn add_unknown_product_fails_without_creating_cart() {
  setup_tracing();
  let fx = Fixture::new();
  let user = Uuid::new_v4();
  let missing = Uuid::new_v4();

  let result = fx.service.add_item(user, missing).await;

  assert!(
    matches!(result, Err(CartError::ProductNotFound(id)) if id == missing),
    "expected ProductNotFound, got {result:?}"
  );
  assert!(fx.store.find_by_owner(user).await.unwrap().is_none());
}

#[tokio::test]
async fn first_add_creates_the_cart_through_the_store() {
  setup_tracing();
  let catalog = Arc::new(MemoryCatalog::new());
  let product = Product::new("Wool socks", 900, 12);
  let product_id = product.id;
  catalog.insert(product);
  let (service, store) = recording_service(catalog);
  let user = Uuid::new_v4();

  let first = service.add_item(user, product_id).await.unwrap();
  assert_eq!(first.outcome, CartOutcome::Added);
  assert_eq!(store.creates(), 1);

  let second = service.add_item(user, product_id).await.unwrap();
  assert_eq!(second.outcome, CartOutcome::AlreadyInCart);
  assert_eq!(store.creates(), 1, "an existing cart must be reused");
  assert!(store.lookups.load(Ordering::SeqCst) >= 2);
}

#[tokio::test]
async fn add_after_losing_the_creation_race_uses_the_winning_cart() {
  setup_tracing();
  let catalog = Arc::new(MemoryCatalog::new());
  let product = Product::new("Umbrella", 2_400, 3);
  let product_id = product.id;
  catalog.insert(product);
  let (service, store) = recording_service(catalog);
  let user = Uuid::new_v4();
  store.lose_next_create();

  let reply = service.add_item(user, product_id).await.unwrap();

  assert_eq!(reply.outcome, CartOutcome::Added);
  assert_eq!(product_ids(&reply), vec![product_id]);
  assert_eq!(store.inner.cart_count(), 1);
  let cart = store.inner.find_by_owner(user).await.unwrap().unwrap();
  assert_eq!(cart.items.len(), 1);
}

#[tokio::test]
async fn add_unknown_product_never_reaches_cart_creation() {
  setup_tracing();
  let (service, store) = recording_service(Arc::new(MemoryCatalog::new()));

  let result = service.add_item(Uuid::new_v4(), Uuid::new_v4()).await;

  assert!(matches!(result, Err(CartError::ProductNotFound(_))), "got {result:?}");
  assert_eq!(store.creates(), 0);
}

#[tokio::test]
async fn remove_without_cart_is_not_found() {
  setup_tracing();
  let fx = Fixture::new();
  let user = Uuid::new_v4();

  let result = fx.service.remove_item(user, Uuid::new_v4()).await;

  assert!(
    matches!(result, Err(CartError::CartNotFound(id)) if id == user),
    "expected CartNotFound, got {result:?}"
  );
}

#[tokio::test]
async fn remove_absent_product_is_a_no_op() {
  setup_tracing();
  let fx = Fixture::new();
  let user = Uuid::new_v4();
  let kept = fx.stock("Lamp");
  fx.service.add_item(user, kept).await.unwrap();

  let reply = fx.service.remove_item(user, Uuid::new_v4()).await.unwrap();

  assert_eq!(reply.outcome, CartOutcome::Removed);
  assert_eq!(product_ids(&reply), vec![kept]);
}

#[tokio::test]
async fn add_add_remove_leaves_second_product() {
  setup_tracing();
  let fx = Fixture::new();
  let user = Uuid::new_v4();
  let p1 = fx.stock("Kettle");
  let p2 = fx.stock("Teapot");

  fx.service.add_item(user, p1).await.unwrap();
  fx.service.add_item(user, p2).await.unwrap();
  fx.service.remove_item(user, p1).await.unwrap();
  let listed = fx.service.list_items(user).await.unwrap();

  assert_eq!(product_ids(&listed), vec![p2]);
  assert_eq!(listed.view.total_items, 1);
}

#[tokio::test]
async fn items_keep_insertion_order() {
  setup_tracing();
  let fx = Fixture::new();
  let user = Uuid::new_v4();
  let ids: Vec<Uuid> = ["a", "b", "c"].iter().map(|t| fx.stock(t)).collect();

  for id in &ids {
    fx.service.add_item(user, *id).await.unwrap();
  }
  let listed = fx.service.list_items(user).await.unwrap();

  assert_eq!(product_ids(&listed), ids);
}

#[tokio::test]
async fn clear_always_yields_empty_cart() {
  setup_tracing();
  let fx = Fixture::new();
  let with_cart = Uuid::new_v4();
  let without_cart = Uuid::new_v4();
  let product = fx.stock("Scarf");
  fx.service.add_item(with_cart, product).await.unwrap();

  for user in [with_cart, without_cart] {
    let cleared = fx.service.clear_items(user).await.unwrap();
    assert_eq!(cleared.outcome, CartOutcome::Cleared);
    assert_eq!(cleared.view.total_items, 0);

    let listed = fx.service.list_items(user).await.unwrap();
    assert!(listed.view.items.is_empty());
    assert_eq!(listed.view.total_items, 0);
  }
  // Clearing materializes the record; removal no longer reports a missing cart.
  assert!(fx.service.remove_item(without_cart, product).await.is_ok());
}

#[tokio::test]
async fn dangling_product_reference_is_tolerated() {
  setup_tracing();
  let fx = Fixture::new();
  let user = Uuid::new_v4();
  let product = fx.stock("Discontinued vase");
  fx.service.add_item(user, product).await.unwrap();

  fx.catalog.remove(product);
  let listed = fx.service.list_items(user).await.unwrap();

  assert_eq!(listed.view.total_items, 1);
  assert_eq!(listed.view.items[0].product_id, product);
  assert!(listed.view.items[0].product.is_none());
}

#[tokio::test]
async fn carts_are_isolated_per_user() {
  setup_tracing();
  let fx = Fixture::new();
  let alice = Uuid::new_v4();
  let bob = Uuid::new_v4();
  let product = fx.stock("Notebook");

  fx.service.add_item(alice, product).await.unwrap();

  assert_eq!(fx.service.list_items(bob).await.unwrap().view.total_items, 0);
  assert_eq!(fx.service.list_items(alice).await.unwrap().view.total_items, 1);
}
