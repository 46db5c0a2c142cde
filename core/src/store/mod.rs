// core/src/store/mod.rs

//! Persistence contract for carts.
//!
//! The store deals in bare product references only. Joining items with
//! product details is the service's job.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::error::{CartError, CartResult};
use crate::models::Cart;

pub mod memory;
pub mod postgres;

pub use memory::MemoryCartStore;
pub use postgres::PgCartStore;

/// Result of an atomic conditional append.
#[derive(Debug, Clone, PartialEq)]
pub struct AppendOutcome {
  pub cart: Cart,
  /// False when the product was already in the cart and nothing changed.
  pub inserted: bool,
}

#[async_trait]
pub trait CartStore: Send + Sync {
  /// The owner's cart, if one has ever been created.
  async fn find_by_owner(&self, owner_id: Uuid) -> CartResult<Option<Cart>>;

  /// Creates an empty cart. Fails with [`CartError::Conflict`] when the owner already has one.
  async fn create(&self, owner_id: Uuid) -> CartResult<Cart>;

  /// Loads the owner's cart, creating it when absent.
  ///
  /// A lost creation race surfaces from `create` as `Conflict`; the winner's cart is re-read.
  async fn find_or_create(&self, owner_id: Uuid) -> CartResult<Cart> {
    if let Some(cart) = self.find_by_owner(owner_id).await? {
      return Ok(cart);
    }
    match self.create(owner_id).await {
      Ok(cart) => Ok(cart),
      Err(CartError::Conflict(reason)) => {
        debug!(%owner_id, %reason, "Cart created concurrently, re-reading.");
        self.find_by_owner(owner_id).await?.ok_or_else(|| {
          CartError::Internal(format!("Cart for {} conflicted on create but cannot be read.", owner_id))
        })
      }
      Err(e) => Err(e),
    }
  }

  /// Replaces the stored items with `cart.items` (first occurrence wins on duplicates)
  /// and refreshes `updated_at`.
  async fn save(&self, cart: &Cart) -> CartResult<Cart>;

  /// Adds `product_id` to an existing cart unless already present.
  ///
  /// Fails with [`CartError::CartNotFound`] when the owner has no cart; callers
  /// run [`CartStore::find_or_create`] first. `updated_at` moves only when an
  /// item is inserted.
  async fn append_item(&self, owner_id: Uuid, product_id: Uuid, added_at: DateTime<Utc>) -> CartResult<AppendOutcome>;

  /// Removes `product_id` from the owner's cart. `None` when the owner has no cart.
  async fn remove_item(&self, owner_id: Uuid, product_id: Uuid) -> CartResult<Option<Cart>>;

  /// Empties the owner's cart, creating an empty one when absent.
  async fn clear_items(&self, owner_id: Uuid) -> CartResult<Cart>;
}
