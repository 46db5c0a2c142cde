// core/src/pipelines/contexts.rs

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::catalog::ProductCatalog;
use crate::models::{Cart, CartOutcome, CartView};
use crate::store::CartStore;

/// Shared state for one run of the add-to-cart pipeline.
///
/// Inputs are set up front; each step fills in the field the next one reads.
pub struct AddToCartCtx {
  pub store: Arc<dyn CartStore>,
  pub catalog: Arc<dyn ProductCatalog>,
  pub user_id: Uuid,
  pub product_id: Uuid,
  pub requested_at: DateTime<Utc>,

  // --- Filled in by the steps ---
  pub cart: Option<Cart>,
  pub outcome: Option<CartOutcome>,
  pub view: Option<CartView>,
}

impl AddToCartCtx {
  pub fn new(store: Arc<dyn CartStore>, catalog: Arc<dyn ProductCatalog>, user_id: Uuid, product_id: Uuid) -> Self {
    Self {
      store,
      catalog,
      user_id,
      product_id,
      requested_at: Utc::now(),
      cart: None,
      outcome: None,
      view: None,
    }
  }
}

impl std::fmt::Debug for AddToCartCtx {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AddToCartCtx")
      .field("user_id", &self.user_id)
      .field("product_id", &self.product_id)
      .field("cart", &self.cart.as_ref().map(|cart| cart.id))
      .field("outcome", &self.outcome)
      .finish_non_exhaustive()
  }
}
