// core/src/models/view.rs

//! Caller-facing shapes returned by the cart service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::product::ProductDetails;

/// A cart item joined with its product's display fields.
///
/// `product` is `None` when the referenced product has since left the catalog.
/// Such lines are still returned; callers decide how to render them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
  pub product_id: Uuid,
  pub product: Option<ProductDetails>,
  pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
  #[serde(rename = "cartItems")]
  pub items: Vec<CartLine>,
  pub total_items: usize,
}

impl CartView {
  pub fn new(items: Vec<CartLine>) -> Self {
    let total_items = items.len();
    Self { items, total_items }
  }

  pub fn empty() -> Self {
    Self::default()
  }
}

/// What a cart operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartOutcome {
  Added,
  AlreadyInCart,
  Removed,
  Cleared,
  Fetched,
}

impl CartOutcome {
  /// Human-readable status. `Fetched` has none.
  pub fn message(self) -> Option<&'static str> {
    match self {
      CartOutcome::Added => Some("Item added to cart successfully"),
      CartOutcome::AlreadyInCart => Some("Item already in cart"),
      CartOutcome::Removed => Some("Item removed from cart"),
      CartOutcome::Cleared => Some("Cart cleared"),
      CartOutcome::Fetched => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartReply {
  pub outcome: CartOutcome,
  pub view: CartView,
}

impl CartReply {
  pub fn new(outcome: CartOutcome, view: CartView) -> Self {
    Self { outcome, view }
  }
}

/// Wire body for every cart endpoint: `{ message?, cartItems, totalItems }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartResponse {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(flatten)]
  pub view: CartView,
}

impl From<CartReply> for CartResponse {
  fn from(reply: CartReply) -> Self {
    Self {
      message: reply.outcome.message().map(str::to_string),
      view: reply.view,
    }
  }
}
