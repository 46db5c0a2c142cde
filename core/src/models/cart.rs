// core/src/models/cart.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One cart per owner. `items` never holds two entries for the same product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
  pub id: Uuid,
  pub owner_id: Uuid,
  pub items: Vec<CartItem>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Cart {
  /// A fresh, empty cart for `owner_id`.
  pub fn empty(owner_id: Uuid, now: DateTime<Utc>) -> Self {
    Self {
      id: Uuid::new_v4(),
      owner_id,
      items: Vec::new(),
      created_at: now,
      updated_at: now,
    }
  }

  pub fn contains(&self, product_id: Uuid) -> bool {
    self.items.iter().any(|item| item.product_id == product_id)
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Appends `product_id` unless it is already present. Returns whether an item was added.
  pub fn push_unique(&mut self, product_id: Uuid, added_at: DateTime<Utc>) -> bool {
    if self.contains(product_id) {
      return false;
    }
    self.items.push(CartItem { product_id, added_at });
    true
  }

  /// Drops every entry for `product_id`. Returns whether anything was removed.
  pub fn remove_product(&mut self, product_id: Uuid) -> bool {
    let before = self.items.len();
    self.items.retain(|item| item.product_id != product_id);
    self.items.len() != before
  }
}

/// A product reference plus the moment it entered the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
  pub product_id: Uuid,
  pub added_at: DateTime<Utc>,
}
