// core/src/store/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use super::{AppendOutcome, CartStore};
use crate::error::{CartError, CartResult};
use crate::models::{Cart, CartItem};

/// Process-local cart store. Every mutation runs under a single write lock,
/// so conditional appends are atomic.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
  carts: RwLock<HashMap<Uuid, Cart>>,
}

impl MemoryCartStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn cart_count(&self) -> usize {
    self.carts.read().len()
  }
}

#[async_trait]
impl CartStore for MemoryCartStore {
  async fn find_by_owner(&self, owner_id: Uuid) -> CartResult<Option<Cart>> {
    Ok(self.carts.read().get(&owner_id).cloned())
  }

  async fn create(&self, owner_id: Uuid) -> CartResult<Cart> {
    let mut carts = self.carts.write();
    if carts.contains_key(&owner_id) {
      return Err(CartError::Conflict(format!("a cart already exists for user {}", owner_id)));
    }
    let cart = Cart::empty(owner_id, Utc::now());
    carts.insert(owner_id, cart.clone());
    Ok(cart)
  }

  async fn save(&self, cart: &Cart) -> CartResult<Cart> {
    let mut carts = self.carts.write();
    let stored = carts.get_mut(&cart.owner_id).ok_or(CartError::CartNotFound(cart.owner_id))?;

    let mut items = Vec::with_capacity(cart.items.len());
    for item in &cart.items {
      if !items.iter().any(|kept: &CartItem| kept.product_id == item.product_id) {
        items.push(item.clone());
      }
    }
    stored.items = items;
    stored.updated_at = Utc::now();
    Ok(stored.clone())
  }

  async fn append_item(&self, owner_id: Uuid, product_id: Uuid, added_at: DateTime<Utc>) -> CartResult<AppendOutcome> {
    let mut carts = self.carts.write();
    let cart = carts.get_mut(&owner_id).ok_or(CartError::CartNotFound(owner_id))?;
    let inserted = cart.push_unique(product_id, added_at);
    if inserted {
      cart.updated_at = Utc::now();
    }
    Ok(AppendOutcome {
      cart: cart.clone(),
      inserted,
    })
  }

  async fn remove_item(&self, owner_id: Uuid, product_id: Uuid) -> CartResult<Option<Cart>> {
    let mut carts = self.carts.write();
    let Some(cart) = carts.get_mut(&owner_id) else {
      return Ok(None);
    };
    cart.remove_product(product_id);
    cart.updated_at = Utc::now();
    Ok(Some(cart.clone()))
  }

  async fn clear_items(&self, owner_id: Uuid) -> CartResult<Cart> {
    let mut carts = self.carts.write();
    let now = Utc::now();
    let cart = carts.entry(owner_id).or_insert_with(|| Cart::empty(owner_id, now));
    cart.items.clear();
    cart.updated_at = now;
    Ok(cart.clone())
  }
}
