// client/src/client.rs

use std::sync::Arc;

use cart_core::CartResponse;
use parking_lot::RwLock;
use tracing::warn;
use uuid::Uuid;

use crate::api::CartApi;
use crate::error::ClientError;
use crate::state::{CartOp, CartState};

/// Cart operations plus the shared state they update.
///
/// Overlapping calls are not serialized: whichever response settles last
/// wins. Nothing is retried.
#[derive(Debug, Clone)]
pub struct CartClient {
  api: CartApi,
  token: Arc<RwLock<Option<String>>>,
  state: Arc<RwLock<CartState>>,
}

impl CartClient {
  pub fn new(api: CartApi) -> Self {
    Self {
      api,
      token: Arc::new(RwLock::new(None)),
      state: Arc::new(RwLock::new(CartState::default())),
    }
  }

  /// Stores the caller's credential, e.g. after login. `None` logs out.
  pub fn set_token(&self, token: Option<String>) {
    *self.token.write() = token;
  }

  pub fn snapshot(&self) -> CartState {
    self.state.read().clone()
  }

  pub fn reset(&self) {
    self.state.write().reset();
  }

  pub async fn add(&self, product_id: Uuid) -> Result<CartResponse, ClientError> {
    self.state.write().begin();
    let result = match self.credential() {
      Ok(token) => self.api.add_to_cart(&token, product_id).await,
      Err(e) => Err(e),
    };
    self.settle(CartOp::Add, result)
  }

  pub async fn list(&self) -> Result<CartResponse, ClientError> {
    self.state.write().begin();
    let result = match self.credential() {
      Ok(token) => self.api.get_cart_items(&token).await,
      Err(e) => Err(e),
    };
    self.settle(CartOp::List, result)
  }

  pub async fn remove(&self, product_id: Uuid) -> Result<CartResponse, ClientError> {
    self.state.write().begin();
    let result = match self.credential() {
      Ok(token) => self.api.remove_from_cart(&token, product_id).await,
      Err(e) => Err(e),
    };
    self.settle(CartOp::Remove, result)
  }

  pub async fn clear(&self) -> Result<CartResponse, ClientError> {
    self.state.write().begin();
    let result = match self.credential() {
      Ok(token) => self.api.clear_cart(&token).await,
      Err(e) => Err(e),
    };
    self.settle(CartOp::Clear, result)
  }

  fn credential(&self) -> Result<String, ClientError> {
    match self.token.read().as_deref() {
      Some(token) if !token.is_empty() => Ok(token.to_string()),
      _ => Err(ClientError::MissingCredential),
    }
  }

  fn settle(&self, op: CartOp, result: Result<CartResponse, ClientError>) -> Result<CartResponse, ClientError> {
    let mut state = self.state.write();
    match &result {
      Ok(response) => state.fulfill(op, response),
      Err(e) => {
        warn!(?op, error = %e, "Cart request failed.");
        state.reject(e.to_string());
      }
    }
    result
  }
}
