// core/src/error.rs
use anyhow::Error as AnyhowError;
use orka::OrkaError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CartError {
  #[error("Product not found: {0}")]
  ProductNotFound(Uuid),

  #[error("Cart not found for user: {0}")]
  CartNotFound(Uuid),

  /// Two writers raced to create the same owner's cart.
  #[error("Cart conflict: {0}")]
  Conflict(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  /// The add-to-cart pipeline itself failed (missing handler, bad registration).
  #[error("Cart workflow error: {0}")]
  Workflow(#[from] OrkaError),

  #[error("Internal cart error: {0}")]
  Internal(String),
}

impl CartError {
  /// True for failures the caller caused (missing product or cart).
  pub fn is_not_found(&self) -> bool {
    matches!(self, CartError::ProductNotFound(_) | CartError::CartNotFound(_))
  }
}

impl From<AnyhowError> for CartError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<sqlx::Error>() {
      Ok(sqlx_err) => CartError::Database(sqlx_err),
      Err(other) => CartError::Internal(other.to_string()),
    }
  }
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
