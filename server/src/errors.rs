// server/src/errors.rs

use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use cart_core::CartError;
use serde_json::json;
use thiserror::Error;

/// Body text for every 5xx reply. Details stay in the server log.
const GENERIC_SERVER_ERROR: &str = "Server error";

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Cart Error: {source}")]
  Cart {
    #[from] // Allows conversion from cart_core::CartError
    source: CartError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String), // For miscellaneous errors
}

// Allow anyhow::Error to be converted into AppError::Internal for convenience in handlers
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<sqlx::Error>() {
      Ok(sqlx_err) => AppError::Sqlx(sqlx_err),
      Err(other) => AppError::Internal(other.to_string()),
    }
  }
}

impl AppError {
  /// Message safe to show the caller.
  fn public_message(&self) -> String {
    match self {
      AppError::Validation(m) | AppError::Auth(m) | AppError::NotFound(m) => m.clone(),
      AppError::Cart { source } => match source {
        CartError::ProductNotFound(_) => "Product not found".to_string(),
        CartError::CartNotFound(_) => "Cart not found".to_string(),
        CartError::Conflict(_) => "Cart was modified concurrently, please retry".to_string(),
        CartError::Database(_) | CartError::Workflow(_) | CartError::Internal(_) => GENERIC_SERVER_ERROR.to_string(),
      },
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Internal(_) => GENERIC_SERVER_ERROR.to_string(),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Cart { source } => match source {
        CartError::ProductNotFound(_) | CartError::CartNotFound(_) => StatusCode::NOT_FOUND,
        CartError::Conflict(_) => StatusCode::CONFLICT,
        CartError::Database(_) | CartError::Workflow(_) | CartError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
      },
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      // Log the full error; the caller only gets the generic message
      tracing::error!(application_error = %self, "Responding with server error");
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Responding with client error");
    }

    let mut response = HttpResponse::build(status);
    if status == StatusCode::UNAUTHORIZED {
      response.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
    }
    response.json(json!({ "message": self.public_message() }))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
