// client/src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
  /// Raised locally; the request never leaves the process.
  #[error("No token found. Please login again.")]
  MissingCredential,

  /// The server answered with a non-success status.
  #[error("{message}")]
  Api { status: u16, message: String },

  #[error("Request failed: {0}")]
  Transport(#[from] reqwest::Error),
}

impl ClientError {
  pub fn status(&self) -> Option<u16> {
    match self {
      ClientError::Api { status, .. } => Some(*status),
      _ => None,
    }
  }
}
