// client/src/api.rs

use cart_core::CartResponse;
use reqwest::{RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::error::ClientError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddToCartBody {
  product_id: Uuid,
}

#[derive(Deserialize)]
struct ErrorBody {
  message: String,
}

/// Thin wrapper over the cart endpoints. Every call takes the bearer token explicitly.
#[derive(Debug, Clone)]
pub struct CartApi {
  http: reqwest::Client,
  base_url: String,
}

impl CartApi {
  /// `base_url` is the API root, e.g. `http://localhost:8080/api/v1`.
  pub fn new(base_url: impl Into<String>) -> Self {
    Self::with_client(reqwest::Client::new(), base_url)
  }

  pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
    let base_url = base_url.into().trim_end_matches('/').to_string();
    Self { http, base_url }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn cart_url(&self) -> String {
    format!("{}/cart", self.base_url)
  }

  #[instrument(name = "cart_api::add_to_cart", skip(self, token))]
  pub async fn add_to_cart(&self, token: &str, product_id: Uuid) -> Result<CartResponse, ClientError> {
    let request = self
      .http
      .post(self.cart_url())
      .bearer_auth(token)
      .json(&AddToCartBody { product_id });
    send(request).await
  }

  #[instrument(name = "cart_api::get_cart_items", skip(self, token))]
  pub async fn get_cart_items(&self, token: &str) -> Result<CartResponse, ClientError> {
    send(self.http.get(self.cart_url()).bearer_auth(token)).await
  }

  #[instrument(name = "cart_api::remove_from_cart", skip(self, token))]
  pub async fn remove_from_cart(&self, token: &str, product_id: Uuid) -> Result<CartResponse, ClientError> {
    let url = format!("{}/{}", self.cart_url(), product_id);
    send(self.http.delete(url).bearer_auth(token)).await
  }

  #[instrument(name = "cart_api::clear_cart", skip(self, token))]
  pub async fn clear_cart(&self, token: &str) -> Result<CartResponse, ClientError> {
    send(self.http.delete(self.cart_url()).bearer_auth(token)).await
  }
}

async fn send(request: RequestBuilder) -> Result<CartResponse, ClientError> {
  let response = request.send().await?;
  let status = response.status();

  if status.is_success() {
    let body = response.json::<CartResponse>().await?;
    debug!(total_items = body.view.total_items, "Cart API call succeeded.");
    return Ok(body);
  }

  let message = match response.json::<ErrorBody>().await {
    Ok(body) => body.message,
    Err(_) => fallback_message(status),
  };
  warn!(status = status.as_u16(), %message, "Cart API call failed.");
  Err(ClientError::Api {
    status: status.as_u16(),
    message,
  })
}

fn fallback_message(status: StatusCode) -> String {
  status.canonical_reason().unwrap_or("Something went wrong").to_string()
}
