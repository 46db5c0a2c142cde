// core/src/models/product.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A catalog record. Owned by the catalog; carts only hold its id.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: Uuid,
  pub title: String,
  pub description: Option<String>,
  pub price_cents: i64,
  pub images: Vec<String>,
  pub stock_quantity: i32,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// The display fields a cart line carries for its product.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
  pub id: Uuid,
  pub title: String,
  pub description: Option<String>,
  pub price_cents: i64,
  pub images: Vec<String>,
  pub stock_quantity: i32,
}

impl From<&Product> for ProductDetails {
  fn from(product: &Product) -> Self {
    Self {
      id: product.id,
      title: product.title.clone(),
      description: product.description.clone(),
      price_cents: product.price_cents,
      images: product.images.clone(),
      stock_quantity: product.stock_quantity,
    }
  }
}

impl Product {
  /// A catalog record with a fresh id and no images or description.
  pub fn new(title: impl Into<String>, price_cents: i64, stock_quantity: i32) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      title: title.into(),
      description: None,
      price_cents,
      images: Vec::new(),
      stock_quantity,
      created_at: now,
      updated_at: now,
    }
  }
}
