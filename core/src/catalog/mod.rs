// core/src/catalog/mod.rs

//! Read-only view of the product catalog.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CartResult;
use crate::models::Product;

pub mod memory;
pub mod postgres;

pub use memory::MemoryCatalog;
pub use postgres::PgCatalog;

#[async_trait]
pub trait ProductCatalog: Send + Sync {
  async fn find_product(&self, product_id: Uuid) -> CartResult<Option<Product>>;

  /// Batch lookup. Ids with no matching product are left out of the result.
  async fn find_products(&self, product_ids: &[Uuid]) -> CartResult<Vec<Product>>;
}
