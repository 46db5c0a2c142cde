// core/src/catalog/postgres.rs

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::ProductCatalog;
use crate::error::CartResult;
use crate::models::Product;

const PRODUCT_COLUMNS: &str = "id, title, description, price_cents, images, stock_quantity, created_at, updated_at";

/// Catalog backed by the shared `products` table.
#[derive(Debug, Clone)]
pub struct PgCatalog {
  pool: PgPool,
}

impl PgCatalog {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ProductCatalog for PgCatalog {
  #[instrument(name = "pg_catalog::find_product", skip(self), err(Display))]
  async fn find_product(&self, product_id: Uuid) -> CartResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"))
      .bind(product_id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(product)
  }

  #[instrument(name = "pg_catalog::find_products", skip(self, product_ids), fields(count = product_ids.len()), err(Display))]
  async fn find_products(&self, product_ids: &[Uuid]) -> CartResult<Vec<Product>> {
    if product_ids.is_empty() {
      return Ok(Vec::new());
    }
    let products = sqlx::query_as::<_, Product>(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ANY($1)"))
      .bind(product_ids)
      .fetch_all(&self.pool)
      .await?;
    Ok(products)
  }
}
