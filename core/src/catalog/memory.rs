// core/src/catalog/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::ProductCatalog;
use crate::error::CartResult;
use crate::models::Product;

#[derive(Debug, Default)]
pub struct MemoryCatalog {
  products: RwLock<HashMap<Uuid, Product>>,
}

impl MemoryCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
    let catalog = Self::new();
    for product in products {
      catalog.insert(product);
    }
    catalog
  }

  pub fn insert(&self, product: Product) {
    self.products.write().insert(product.id, product);
  }

  /// Drops a product, leaving any cart lines that point at it dangling.
  pub fn remove(&self, product_id: Uuid) -> Option<Product> {
    self.products.write().remove(&product_id)
  }
}

#[async_trait]
impl ProductCatalog for MemoryCatalog {
  async fn find_product(&self, product_id: Uuid) -> CartResult<Option<Product>> {
    Ok(self.products.read().get(&product_id).cloned())
  }

  async fn find_products(&self, product_ids: &[Uuid]) -> CartResult<Vec<Product>> {
    let products = self.products.read();
    Ok(product_ids.iter().filter_map(|id| products.get(id).cloned()).collect())
  }
}
