// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

pub mod db;

use std::sync::Arc;

use cart_core::{CartService, MemoryCartStore, MemoryCatalog, Product};
use cart_server::auth::StaticTokenResolver;
use cart_server::config::{AppConfig, LogFormat};
use cart_server::AppState;
use once_cell::sync::Lazy;
use tracing::Level;
use uuid::Uuid;

pub const ALICE_TOKEN: &str = "alice-token";
pub const BOB_TOKEN: &str = "bob-token";

pub struct TestWorld {
  pub state: AppState,
  pub catalog: Arc<MemoryCatalog>,
  pub alice: Uuid,
  pub bob: Uuid,
}

impl TestWorld {
  pub fn new() -> Self {
    let catalog = Arc::new(MemoryCatalog::new());
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let resolver = StaticTokenResolver::new()
      .with_token(ALICE_TOKEN, alice)
      .with_token(BOB_TOKEN, bob);

    let state = AppState {
      cart_service: CartService::new(Arc::new(MemoryCartStore::new()), catalog.clone()),
      token_resolver: Arc::new(resolver),
      config: Arc::new(test_config()),
    };
    Self { state, catalog, alice, bob }
  }

  pub fn stock(&self, title: &str, price_cents: i64) -> Uuid {
    let mut product = Product::new(title, price_cents, 3);
    product.images = vec![format!("https://img.example/{}.png", title)];
    let id = product.id;
    self.catalog.insert(product);
    id
  }
}

pub fn test_config() -> AppConfig {
  AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 0,
    database_url: "postgres://unused".to_string(),
    database_max_connections: 1,
    run_migrations: false,
    log_format: LogFormat::Pretty,
  }
}

pub fn bearer(token: &str) -> (&'static str, String) {
  ("Authorization", format!("Bearer {}", token))
}

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
