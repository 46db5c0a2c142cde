// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use cart_core::{AppendOutcome, Cart, CartResult, CartService, CartStore, MemoryCartStore, MemoryCatalog, Product};
use chrono::{DateTime, Utc};
use tracing::Level;
use uuid::Uuid;

/// A service wired to in-memory collaborators, with handles kept for assertions.
pub struct Fixture {
  pub service: CartService,
  pub store: Arc<MemoryCartStore>,
  pub catalog: Arc<MemoryCatalog>,
}

impl Fixture {
  pub fn new() -> Self {
    let store = Arc::new(MemoryCartStore::new());
    let catalog = Arc::new(MemoryCatalog::new());
    let service = CartService::new(store.clone(), catalog.clone());
    Self { service, store, catalog }
  }

  /// Adds a product to the catalog and returns its id.
  pub fn stock(&self, title: &str) -> Uuid {
    let product = Product::new(title, 1_999, 5);
    let id = product.id;
    self.catalog.insert(product);
    id
  }
}

/// Memory store that counts the creation path and can lose one creation race on demand.
#[derive(Default)]
pub struct RecordingStore {
  pub inner: MemoryCartStore,
  pub lookups: AtomicUsize,
  pub creates: AtomicUsize,
  rival_creates_first: AtomicBool,
}

impl RecordingStore {
  /// The next `create` finds a cart inserted by someone else and reports `Conflict`.
  pub fn lose_next_create(&self) {
    self.rival_creates_first.store(true, Ordering::SeqCst);
  }

  pub fn creates(&self) -> usize {
    self.creates.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl CartStore for RecordingStore {
  async fn find_by_owner(&self, owner_id: Uuid) -> CartResult<Option<Cart>> {
    self.lookups.fetch_add(1, Ordering::SeqCst);
    self.inner.find_by_owner(owner_id).await
  }

  async fn create(&self, owner_id: Uuid) -> CartResult<Cart> {
    self.creates.fetch_add(1, Ordering::SeqCst);
    if self.rival_creates_first.swap(false, Ordering::SeqCst) {
      self.inner.create(owner_id).await?;
    }
    self.inner.create(owner_id).await
  }

  async fn save(&self, cart: &Cart) -> CartResult<Cart> {
    self.inner.save(cart).await
  }

  async fn append_item(&self, owner_id: Uuid, product_id: Uuid, added_at: DateTime<Utc>) -> CartResult<AppendOutcome> {
    self.inner.append_item(owner_id, product_id, added_at).await
  }

  async fn remove_item(&self, owner_id: Uuid, product_id: Uuid) -> CartResult<Option<Cart>> {
    self.inner.remove_item(owner_id, product_id).await
  }

  async fn clear_items(&self, owner_id: Uuid) -> CartResult<Cart> {
    self.inner.clear_items(owner_id).await
  }
}

/// A service over a [`RecordingStore`].
pub fn recording_service(catalog: Arc<MemoryCatalog>) -> (CartService, Arc<RecordingStore>) {
  let store = Arc::new(RecordingStore::default());
  (CartService::new(store.clone(), catalog), store)
}

pub fn product_ids(reply: &cart_core::CartReply) -> Vec<Uuid> {
  reply.view.items.iter().map(|line| line.product_id).collect()
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
