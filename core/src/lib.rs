// core/src/lib.rs

//! Per-user shopping carts.
//!
//! A cart holds at most one line per product, is created lazily on the
//! first add, and is never deleted, only emptied. The crate provides:
//!  - [`CartStore`]: the persistence contract, with in-memory and PostgreSQL stores.
//!  - [`ProductCatalog`]: read access to product existence and display fields.
//!  - [`CartService`]: add/list/remove/clear for an already-resolved user id.
//!    Adding runs as an [`orka`] pipeline, see [`pipelines`].

pub mod catalog;
pub mod error;
pub mod models;
pub mod pipelines;
pub mod service;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::catalog::{MemoryCatalog, PgCatalog, ProductCatalog};
pub use crate::error::{CartError, CartResult};
pub use crate::models::{
  Cart, CartItem, CartLine, CartOutcome, CartReply, CartResponse, CartView, Product, ProductDetails,
};
pub use crate::service::CartService;
pub use crate::store::{AppendOutcome, CartStore, MemoryCartStore, PgCartStore};
