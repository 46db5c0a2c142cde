// server/src/lib.rs

//! HTTP surface for per-user shopping carts.

pub mod auth;
pub mod config;
pub mod errors;
pub mod state;
pub mod web;

pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;

/// Embedded schema migrations for the cart, catalog, and token tables.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
