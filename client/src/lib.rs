// client/src/lib.rs

//! Client side of the cart API.
//!
//! [`CartApi`] issues the HTTP calls; [`CartClient`] wraps it with the
//! credential slot and the [`CartState`] a UI renders from.

pub mod api;
pub mod client;
pub mod error;
pub mod state;

pub use crate::api::CartApi;
pub use crate::client::CartClient;
pub use crate::error::ClientError;
pub use crate::state::{CartOp, CartState};
