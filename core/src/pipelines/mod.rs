// core/src/pipelines/mod.rs

//! Orka pipelines behind multi-step cart operations.

pub mod cart_pipeline;
pub mod contexts;

pub use cart_pipeline::register_add_to_cart_pipeline;
pub use contexts::AddToCartCtx;
