// core/src/models/mod.rs

//! Data structures for carts, their items, and the catalog products they reference.

pub mod cart;
pub mod product;
pub mod view;

pub use cart::{Cart, CartItem};
pub use product::{Product, ProductDetails};
pub use view::{CartLine, CartOutcome, CartReply, CartResponse, CartView};
