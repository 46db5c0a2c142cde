// client/src/state.rs

//! The cart snapshot a UI renders from, and its transitions.

use cart_core::{CartLine, CartResponse};

/// Which request settled a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOp {
  Add,
  List,
  Remove,
  Clear,
}

impl CartOp {
  /// Mutations flag success on completion; plain reads do not.
  fn marks_success(self) -> bool {
    !matches!(self, CartOp::List)
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
  /// Last cart the server returned.
  pub items: Vec<CartLine>,
  pub total_items: usize,
  pub pending: bool,
  pub succeeded: bool,
  /// Message of the most recent failure. Items are left as they were.
  pub last_error: Option<String>,
  /// Status text of the most recent successful mutation, e.g. "Item already in cart".
  pub last_message: Option<String>,
}

impl CartState {
  pub fn begin(&mut self) {
    self.pending = true;
  }

  pub fn fulfill(&mut self, op: CartOp, response: &CartResponse) {
    self.pending = false;
    self.items = response.view.items.clone();
    self.total_items = response.view.total_items;
    self.last_error = None;
    if op.marks_success() {
      self.succeeded = true;
      self.last_message = response.message.clone();
    }
  }

  pub fn reject(&mut self, message: impl Into<String>) {
    self.pending = false;
    self.last_error = Some(message.into());
  }

  /// Clears request status; the cart snapshot stays.
  pub fn reset(&mut self) {
    self.pending = false;
    self.succeeded = false;
    self.last_error = None;
    self.last_message = None;
  }

  pub fn is_error(&self) -> bool {
    self.last_error.is_some()
  }
}
