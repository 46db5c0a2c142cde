// core/src/service.rs

//! Cart operations on behalf of an already-authenticated user.
//!
//! Adding runs the registered add-to-cart pipeline (product check, lazy cart
//! creation, conditional append, expansion). The other operations are a
//! single store call followed by the same expansion.

use std::collections::HashMap;
use std::sync::Arc;

use orka::{ContextData, Orka, PipelineResult};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::catalog::ProductCatalog;
use crate::error::{CartError, CartResult};
use crate::models::{Cart, CartLine, CartOutcome, CartReply, CartView, ProductDetails};
use crate::pipelines::{register_add_to_cart_pipeline, AddToCartCtx};
use crate::store::CartStore;

#[derive(Clone)]
pub struct CartService {
  store: Arc<dyn CartStore>,
  catalog: Arc<dyn ProductCatalog>,
  orka: Arc<Orka<CartError>>,
}

impl std::fmt::Debug for CartService {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartService").finish_non_exhaustive()
  }
}

impl CartService {
  pub fn new(store: Arc<dyn CartStore>, catalog: Arc<dyn ProductCatalog>) -> Self {
    let orka = Orka::<CartError>::new();
    register_add_to_cart_pipeline(&orka);
    Self {
      store,
      catalog,
      orka: Arc::new(orka),
    }
  }

  pub fn catalog(&self) -> &Arc<dyn ProductCatalog> {
    &self.catalog
  }

  /// Adds `product_id` to the user's cart, creating the cart on first use.
  ///
  /// Re-adding a product already in the cart changes nothing and replies
  /// with [`CartOutcome::AlreadyInCart`].
  #[instrument(name = "cart_service::add_item", skip(self), err(Display))]
  pub async fn add_item(&self, user_id: Uuid, product_id: Uuid) -> CartResult<CartReply> {
    let ctx_data = ContextData::new(AddToCartCtx::new(
      self.store.clone(),
      self.catalog.clone(),
      user_id,
      product_id,
    ));

    match self.orka.run(ctx_data.clone()).await? {
      PipelineResult::Completed => {}
      PipelineResult::Stopped => {
        warn!("Add to Cart pipeline for user {} was stopped by a handler.", user_id);
        return Err(CartError::Internal("Add to cart was halted.".to_string()));
      }
    }

    let mut guard = ctx_data.write();
    match (guard.outcome.take(), guard.view.take()) {
      (Some(outcome), Some(view)) => Ok(CartReply::new(outcome, view)),
      _ => {
        error!("Add to Cart pipeline completed for user {} without a reply.", user_id);
        Err(CartError::Internal("Add to cart completed without a result.".to_string()))
      }
    }
  }

  /// The user's cart, or an empty view when they never had one.
  #[instrument(name = "cart_service::list_items", skip(self), err(Display))]
  pub async fn list_items(&self, user_id: Uuid) -> CartResult<CartReply> {
    let cart = self
      .store
      .find_by_owner(user_id)
      .await
      .map_err(|e| log_unexpected("find_by_owner", e))?;

    let view = match cart {
      Some(cart) => expand_cart(self.catalog.as_ref(), &cart).await?,
      None => CartView::empty(),
    };
    Ok(CartReply::new(CartOutcome::Fetched, view))
  }

  /// Removes `product_id` from the user's cart. Removing an absent product is not an error,
  /// but the user must already have a cart.
  #[instrument(name = "cart_service::remove_item", skip(self), err(Display))]
  pub async fn remove_item(&self, user_id: Uuid, product_id: Uuid) -> CartResult<CartReply> {
    let cart = self
      .store
      .remove_item(user_id, product_id)
      .await
      .map_err(|e| log_unexpected("remove_item", e))?
      .ok_or_else(|| {
        warn!("Remove from cart rejected: user {} has no cart.", user_id);
        CartError::CartNotFound(user_id)
      })?;

    info!("Product {} removed from cart of user {}.", product_id, user_id);
    let view = expand_cart(self.catalog.as_ref(), &cart).await?;
    Ok(CartReply::new(CartOutcome::Removed, view))
  }

  /// Empties the user's cart, creating an empty one if needed.
  #[instrument(name = "cart_service::clear_items", skip(self), err(Display))]
  pub async fn clear_items(&self, user_id: Uuid) -> CartResult<CartReply> {
    self
      .store
      .clear_items(user_id)
      .await
      .map_err(|e| log_unexpected("clear_items", e))?;

    info!("Cart of user {} cleared.", user_id);
    Ok(CartReply::new(CartOutcome::Cleared, CartView::empty()))
  }
}

/// Joins stored items with catalog details in one batch lookup, keeping cart order.
pub(crate) async fn expand_cart(catalog: &dyn ProductCatalog, cart: &Cart) -> CartResult<CartView> {
  let ids: Vec<Uuid> = cart.items.iter().map(|item| item.product_id).collect();
  let products = catalog
    .find_products(&ids)
    .await
    .map_err(|e| log_unexpected("find_products", e))?;

  let by_id: HashMap<Uuid, ProductDetails> = products
    .iter()
    .map(|product| (product.id, ProductDetails::from(product)))
    .collect();

  let lines = cart
    .items
    .iter()
    .map(|item| {
      let product = by_id.get(&item.product_id).cloned();
      if product.is_none() {
        warn!("Cart {} references product {} missing from catalog.", cart.id, item.product_id);
      }
      CartLine {
        product_id: item.product_id,
        product,
        added_at: item.added_at,
      }
    })
    .collect();

  Ok(CartView::new(lines))
}

pub(crate) fn log_unexpected(operation: &str, err: CartError) -> CartError {
  if !err.is_not_found() {
    error!(error = %err, operation, "Cart store or catalog failure.");
  }
  err
}
