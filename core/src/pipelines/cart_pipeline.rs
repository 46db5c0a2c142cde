// core/src/pipelines/cart_pipeline.rs

use orka::{ContextData, Orka, Pipeline, PipelineControl};
use tracing::{info, warn};

use crate::error::{CartError, CartResult};
use crate::models::CartOutcome;
use crate::pipelines::contexts::AddToCartCtx;
use crate::service::{expand_cart, log_unexpected};

pub fn register_add_to_cart_pipeline(orka_registry: &Orka<CartError>) {
  let mut p = Pipeline::<AddToCartCtx, CartError>::new(&[
    ("check_product", false, None),
    ("find_or_create_cart", false, None),
    ("append_item", false, None),
    ("expand_cart", false, None),
  ]);

  // Step 1: the product must exist before a cart is touched
  p.on_root("check_product", |ctx_data: ContextData<AddToCartCtx>| {
    Box::pin(async move {
      let (catalog, product_id) = {
        let guard = ctx_data.read();
        (guard.catalog.clone(), guard.product_id)
      };

      let product = catalog
        .find_product(product_id)
        .await
        .map_err(|e| log_unexpected("find_product", e))?;
      if product.is_none() {
        warn!("Add to Cart Pipeline: Product {} not found.", product_id);
        return Err(CartError::ProductNotFound(product_id));
      }
      Ok::<_, CartError>(PipelineControl::Continue)
    })
  });

  // Step 2: lazy cart creation, Conflict on a lost race is resolved by the store
  p.on_root("find_or_create_cart", |ctx_data: ContextData<AddToCartCtx>| {
    Box::pin(async move {
      let (store, user_id) = {
        let guard = ctx_data.read();
        (guard.store.clone(), guard.user_id)
      };

      let cart = store
        .find_or_create(user_id)
        .await
        .map_err(|e| log_unexpected("find_or_create", e))?;
      ctx_data.write().cart = Some(cart);
      Ok::<_, CartError>(PipelineControl::Continue)
    })
  });

  // Step 3: atomic conditional append
  p.on_root("append_item", |ctx_data: ContextData<AddToCartCtx>| {
    Box::pin(async move {
      let (store, owner_id, product_id, requested_at) = {
        let guard = ctx_data.read();
        let owner_id = guard.cart.as_ref().map(|cart| cart.owner_id).ok_or_else(|| {
          CartError::Internal("append_item ran before the cart was loaded.".to_string())
        })?;
        (guard.store.clone(), owner_id, guard.product_id, guard.requested_at)
      };

      let appended = store
        .append_item(owner_id, product_id, requested_at)
        .await
        .map_err(|e| log_unexpected("append_item", e))?;

      let outcome = if appended.inserted {
        info!("Add to Cart Pipeline: Product {} added to cart of user {}.", product_id, owner_id);
        CartOutcome::Added
      } else {
        info!("Add to Cart Pipeline: Product {} already in cart of user {}.", product_id, owner_id);
        CartOutcome::AlreadyInCart
      };

      let mut guard = ctx_data.write();
      guard.cart = Some(appended.cart);
      guard.outcome = Some(outcome);
      Ok::<_, CartError>(PipelineControl::Continue)
    })
  });

  // Step 4: join with catalog details for the reply
  p.on_root("expand_cart", |ctx_data: ContextData<AddToCartCtx>| {
    Box::pin(async move {
      let (catalog, cart) = {
        let guard = ctx_data.read();
        let cart = guard
          .cart
          .clone()
          .ok_or_else(|| CartError::Internal("expand_cart ran without a cart.".to_string()))?;
        (guard.catalog.clone(), cart)
      };

      let view = expand_cart(catalog.as_ref(), &cart).await?;
      ctx_data.write().view = Some(view);
      Ok::<_, CartError>(PipelineControl::Continue)
    })
  });

  orka_registry.register_pipeline(p);
  info!("Add to Cart pipeline registered.");
}
