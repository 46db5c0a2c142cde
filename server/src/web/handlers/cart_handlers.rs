// server/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use cart_core::{CartReply, CartResponse};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::state::AppState;

// --- Request DTO ---
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequestPayload {
  pub product_id: Uuid,
}

fn cart_reply(reply: CartReply) -> HttpResponse {
  HttpResponse::Ok().json(CartResponse::from(reply))
}

// --- Handler Implementations ---

#[instrument(
    name = "handler::add_to_cart",
    skip(app_state, req_payload, auth_user),
    fields(user_id = %auth_user.user_id, product_id = %req_payload.product_id)
)]
pub async fn add_to_cart_handler(
  auth_user: AuthenticatedUser, // Extracted first so a missing credential wins over a bad body
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddToCartRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let reply = app_state
    .cart_service
    .add_item(auth_user.user_id, req_payload.product_id)
    .await?;

  info!(
    "Add to cart handled for user {}: {:?}, {} item(s).",
    auth_user.user_id, reply.outcome, reply.view.total_items
  );
  Ok(cart_reply(reply))
}

#[instrument(name = "handler::get_cart_items", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_cart_items_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
  let reply = app_state.cart_service.list_items(auth_user.user_id).await?;
  Ok(cart_reply(reply))
}

#[instrument(
    name = "handler::remove_from_cart",
    skip(app_state, path, auth_user),
    fields(user_id = %auth_user.user_id, product_id = %path.as_ref())
)]
pub async fn remove_from_cart_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  let reply = app_state.cart_service.remove_item(auth_user.user_id, product_id).await?;

  info!(
    "Remove from cart handled for user {}: {} item(s) left.",
    auth_user.user_id, reply.view.total_items
  );
  Ok(cart_reply(reply))
}

#[instrument(name = "handler::clear_cart", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn clear_cart_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
  let reply = app_state.cart_service.clear_items(auth_user.user_id).await?;
  Ok(cart_reply(reply))
}
