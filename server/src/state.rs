// server/src/state.rs
use crate::auth::TokenResolver;
use crate::config::AppConfig;
use cart_core::CartService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub cart_service: CartService,
  pub token_resolver: Arc<dyn TokenResolver>,
  pub config: Arc<AppConfig>, // Share loaded config
}
