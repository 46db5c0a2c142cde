// server/src/auth.rs

//! Bearer-credential resolution.
//!
//! Tokens are issued elsewhere. This module only turns one into a user id
//! before a cart handler runs; handlers never see the raw token.

use std::collections::HashMap;

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use sqlx::PgPool;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[async_trait]
pub trait TokenResolver: Send + Sync {
  /// The user the token belongs to, or `None` when it is unknown or expired.
  async fn resolve(&self, token: &str) -> Result<Option<Uuid>, AppError>;
}

/// Looks tokens up in the shared `auth_tokens` table.
#[derive(Debug, Clone)]
pub struct PgTokenResolver {
  pool: PgPool,
}

impl PgTokenResolver {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl TokenResolver for PgTokenResolver {
  #[instrument(name = "auth::resolve_token", skip_all, err(Display))]
  async fn resolve(&self, token: &str) -> Result<Option<Uuid>, AppError> {
    let user_id = sqlx::query_scalar::<_, Uuid>(
      "SELECT user_id FROM auth_tokens WHERE token = $1 AND (expires_at IS NULL OR expires_at > now())",
    )
    .bind(token)
    .fetch_optional(&self.pool)
    .await?;
    Ok(user_id)
  }
}

/// Fixed token table, for tests and local runs without an identity service.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenResolver {
  tokens: HashMap<String, Uuid>,
}

impl StaticTokenResolver {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_token(mut self, token: impl Into<String>, user_id: Uuid) -> Self {
    self.tokens.insert(token.into(), user_id);
    self
  }
}

#[async_trait]
impl TokenResolver for StaticTokenResolver {
  async fn resolve(&self, token: &str) -> Result<Option<Uuid>, AppError> {
    Ok(self.tokens.get(token).copied())
  }
}

/// Pulls the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(req: &HttpRequest) -> Result<String, AppError> {
  let value = req
    .headers()
    .get(header::AUTHORIZATION)
    .ok_or_else(|| AppError::Auth("Not authorized, no token".to_string()))?
    .to_str()
    .map_err(|_| AppError::Auth("Not authorized, malformed authorization header".to_string()))?;

  let (scheme, token) = value
    .split_once(' ')
    .ok_or_else(|| AppError::Auth("Not authorized, expected a bearer token".to_string()))?;
  if !scheme.eq_ignore_ascii_case("bearer") {
    return Err(AppError::Auth("Not authorized, expected a bearer token".to_string()));
  }

  let token = token.trim();
  if token.is_empty() {
    return Err(AppError::Auth("Not authorized, no token".to_string()));
  }
  Ok(token.to_string())
}

/// The identity attached to a request by its bearer credential.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
  pub user_id: Uuid,
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let token = bearer_token(req);
    let app_state = req.app_data::<web::Data<AppState>>().cloned();

    Box::pin(async move {
      let token = token.inspect_err(|e| warn!("AuthenticatedUser extractor: {}", e))?;
      let app_state =
        app_state.ok_or_else(|| AppError::Internal("AppState is not registered with the application.".to_string()))?;

      match app_state.token_resolver.resolve(&token).await? {
        Some(user_id) => Ok(AuthenticatedUser { user_id }),
        None => {
          warn!("AuthenticatedUser extractor: token did not resolve to a user.");
          Err(AppError::Auth("Not authorized, token failed".to_string()))
        }
      }
    })
  }
}
