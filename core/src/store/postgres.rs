// core/src/store/postgres.rs

//! PostgreSQL cart store.
//!
//! Carts live in `carts` (one row per owner, `owner_id` unique) and their
//! items in `cart_items` keyed by `(cart_id, product_id)`. Item order is
//! the `position` sequence, i.e. insertion order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use tracing::instrument;
use uuid::Uuid;

use super::{AppendOutcome, CartStore};
use crate::error::{CartError, CartResult};
use crate::models::{Cart, CartItem};

const CART_COLUMNS: &str = "id, owner_id, created_at, updated_at";

#[derive(Debug, FromRow)]
struct CartRow {
  id: Uuid,
  owner_id: Uuid,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl CartRow {
  fn into_cart(self, items: Vec<CartItem>) -> Cart {
    Cart {
      id: self.id,
      owner_id: self.owner_id,
      items,
      created_at: self.created_at,
      updated_at: self.updated_at,
    }
  }
}

#[derive(Debug, Clone)]
pub struct PgCartStore {
  pool: PgPool,
}

impl PgCartStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

async fn load_items(conn: &mut PgConnection, cart_id: Uuid) -> CartResult<Vec<CartItem>> {
  let items = sqlx::query_as::<_, CartItem>(
    "SELECT product_id, added_at FROM cart_items WHERE cart_id = $1 ORDER BY position ASC",
  )
  .bind(cart_id)
  .fetch_all(conn)
  .await?;
  Ok(items)
}

async fn lock_cart(conn: &mut PgConnection, owner_id: Uuid) -> CartResult<Option<CartRow>> {
  let row = sqlx::query_as::<_, CartRow>(&format!(
    "SELECT {CART_COLUMNS} FROM carts WHERE owner_id = $1 FOR UPDATE"
  ))
  .bind(owner_id)
  .fetch_optional(conn)
  .await?;
  Ok(row)
}

async fn touch_cart(conn: &mut PgConnection, cart_id: Uuid, at: DateTime<Utc>) -> CartResult<DateTime<Utc>> {
  let updated_at = sqlx::query_scalar::<_, DateTime<Utc>>("UPDATE carts SET updated_at = $2 WHERE id = $1 RETURNING updated_at")
    .bind(cart_id)
    .bind(at)
    .fetch_one(conn)
    .await?;
  Ok(updated_at)
}

fn map_create_error(err: sqlx::Error, owner_id: Uuid) -> CartError {
  match err {
    sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
      CartError::Conflict(format!("a cart already exists for user {}", owner_id))
    }
    other => CartError::Database(other),
  }
}

#[async_trait]
impl CartStore for PgCartStore {
  #[instrument(name = "pg_cart_store::find_by_owner", skip(self), err(Display))]
  async fn find_by_owner(&self, owner_id: Uuid) -> CartResult<Option<Cart>> {
    // FOR SHARE waits out any writer holding the row, so the cart and its
    // items come from the same committed state.
    let mut tx = self.pool.begin().await?;
    let row = sqlx::query_as::<_, CartRow>(&format!(
      "SELECT {CART_COLUMNS} FROM carts WHERE owner_id = $1 FOR SHARE"
    ))
    .bind(owner_id)
    .fetch_optional(&mut *tx)
    .await?;

    let cart = match row {
      Some(row) => {
        let items = load_items(&mut tx, row.id).await?;
        Some(row.into_cart(items))
      }
      None => None,
    };
    tx.commit().await?;
    Ok(cart)
  }

  #[instrument(name = "pg_cart_store::create", skip(self), err(Display))]
  async fn create(&self, owner_id: Uuid) -> CartResult<Cart> {
    let now = Utc::now();
    let row = sqlx::query_as::<_, CartRow>(&format!(
      "INSERT INTO carts (id, owner_id, created_at, updated_at) VALUES ($1, $2, $3, $3) RETURNING {CART_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(owner_id)
    .bind(now)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| map_create_error(e, owner_id))?;

    Ok(row.into_cart(Vec::new()))
  }

  #[instrument(name = "pg_cart_store::save", skip(self, cart), fields(owner_id = %cart.owner_id, items = cart.items.len()), err(Display))]
  async fn save(&self, cart: &Cart) -> CartResult<Cart> {
    let mut tx = self.pool.begin().await?;

    let row = lock_cart(&mut tx, cart.owner_id)
      .await?
      .ok_or(CartError::CartNotFound(cart.owner_id))?;

    sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
      .bind(row.id)
      .execute(&mut *tx)
      .await?;

    for item in &cart.items {
      sqlx::query(
        "INSERT INTO cart_items (cart_id, product_id, added_at) VALUES ($1, $2, $3) \
         ON CONFLICT (cart_id, product_id) DO NOTHING",
      )
      .bind(row.id)
      .bind(item.product_id)
      .bind(item.added_at)
      .execute(&mut *tx)
      .await?;
    }

    let updated_at = touch_cart(&mut tx, row.id, Utc::now()).await?;
    let items = load_items(&mut tx, row.id).await?;
    tx.commit().await?;

    Ok(CartRow { updated_at, ..row }.into_cart(items))
  }

  #[instrument(name = "pg_cart_store::append_item", skip(self, added_at), err(Display))]
  async fn append_item(&self, owner_id: Uuid, product_id: Uuid, added_at: DateTime<Utc>) -> CartResult<AppendOutcome> {
    let mut tx = self.pool.begin().await?;

    // The row lock serializes concurrent appends for the same owner.
    let mut row = lock_cart(&mut tx, owner_id)
      .await?
      .ok_or(CartError::CartNotFound(owner_id))?;

    let insert = sqlx::query(
      "INSERT INTO cart_items (cart_id, product_id, added_at) VALUES ($1, $2, $3) \
       ON CONFLICT (cart_id, product_id) DO NOTHING",
    )
    .bind(row.id)
    .bind(product_id)
    .bind(added_at)
    .execute(&mut *tx)
    .await?;
    let inserted = insert.rows_affected() == 1;

    if inserted {
      row.updated_at = touch_cart(&mut tx, row.id, Utc::now()).await?;
    }

    let items = load_items(&mut tx, row.id).await?;
    tx.commit().await?;

    Ok(AppendOutcome {
      cart: row.into_cart(items),
      inserted,
    })
  }

  #[instrument(name = "pg_cart_store::remove_item", skip(self), err(Display))]
  async fn remove_item(&self, owner_id: Uuid, product_id: Uuid) -> CartResult<Option<Cart>> {
    let mut tx = self.pool.begin().await?;

    let Some(mut row) = lock_cart(&mut tx, owner_id).await? else {
      return Ok(None);
    };

    sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
      .bind(row.id)
      .bind(product_id)
      .execute(&mut *tx)
      .await?;

    row.updated_at = touch_cart(&mut tx, row.id, Utc::now()).await?;
    let items = load_items(&mut tx, row.id).await?;
    tx.commit().await?;

    Ok(Some(row.into_cart(items)))
  }

  #[instrument(name = "pg_cart_store::clear_items", skip(self), err(Display))]
  async fn clear_items(&self, owner_id: Uuid) -> CartResult<Cart> {
    let mut tx = self.pool.begin().await?;

    let row = sqlx::query_as::<_, CartRow>(&format!(
      "INSERT INTO carts (id, owner_id, created_at, updated_at) VALUES ($1, $2, $3, $3) \
       ON CONFLICT (owner_id) DO UPDATE SET updated_at = EXCLUDED.updated_at \
       RETURNING {CART_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(owner_id)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
      .bind(row.id)
      .execute(&mut *tx)
      .await?;

    tx.commit().await?;

    Ok(row.into_cart(Vec::new()))
  }
}
