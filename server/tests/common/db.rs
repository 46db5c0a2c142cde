// tests/common/db.rs

//! Throwaway PostgreSQL for persistence tests.
//!
//! One container is started per test binary and shared; every [`TestDb`] gets
//! its own freshly migrated database inside it, so tests never see each
//! other's rows.

use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::OnceCell;
use uuid::Uuid;

const DB_USER: &str = "cart_test";
const DB_PASSWORD: &str = "cart_test_password";

struct SharedPostgres {
  _container: ContainerAsync<PostgresImage>,
  host: String,
  port: u16,
}

impl SharedPostgres {
  fn url(&self, db_name: &str) -> String {
    format!("postgresql://{DB_USER}:{DB_PASSWORD}@{}:{}/{db_name}", self.host, self.port)
  }
}

static POSTGRES: OnceCell<SharedPostgres> = OnceCell::const_new();

async fn start_postgres() -> SharedPostgres {
  let container = PostgresImage::default()
    .with_user(DB_USER)
    .with_password(DB_PASSWORD)
    .with_db_name("cart_test")
    .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
    .start()
    .await
    .expect("Failed to start PostgreSQL container");

  let port = container
    .get_host_port_ipv4(5432)
    .await
    .expect("Failed to get container port");
  let host = std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

  SharedPostgres {
    _container: container,
    host,
    port,
  }
}

/// An isolated, migrated database.
#[derive(Debug, Clone)]
pub struct TestDb {
  pub pool: PgPool,
  pub name: String,
}

impl TestDb {
  pub async fn new() -> Self {
    let postgres = POSTGRES.get_or_init(start_postgres).await;
    let name = format!("cart_test_{}", Uuid::new_v4().simple());

    let mut admin = PgConnection::connect(&postgres.url("postgres"))
      .await
      .expect("Failed to connect to postgres database");
    sqlx::query(&format!("CREATE DATABASE \"{name}\""))
      .execute(&mut admin)
      .await
      .expect("Failed to create test database");
    admin.close().await.expect("Failed to close admin connection");

    let pool = PgPool::connect(&postgres.url(&name))
      .await
      .expect("Failed to create pool for database");
    cart_server::MIGRATOR
      .run(&pool)
      .await
      .expect("Failed to run migrations on database");

    Self { pool, name }
  }

  /// Inserts a catalog row and returns its id.
  pub async fn insert_product(&self, title: &str, price_cents: i64) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO products (id, title, price_cents, stock_quantity) VALUES ($1, $2, $3, 5)")
      .bind(id)
      .bind(title)
      .bind(price_cents)
      .execute(&self.pool)
      .await
      .expect("Failed to insert product");
    id
  }

  pub async fn delete_product(&self, id: Uuid) {
    sqlx::query("DELETE FROM products WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .expect("Failed to delete product");
  }

  /// Stores a bearer credential. `expires_in_secs` may be negative for an already-expired token.
  pub async fn insert_token(&self, token: &str, user_id: Uuid, expires_in_secs: Option<i64>) {
    sqlx::query(
      "INSERT INTO auth_tokens (token, user_id, expires_at) VALUES ($1, $2, now() + $3::BIGINT * interval '1 second')",
    )
    .bind(token)
    .bind(user_id)
    .bind(expires_in_secs)
    .execute(&self.pool)
    .await
    .expect("Failed to insert token");
  }
}
