// server/src/main.rs

use std::io;
use std::sync::Arc;

use actix_web::{web as actix_data, App, HttpServer}; // Renamed web to actix_data
use cart_core::{CartService, PgCartStore, PgCatalog};
use cart_server::auth::PgTokenResolver;
use cart_server::config::{AppConfig, LogFormat};
use cart_server::web::configure_app_routes;
use cart_server::{AppState, MIGRATOR};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
  // RUST_LOG overrides the default level
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration

  match format {
    LogFormat::Pretty => builder.init(),
    LogFormat::Json => builder.json().init(),
  }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
  // Load application configuration
  let app_config = AppConfig::from_env().map(Arc::new).map_err(|e| {
    eprintln!("Failed to load application configuration: {}", e);
    io::Error::other(e.to_string())
  })?;

  init_tracing(app_config.log_format);
  tracing::info!("Starting cart server...");

  // Initialize Database Pool
  let db_pool = PgPoolOptions::new()
    .max_connections(app_config.database_max_connections)
    .connect(&app_config.database_url)
    .await
    .map_err(|e| {
      tracing::error!(error = %e, "Failed to connect to the database.");
      io::Error::other(e)
    })?;
  tracing::info!("Successfully connected to the database.");

  if app_config.run_migrations {
    MIGRATOR.run(&db_pool).await.map_err(|e| {
      tracing::error!(error = %e, "Failed to apply database migrations.");
      io::Error::other(e)
    })?;
    tracing::info!("Database migrations applied.");
  }

  let cart_service = CartService::new(
    Arc::new(PgCartStore::new(db_pool.clone())),
    Arc::new(PgCatalog::new(db_pool.clone())),
  );

  let app_state = AppState {
    cart_service,
    token_resolver: Arc::new(PgTokenResolver::new(db_pool.clone())),
    config: app_config.clone(),
  };

  // Configure and Start Actix Web Server
  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
