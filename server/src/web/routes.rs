// server/src/web/routes.rs

use actix_web::{error, web, HttpRequest};

use crate::errors::AppError;
use crate::web::handlers::{cart_handlers, product_handlers};

// Liveness only; does not touch the database.
async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  AppError::Validation(format!("Invalid request body: {}", err)).into()
}

fn path_error_handler(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
  AppError::Validation(format!("Invalid path parameter: {}", err)).into()
}

// Called from `main.rs` and from tests to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::PathConfig::default().error_handler(path_error_handler))
    .service(
      web::scope("/api/v1") // Base path for API version 1
        .route("/health", web::get().to(health_check_handler))
        // Cart Routes. Every cart route requires a bearer credential (AuthenticatedUser extractor).
        .service(
          web::scope("/cart")
            .route("", web::post().to(cart_handlers::add_to_cart_handler))
            .route("", web::get().to(cart_handlers::get_cart_items_handler))
            .route("", web::delete().to(cart_handlers::clear_cart_handler))
            .route("/{product_id}", web::delete().to(cart_handlers::remove_from_cart_handler)),
        )
        .service(
          web::scope("/products").route("/{product_id}", web::get().to(product_handlers::get_product_handler)),
        ),
    );
}
