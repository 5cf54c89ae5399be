// server/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{history_handlers, order_handlers, webhook_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      // Browser-side fallback after a PayPlus iframe breakout.
      .route(
        "/orders/{order_id}/finalize",
        web::post().to(order_handlers::finalize_order_handler),
      )
      .route(
        "/users/{user_id}/orders/history",
        web::get().to(history_handlers::order_history_handler),
      )
      .service(
        web::scope("/webhooks").route(
          "/payplus",
          web::post().to(webhook_handlers::payplus_webhook_handler),
        ),
      ),
  );
}
