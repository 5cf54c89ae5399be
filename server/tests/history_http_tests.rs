// tests/history_http_tests.rs
mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use common::*;
use footprint_core::OrderStatus;
use footprint_server::web::configure_app_routes;
use serde_json::{json, Value};
use uuid::Uuid;

macro_rules! init_app {
  ($test_app:expr) => {
    test::init_service(
      App::new()
        .app_data(web::Data::new($test_app.state.clone()))
        .configure(configure_app_routes),
    )
    .await
  };
}

#[actix_web::test]
async fn test_history_stats_and_filter() {
  let t = TestApp::new(test_config());
  let user = Uuid::new_v4();
  t.add_user_order(Some(user), 100, OrderStatus::Delivered);
  t.add_user_order(Some(user), 50, OrderStatus::Shipped);
  t.add_user_order(Some(Uuid::new_v4()), 999, OrderStatus::Shipped);
  let app = init_app!(t);

  let resp = test::call_service(
    &app,
    test::TestRequest::get()
      .uri(&format!("/api/users/{}/orders/history?status=all", user))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["totalOrders"], json!(2));
  assert_eq!(body["totalSpent"], json!(150));
  assert_eq!(body["inTransitCount"], json!(1));
  assert_eq!(body["orders"].as_array().unwrap().len(), 2);

  let resp = test::call_service(
    &app,
    test::TestRequest::get()
      .uri(&format!("/api/users/{}/orders/history?status=shipped&pageSize=5", user))
      .to_request(),
  )
  .await;
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["orders"].as_array().unwrap().len(), 1);
  assert_eq!(body["orders"][0]["status"], json!("shipped"));
  assert_eq!(body["totalOrders"], json!(2));
}

#[actix_web::test]
async fn test_history_rejects_unknown_status() {
  let t = TestApp::new(test_config());
  let app = init_app!(t);

  let resp = test::call_service(
    &app,
    test::TestRequest::get()
      .uri(&format!("/api/users/{}/orders/history?status=teleported", Uuid::new_v4()))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
