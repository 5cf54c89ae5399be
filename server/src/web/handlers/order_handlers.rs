// server/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use footprint_core::FinalizeOutcome;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeResponse {
  pub success: bool,
  pub order_id: Uuid,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub order_number: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub already_finalized: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pending_payment: Option<bool>,
}

impl From<FinalizeOutcome> for FinalizeResponse {
  fn from(outcome: FinalizeOutcome) -> Self {
    match outcome {
      FinalizeOutcome::Finalized {
        order_id,
        order_number,
        already_finalized,
      } => FinalizeResponse {
        success: true,
        order_id,
        order_number: Some(order_number),
        already_finalized: already_finalized.then_some(true),
        pending_payment: None,
      },
      FinalizeOutcome::PendingPayment { order_id, order_number } => FinalizeResponse {
        success: false,
        order_id,
        order_number: Some(order_number),
        already_finalized: None,
        pending_payment: Some(true),
      },
    }
  }
}

/// `POST /api/orders/{order_id}/finalize`
///
/// Called by the payment callback page when PayPlus navigated the whole tab
/// instead of messaging the iframe. Safe to call repeatedly and to race the
/// webhook.
#[instrument(
    name = "handler::finalize_order",
    skip(app_state, path),
    fields(order_id = %path)
)]
pub async fn finalize_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse> {
  // An id that cannot exist is reported the same way as one that does not.
  let order_id = Uuid::parse_str(path.as_str()).map_err(|_| AppError::NotFound("Order not found".to_string()))?;

  let outcome = app_state.finalizer.finalize(order_id).await?;
  info!(
    order_number = outcome.order_number(),
    already_finalized = outcome.already_finalized(),
    "Finalize request handled."
  );

  Ok(HttpResponse::Ok().json(FinalizeResponse::from(outcome)))
}
