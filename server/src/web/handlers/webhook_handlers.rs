// server/src/web/handlers/webhook_handlers.rs

use actix_web::{web, HttpRequest, HttpResponse};
use footprint_core::signature::verify_signature;
use footprint_core::{extract_client_ip, FinalizeError, PaymentRecord};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::state::AppState;

/// PayPlus status code for an approved transaction.
pub const PAYPLUS_SUCCESS_CODE: &str = "000";
const PAYPLUS_USER_AGENT: &str = "PayPlus";

#[derive(Debug, Deserialize)]
pub struct PayPlusWebhookPayload {
  pub transaction_uid: String,
  pub page_request_uid: Option<String>,
  pub status_code: String,
  /// Major currency units, as PayPlus reports it.
  pub amount: Option<f64>,
  pub currency: Option<String>,
  /// Our order id, passed through the payment page.
  pub more_info: Option<String>,
  pub customer_email: Option<String>,
}

impl PayPlusWebhookPayload {
  fn amount_minor_units(&self) -> Option<i64> {
    self.amount.map(|amount| (amount * 100.0).round() as i64)
  }

  fn payment_record(&self, order_id: Uuid) -> PaymentRecord {
    let mut record = if self.status_code == PAYPLUS_SUCCESS_CODE {
      PaymentRecord::succeeded(order_id, &self.transaction_uid)
    } else {
      PaymentRecord::failed(
        order_id,
        &self.transaction_uid,
        format!("Payment failed with status code: {}", self.status_code),
      )
    };
    record.page_request_uid = self.page_request_uid.clone();
    record.amount = self.amount_minor_units();
    record
  }
}

fn header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
  req.headers().get(name).and_then(|value| value.to_str().ok())
}

/// `POST /api/webhooks/payplus`
///
/// Steps: secret configured, caller IP allowed, user-agent, `hash` header,
/// signature, payload parse, then record the payment and finalize on success.
#[instrument(name = "handler::payplus_webhook", skip_all, fields(payload_bytes = body.len()))]
pub async fn payplus_webhook_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  body: web::Bytes,
) -> Result<HttpResponse> {
  let config = &app_state.config;

  // 1. Secret
  let secret = config.payplus_secret_key.as_ref().ok_or_else(|| {
    error!("PAYPLUS_SECRET_KEY is not configured");
    AppError::Config("Webhook secret not configured".to_string())
  })?;

  // 2. Caller IP
  let client_ip = extract_client_ip(|name| header(&req, name));
  if !config.webhook_allowlist.is_request_allowed(client_ip.as_deref()) {
    warn!(client_ip = client_ip.as_deref().unwrap_or("unknown"), "Webhook caller IP not in allowlist.");
    return Err(AppError::Forbidden("Forbidden".to_string()));
  }

  // 3. User agent
  if header(&req, "user-agent") != Some(PAYPLUS_USER_AGENT) {
    return Err(AppError::Validation("Invalid user-agent header".to_string()));
  }

  // 4. Hash header
  let hash = header(&req, "hash").ok_or_else(|| AppError::Validation("Missing hash header".to_string()))?;

  // 5. Signature
  if !verify_signature(&body, hash, secret.expose()) {
    warn!("Webhook signature verification failed");
    return Err(AppError::Validation("Invalid signature".to_string()));
  }

  // 6. Payload
  let payload: PayPlusWebhookPayload = serde_json::from_slice(&body).map_err(|e| {
    warn!("Failed to parse PayPlus webhook payload: {}", e);
    AppError::Validation(format!("Invalid JSON payload: {}", e))
  })?;

  // 7. Record + finalize
  handle_transaction(&app_state, &payload).await?;

  Ok(HttpResponse::Ok().json(json!({ "received": true })))
}

async fn handle_transaction(app_state: &AppState, payload: &PayPlusWebhookPayload) -> Result<()> {
  let Some(raw_order_id) = payload.more_info.as_deref() else {
    warn!(transaction_uid = %payload.transaction_uid, "Webhook received but no orderId in more_info");
    return Ok(());
  };
  let Ok(order_id) = Uuid::parse_str(raw_order_id.trim()) else {
    warn!(more_info = raw_order_id, "Webhook more_info is not an order id; ignoring.");
    return Ok(());
  };

  // Payments reference orders; a stray id cannot be recorded or retried into existence.
  if app_state.orders.get(order_id).await?.is_none() {
    warn!(%order_id, transaction_uid = %payload.transaction_uid, "Webhook for unknown order; acknowledging.");
    return Ok(());
  }

  if !app_state.payments.record(payload.payment_record(order_id)).await? {
    info!(%order_id, transaction_uid = %payload.transaction_uid, "Payment already recorded for this transaction.");
  }

  if payload.status_code != PAYPLUS_SUCCESS_CODE {
    info!(%order_id, status_code = %payload.status_code, "Payment failed; order left as is.");
    return Ok(());
  }

  match app_state.finalizer.finalize(order_id).await {
    Ok(outcome) => {
      info!(
        %order_id,
        order_number = outcome.order_number(),
        already_finalized = outcome.already_finalized(),
        "Order marked as paid from webhook."
      );
      Ok(())
    }
    // Acknowledge: a retry from PayPlus cannot fix these.
    Err(err @ (FinalizeError::NotFound { .. } | FinalizeError::InvalidState { .. })) => {
      warn!(%order_id, error = %err, "Webhook payment could not be applied to order.");
      Ok(())
    }
    // Surface as 500 so PayPlus retries.
    Err(err @ FinalizeError::Persistence { .. }) => Err(AppError::from(err)),
  }
}
