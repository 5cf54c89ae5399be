// server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use footprint_core::{FinalizeError, HistoryError, StoreError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Forbidden: {0}")]
  Forbidden(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Invalid State: {0}")]
  InvalidState(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Persistence Error: {0}")]
  Persistence(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<FinalizeError> for AppError {
  fn from(err: FinalizeError) -> Self {
    match err {
      FinalizeError::NotFound { .. } => AppError::NotFound("Order not found".to_string()),
      FinalizeError::InvalidState { .. } => AppError::InvalidState(err.to_string()),
      FinalizeError::Persistence { source } => {
        tracing::error!(error = %source, "Failed to finalize order");
        AppError::Persistence("Failed to update order status".to_string())
      }
    }
  }
}

impl From<StoreError> for AppError {
  fn from(err: StoreError) -> Self {
    tracing::error!(error = %err, "Storage operation failed");
    AppError::Persistence("Database operation failed".to_string())
  }
}

impl From<HistoryError> for AppError {
  fn from(err: HistoryError) -> Self {
    AppError::Validation(err.to_string())
  }
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    if err.is::<sqlx::Error>() {
      if let Ok(sqlx_err) = err.downcast::<sqlx::Error>() {
        return AppError::Sqlx(sqlx_err);
      }
      return AppError::Internal("Database operation failed".to_string());
    }
    AppError::Internal(err.to_string())
  }
}

impl AppError {
  /// The message placed in the `{ "error": ... }` body.
  fn public_message(&self) -> String {
    match self {
      AppError::Validation(m)
      | AppError::Forbidden(m)
      | AppError::NotFound(m)
      | AppError::InvalidState(m)
      | AppError::Persistence(m) => m.clone(),
      AppError::Config(_) => "Server configuration issue".to_string(),
      AppError::Sqlx(_) => "Database operation failed".to_string(),
      AppError::Internal(_) => "An internal error occurred".to_string(),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) | AppError::InvalidState(_) => StatusCode::BAD_REQUEST,
      AppError::Forbidden(_) => StatusCode::FORBIDDEN,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_) | AppError::Persistence(_) | AppError::Sqlx(_) | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Responding with error");
    }
    HttpResponse::build(status).json(json!({ "error": self.public_message() }))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
