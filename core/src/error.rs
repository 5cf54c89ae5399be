// core/src/error.rs
use crate::order::OrderStatus;
use anyhow::Error as AnyhowError;
use thiserror::Error;
use uuid::Uuid;

/// Failure reported by an `OrderStore` or `PaymentStore` adapter.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Storage backend error: {source}")]
  Backend {
    #[source]
    source: AnyhowError,
  },

  #[error("Corrupt record in '{table}': {message}")]
  Corrupt { table: &'static str, message: String },
}

impl From<AnyhowError> for StoreError {
  fn from(err: AnyhowError) -> Self {
    StoreError::Backend { source: err }
  }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum FinalizeError {
  #[error("Order not found: {order_id}")]
  NotFound { order_id: Uuid },

  #[error("Cannot finalize order with status: {status}")]
  InvalidState { order_id: Uuid, status: OrderStatus },

  #[error("Failed to update order status: {source}")]
  Persistence {
    #[from]
    source: StoreError,
  },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
  #[error("Unknown order status filter: '{0}'")]
  UnknownStatusFilter(String),
}
