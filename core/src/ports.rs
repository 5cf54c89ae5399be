// core/src/ports.rs

//! Storage and side-effect seams. Handlers and the finalizer only ever see
//! these traits; adapters are chosen once at startup and injected.

use crate::error::StoreResult;
use crate::order::{Order, PaymentRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

#[async_trait]
pub trait OrderStore: Send + Sync {
  async fn get(&self, order_id: Uuid) -> StoreResult<Option<Order>>;

  async fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Order>>;

  /// Moves the order to `paid` only if it is still `pending_payment`.
  ///
  /// Returns `true` if this call performed the transition, `false` if the row
  /// was no longer pending (another caller finalized it first).
  async fn mark_paid(&self, order_id: Uuid, paid_at: DateTime<Utc>) -> StoreResult<bool>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
  /// Stores `payment` unless one with the same `transaction_uid` exists.
  ///
  /// Returns `false` for a duplicate; provider retries land here.
  async fn record(&self, payment: PaymentRecord) -> StoreResult<bool>;

  async fn has_succeeded(&self, order_id: Uuid) -> StoreResult<bool>;
}

/// Outbound notifications for a freshly paid order.
#[async_trait]
pub trait OrderNotifier: Send + Sync {
  async fn send_customer_confirmation(&self, order: &Order) -> anyhow::Result<()>;

  async fn send_owner_new_order(&self, order: &Order) -> anyhow::Result<()>;
}

pub type OrderStoreRef = Arc<dyn OrderStore>;
pub type PaymentStoreRef = Arc<dyn PaymentStore>;
pub type OrderNotifierRef = Arc<dyn OrderNotifier>;
