// server/src/db/payments.rs

use super::backend;
use async_trait::async_trait;
use footprint_core::{PaymentRecord, PaymentStore, StoreResult};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

#[derive(Clone)]
pub struct PgPaymentStore {
  pool: PgPool,
}

impl PgPaymentStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl PaymentStore for PgPaymentStore {
  #[instrument(name = "PgPaymentStore::record", skip(self, payment), fields(order_id = %payment.order_id, status = %payment.status))]
  async fn record(&self, payment: PaymentRecord) -> StoreResult<bool> {
    let result = sqlx::query(
      "INSERT INTO payments \
       (id, order_id, transaction_uid, page_request_uid, amount, status, failure_reason, created_at) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
       ON CONFLICT (transaction_uid) DO NOTHING",
    )
    .bind(payment.id)
    .bind(payment.order_id)
    .bind(&payment.transaction_uid)
    .bind(&payment.page_request_uid)
    .bind(payment.amount)
    .bind(payment.status.as_str())
    .bind(&payment.failure_reason)
    .bind(payment.created_at)
    .execute(&self.pool)
    .await
    .map_err(backend)?;
    Ok(result.rows_affected() == 1)
  }

  #[instrument(name = "PgPaymentStore::has_succeeded", skip(self))]
  async fn has_succeeded(&self, order_id: Uuid) -> StoreResult<bool> {
    sqlx::query_scalar::<_, bool>(
      "SELECT EXISTS (SELECT 1 FROM payments WHERE order_id = $1 AND status = 'succeeded')",
    )
    .bind(order_id)
    .fetch_one(&self.pool)
    .await
    .map_err(backend)
  }
}
