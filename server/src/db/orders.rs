// server/src/db/orders.rs

use super::backend;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use footprint_core::{Order, OrderStore, StoreError, StoreResult};
use sqlx::{FromRow, PgPool};
use tracing::{error, instrument};
use uuid::Uuid;

const ORDER_COLUMNS: &str = "id, order_number, user_id, status, total, currency, paid_at, created_at, updated_at";

#[derive(Debug, FromRow)]
struct OrderRow {
  id: Uuid,
  order_number: String,
  user_id: Option<Uuid>,
  status: String,
  total: i64,
  currency: String,
  paid_at: Option<DateTime<Utc>>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
  type Error = StoreError;

  fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
    let status = row.status.parse().map_err(|e| StoreError::Corrupt {
      table: "orders",
      message: format!("order {}: {}", row.id, e),
    })?;
    Ok(Order {
      id: row.id,
      order_number: row.order_number,
      user_id: row.user_id,
      status,
      total: row.total,
      currency: row.currency,
      paid_at: row.paid_at,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

#[derive(Clone)]
pub struct PgOrderStore {
  pool: PgPool,
}

impl PgOrderStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl OrderStore for PgOrderStore {
  #[instrument(name = "PgOrderStore::get", skip(self))]
  async fn get(&self, order_id: Uuid) -> StoreResult<Option<Order>> {
    let row: Option<OrderRow> = sqlx::query_as(&format!("SELECT {} FROM orders WHERE id = $1", ORDER_COLUMNS))
      .bind(order_id)
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| {
        error!("Database error while fetching order {}: {}", order_id, e);
        backend(e)
      })?;
    row.map(Order::try_from).transpose()
  }

  #[instrument(name = "PgOrderStore::list_for_user", skip(self))]
  async fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Order>> {
    let rows: Vec<OrderRow> = sqlx::query_as(&format!(
      "SELECT {} FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
      ORDER_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(&self.pool)
    .await
    .map_err(backend)?;
    rows.into_iter().map(Order::try_from).collect()
  }

  #[instrument(name = "PgOrderStore::mark_paid", skip(self))]
  async fn mark_paid(&self, order_id: Uuid, paid_at: DateTime<Utc>) -> StoreResult<bool> {
    // Conditional update: only one concurrent caller can move the row out of pending.
    let result = sqlx::query(
      "UPDATE orders SET status = 'paid', paid_at = $2, updated_at = $2 \
       WHERE id = $1 AND status IN ('pending_payment', 'pending')",
    )
    .bind(order_id)
    .bind(paid_at)
    .execute(&self.pool)
    .await
    .map_err(|e| {
      error!("Database error while marking order {} paid: {}", order_id, e);
      backend(e)
    })?;
    Ok(result.rows_affected() == 1)
  }
}
