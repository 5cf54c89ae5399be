// core/src/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Order status as stored in the `orders.status` column.
///
/// Only `PendingPayment` and `Paid` are owned by the finalizer; the fulfillment
/// statuses are written elsewhere and only read here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
  #[serde(alias = "pending")]
  PendingPayment,
  Paid,
  Processing,
  Printing,
  Shipped,
  Delivered,
  Cancelled,
  Refunded,
}

impl OrderStatus {
  pub const ALL: [OrderStatus; 8] = [
    OrderStatus::PendingPayment,
    OrderStatus::Paid,
    OrderStatus::Processing,
    OrderStatus::Printing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
    OrderStatus::Refunded,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::PendingPayment => "pending_payment",
      OrderStatus::Paid => "paid",
      OrderStatus::Processing => "processing",
      OrderStatus::Printing => "printing",
      OrderStatus::Shipped => "shipped",
      OrderStatus::Delivered => "delivered",
      OrderStatus::Cancelled => "cancelled",
      OrderStatus::Refunded => "refunded",
    }
  }

  /// Statuses counted as "on the way" in the order history stats.
  pub fn is_in_transit(&self) -> bool {
    matches!(
      self,
      OrderStatus::Processing | OrderStatus::Printing | OrderStatus::Shipped
    )
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown order status: '{0}'")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
  type Err = UnknownOrderStatus;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    if trimmed == "pending" {
      return Ok(OrderStatus::PendingPayment);
    }
    OrderStatus::ALL
      .iter()
      .copied()
      .find(|status| status.as_str() == trimmed)
      .ok_or_else(|| UnknownOrderStatus(s.to_string()))
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: Uuid,
  pub order_number: String,
  pub user_id: Option<Uuid>,
  pub status: OrderStatus,
  /// Minor currency units (agorot).
  pub total: i64,
  pub currency: String,
  pub paid_at: Option<DateTime<Utc>>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Order {
  /// A fresh order waiting for payment, as the checkout flow creates it.
  pub fn pending(order_number: impl Into<String>, user_id: Option<Uuid>, total: i64) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      order_number: order_number.into(),
      user_id,
      status: OrderStatus::PendingPayment,
      total,
      currency: "ILS".to_string(),
      paid_at: None,
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
  Succeeded,
  Failed,
}

impl PaymentStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      PaymentStatus::Succeeded => "succeeded",
      PaymentStatus::Failed => "failed",
    }
  }
}

impl fmt::Display for PaymentStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for PaymentStatus {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim() {
      "succeeded" => Ok(PaymentStatus::Succeeded),
      "failed" => Ok(PaymentStatus::Failed),
      other => Err(format!("Unknown payment status: '{}'", other)),
    }
  }
}

/// A payment attempt reported by the PayPlus webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
  pub id: Uuid,
  pub order_id: Uuid,
  pub transaction_uid: String,
  pub page_request_uid: Option<String>,
  pub amount: Option<i64>,
  pub status: PaymentStatus,
  pub failure_reason: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl PaymentRecord {
  pub fn succeeded(order_id: Uuid, transaction_uid: impl Into<String>) -> Self {
    Self {
      id: Uuid::new_v4(),
      order_id,
      transaction_uid: transaction_uid.into(),
      page_request_uid: None,
      amount: None,
      status: PaymentStatus::Succeeded,
      failure_reason: None,
      created_at: Utc::now(),
    }
  }

  pub fn failed(order_id: Uuid, transaction_uid: impl Into<String>, reason: impl Into<String>) -> Self {
    Self {
      status: PaymentStatus::Failed,
      failure_reason: Some(reason.into()),
      ..Self::succeeded(order_id, transaction_uid)
    }
  }
}
