// core/src/finalize.rs

//! The `pending_payment` -> `paid` transition.
//!
//! Two independent call sites reach [`OrderFinalizer::finalize`]: the PayPlus
//! webhook and the browser redirect that follows an iframe breakout. Either may
//! arrive first, both may arrive, and they may race. The transition happens at
//! most once and notifications go out at most once per transition.

use crate::error::FinalizeError;
use crate::notify::NotificationDispatcher;
use crate::order::{Order, OrderStatus};
use crate::ports::{OrderStoreRef, PaymentStoreRef};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FinalizeOutcome {
  /// The order is `paid`. `already_finalized` is true when this call did not
  /// perform the transition itself.
  Finalized {
    order_id: Uuid,
    order_number: String,
    already_finalized: bool,
  },
  /// Payment verification is enabled and no succeeded payment has been
  /// recorded yet. Nothing was written; the caller should retry later.
  PendingPayment { order_id: Uuid, order_number: String },
}

impl FinalizeOutcome {
  pub fn order_id(&self) -> Uuid {
    match self {
      FinalizeOutcome::Finalized { order_id, .. } | FinalizeOutcome::PendingPayment { order_id, .. } => *order_id,
    }
  }

  pub fn order_number(&self) -> &str {
    match self {
      FinalizeOutcome::Finalized { order_number, .. } | FinalizeOutcome::PendingPayment { order_number, .. } => {
        order_number
      }
    }
  }

  pub fn already_finalized(&self) -> bool {
    matches!(self, FinalizeOutcome::Finalized { already_finalized: true, .. })
  }

  fn finalized(order: &Order, already_finalized: bool) -> Self {
    FinalizeOutcome::Finalized {
      order_id: order.id,
      order_number: order.order_number.clone(),
      already_finalized,
    }
  }
}

#[derive(Clone)]
pub struct OrderFinalizer {
  orders: OrderStoreRef,
  payments: Option<PaymentStoreRef>,
  dispatcher: NotificationDispatcher,
}

impl OrderFinalizer {
  pub fn new(orders: OrderStoreRef, dispatcher: NotificationDispatcher) -> Self {
    Self {
      orders,
      payments: None,
      dispatcher,
    }
  }

  /// Requires a succeeded payment record before an order may be marked paid.
  pub fn with_payment_verification(mut self, payments: PaymentStoreRef) -> Self {
    self.payments = Some(payments);
    self
  }

  pub fn verifies_payments(&self) -> bool {
    self.payments.is_some()
  }

  /// Marks `order_id` as paid, at most once.
  ///
  /// Checks, in order: the order exists; it is not already `paid` (idempotent
  /// success, no writes, no notifications); it is `pending_payment`; when
  /// payment verification is on, a succeeded payment exists. Then performs the
  /// single conditional write and dispatches the notification pair without
  /// awaiting it.
  #[instrument(name = "OrderFinalizer::finalize", skip(self, order_id), fields(order_id = %order_id), err(Display))]
  pub async fn finalize(&self, order_id: Uuid) -> Result<FinalizeOutcome, FinalizeError> {
    let order = self
      .orders
      .get(order_id)
      .await?
      .ok_or(FinalizeError::NotFound { order_id })?;

    match order.status {
      OrderStatus::Paid => {
        info!(order_number = %order.order_number, "Order already finalized; nothing to do.");
        return Ok(FinalizeOutcome::finalized(&order, true));
      }
      OrderStatus::PendingPayment => {}
      status => {
        warn!(%status, "Refusing to finalize order in unexpected status.");
        return Err(FinalizeError::InvalidState { order_id, status });
      }
    }

    if let Some(payments) = &self.payments {
      if !payments.has_succeeded(order_id).await? {
        info!(
          order_number = %order.order_number,
          "No succeeded payment recorded yet; leaving order pending."
        );
        return Ok(FinalizeOutcome::PendingPayment {
          order_id,
          order_number: order.order_number,
        });
      }
    }

    let paid_at = Utc::now();
    if !self.orders.mark_paid(order_id, paid_at).await? {
      // Lost the conditional update. Whoever won decides what we report.
      return self.resolve_lost_race(order_id).await;
    }

    info!(order_number = %order.order_number, "Order finalized.");

    let outcome = FinalizeOutcome::finalized(&order, false);
    let paid_order = Order {
      status: OrderStatus::Paid,
      paid_at: Some(paid_at),
      updated_at: paid_at,
      ..order
    };
    // Fire-and-forget.
    drop(self.dispatcher.dispatch_order_paid(paid_order));

    Ok(outcome)
  }

  async fn resolve_lost_race(&self, order_id: Uuid) -> Result<FinalizeOutcome, FinalizeError> {
    let current = self
      .orders
      .get(order_id)
      .await?
      .ok_or(FinalizeError::NotFound { order_id })?;

    match current.status {
      OrderStatus::Paid => {
        info!(
          order_number = %current.order_number,
          "Concurrent finalize won the race; reporting already finalized."
        );
        Ok(FinalizeOutcome::finalized(&current, true))
      }
      status => Err(FinalizeError::InvalidState { order_id, status }),
    }
  }
}
