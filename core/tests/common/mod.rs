// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every fixture.

use chrono::{Duration, Utc};
use footprint_core::memory::{InMemoryOrderStore, InMemoryPaymentStore, RecordingNotifier};
use footprint_core::{NotificationDispatcher, Order, OrderFinalizer, OrderStatus};
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Fixtures ---

pub struct Harness {
  pub orders: Arc<InMemoryOrderStore>,
  pub payments: Arc<InMemoryPaymentStore>,
  pub notifier: Arc<RecordingNotifier>,
  pub finalizer: OrderFinalizer,
}

impl Harness {
  pub fn new() -> Self {
    Self::with_notifier(RecordingNotifier::new())
  }

  pub fn with_notifier(notifier: RecordingNotifier) -> Self {
    let orders = Arc::new(InMemoryOrderStore::new());
    let payments = Arc::new(InMemoryPaymentStore::new());
    let notifier = Arc::new(notifier);
    let finalizer = OrderFinalizer::new(orders.clone(), NotificationDispatcher::new(notifier.clone()));
    Self {
      orders,
      payments,
      notifier,
      finalizer,
    }
  }

  /// Same stores, but the finalizer requires a succeeded payment record.
  pub fn verifying_payments(self) -> Self {
    let finalizer = self.finalizer.clone().with_payment_verification(self.payments.clone());
    Self { finalizer, ..self }
  }

  pub fn add_order(&self, status: OrderStatus) -> Order {
    let mut order = Order::pending(format!("FP-{}", &Uuid::new_v4().to_string()[..8]), None, 12_900);
    order.status = status;
    self.orders.insert(order.clone());
    order
  }
}

pub fn order_for_user(user_id: Uuid, total: i64, status: OrderStatus, age_days: i64) -> Order {
  let mut order = Order::pending(format!("FP-{}", &Uuid::new_v4().to_string()[..8]), Some(user_id), total);
  order.status = status;
  order.created_at = Utc::now() - Duration::days(age_days);
  order.updated_at = order.created_at;
  order
}

/// Polls until `check` passes; notification dispatch runs on a spawned task.
pub async fn wait_until<F: Fn() -> bool>(check: F) -> bool {
  for _ in 0..200 {
    if check() {
      return true;
    }
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
  }
  check()
}
