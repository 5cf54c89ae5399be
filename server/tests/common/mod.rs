// tests/common/mod.rs
#![allow(dead_code)]

use footprint_core::memory::{InMemoryOrderStore, InMemoryPaymentStore, RecordingNotifier};
use footprint_core::{IpAllowlist, Order, OrderStatus};
use footprint_server::config::{AppConfig, Secret};
use footprint_server::state::AppState;
use once_cell::sync::Lazy;
use std::sync::Arc;
use uuid::Uuid;

pub const WEBHOOK_SECRET: &str = "test-payplus-secret";

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub struct TestApp {
  pub state: AppState,
  pub orders: Arc<InMemoryOrderStore>,
  pub payments: Arc<InMemoryPaymentStore>,
  pub notifier: Arc<RecordingNotifier>,
}

pub fn test_config() -> AppConfig {
  AppConfig {
    payplus_secret_key: Some(Secret::new(WEBHOOK_SECRET)),
    ..AppConfig::default()
  }
}

impl TestApp {
  pub fn new(config: AppConfig) -> Self {
    setup_tracing();
    let orders = Arc::new(InMemoryOrderStore::new());
    let payments = Arc::new(InMemoryPaymentStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let state = AppState::new(Arc::new(config), orders.clone(), payments.clone(), notifier.clone());
    Self {
      state,
      orders,
      payments,
      notifier,
    }
  }

  pub fn with_allowlist(list: &str) -> Self {
    Self::new(AppConfig {
      webhook_allowlist: IpAllowlist::parse(list),
      ..test_config()
    })
  }

  pub fn add_order(&self, status: OrderStatus) -> Order {
    self.add_user_order(None, 4_990, status)
  }

  pub fn add_user_order(&self, user_id: Option<Uuid>, total: i64, status: OrderStatus) -> Order {
    let mut order = Order::pending(format!("FP-{}", &Uuid::new_v4().to_string()[..6]), user_id, total);
    order.status = status;
    self.orders.insert(order.clone());
    order
  }
}

/// Polls until `check` passes; notifications are sent from a spawned task.
pub async fn wait_until<F: Fn() -> bool>(check: F) -> bool {
  for _ in 0..200 {
    if check() {
      return true;
    }
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
  }
  check()
}
