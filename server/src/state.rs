// server/src/state.rs
use crate::config::AppConfig;
use footprint_core::ports::{OrderNotifierRef, OrderStoreRef, PaymentStoreRef};
use footprint_core::{NotificationDispatcher, OrderFinalizer};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub orders: OrderStoreRef,
  pub payments: PaymentStoreRef,
  pub finalizer: Arc<OrderFinalizer>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  /// Wires the finalizer from the injected adapters.
  pub fn new(
    config: Arc<AppConfig>,
    orders: OrderStoreRef,
    payments: PaymentStoreRef,
    notifier: OrderNotifierRef,
  ) -> Self {
    let mut finalizer = OrderFinalizer::new(orders.clone(), NotificationDispatcher::new(notifier));
    if config.finalize_requires_payment {
      finalizer = finalizer.with_payment_verification(payments.clone());
    }
    Self {
      orders,
      payments,
      finalizer: Arc::new(finalizer),
      config,
    }
  }
}
