// server/src/lib.rs

//! HTTP surface of the Footprint payments service: order finalization, the
//! PayPlus webhook and order history, over Postgres or in-memory stores.

pub mod config;
pub mod db;
pub mod errors;
pub mod services;
pub mod state;
pub mod web;

use crate::config::{AppConfig, NotificationMode};
use crate::errors::Result;
use crate::state::AppState;
use footprint_core::memory::{InMemoryOrderStore, InMemoryPaymentStore};
use footprint_core::ports::{OrderNotifierRef, OrderStoreRef, PaymentStoreRef};
use sqlx::PgPool;
use std::sync::Arc;

/// Picks adapters from the configuration and builds the shared state.
pub async fn build_state(config: Arc<AppConfig>) -> Result<AppState> {
  let (orders, payments): (OrderStoreRef, PaymentStoreRef) = match &config.database_url {
    Some(url) => {
      let pool = PgPool::connect(url.expose()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to connect to the database.");
        e
      })?;
      tracing::info!("Successfully connected to the database.");
      let orders: OrderStoreRef = Arc::new(db::PgOrderStore::new(pool.clone()));
      let payments: PaymentStoreRef = Arc::new(db::PgPaymentStore::new(pool));
      (orders, payments)
    }
    None => {
      tracing::warn!("DATABASE_URL is not set; using in-memory order and payment stores.");
      let orders: OrderStoreRef = Arc::new(InMemoryOrderStore::new());
      let payments: PaymentStoreRef = Arc::new(InMemoryPaymentStore::new());
      (orders, payments)
    }
  };

  let notifier: OrderNotifierRef = match config.notification_mode {
    NotificationMode::Http => Arc::new(services::HttpOrderNotifier::new(config.app_base_url.clone())?),
    NotificationMode::Log => Arc::new(services::LogOrderNotifier::default()),
  };

  Ok(AppState::new(config, orders, payments, notifier))
}
