// server/src/services/notify_log.rs
use async_trait::async_trait;
use footprint_core::{Order, OrderNotifier};
use tracing::info;

/// Local-run notifier: logs what would have been sent.
#[derive(Debug, Clone)]
pub struct LogOrderNotifier {
  pub owner_address: String,
}

impl Default for LogOrderNotifier {
  fn default() -> Self {
    Self {
      owner_address: "orders@footprint.local".to_string(),
    }
  }
}

#[async_trait]
impl OrderNotifier for LogOrderNotifier {
  async fn send_customer_confirmation(&self, order: &Order) -> anyhow::Result<()> {
    info!(
      order_id = %order.id,
      "Simulating customer confirmation: 'Your Footprint order #{} is confirmed' ({:.2} {})",
      order.order_number,
      order.total as f64 / 100.0,
      order.currency
    );
    Ok(())
  }

  async fn send_owner_new_order(&self, order: &Order) -> anyhow::Result<()> {
    info!(
      order_id = %order.id,
      to = %self.owner_address,
      "Simulating owner notification: 'New order #{}'",
      order.order_number
    );
    Ok(())
  }
}
