// core/src/notify.rs

use crate::order::Order;
use crate::ports::OrderNotifierRef;
use tokio::task::JoinHandle;
use tracing::{info, warn, Instrument};

/// Best-effort, non-blocking delivery of the "order paid" notifications.
///
/// Callers enqueue and move on: the send is never awaited on the request path,
/// failures are logged and dropped, and nothing is retried.
#[derive(Clone)]
pub struct NotificationDispatcher {
  notifier: OrderNotifierRef,
}

impl NotificationDispatcher {
  pub fn new(notifier: OrderNotifierRef) -> Self {
    Self { notifier }
  }

  /// Spawns the customer confirmation and owner notification for `order`,
  /// sent concurrently.
  ///
  /// Must be called from within a tokio runtime. The returned handle may be
  /// dropped; the task keeps running.
  pub fn dispatch_order_paid(&self, order: Order) -> JoinHandle<()> {
    let notifier = self.notifier.clone();
    let span = tracing::info_span!(
      "notify::order_paid",
      order_id = %order.id,
      order_number = %order.order_number
    );

    tokio::spawn(
      async move {
        let customer = async {
          match notifier.send_customer_confirmation(&order).await {
            Ok(()) => info!("Customer confirmation sent."),
            Err(e) => warn!(error = %e, "Failed to send customer confirmation."),
          }
        };
        let owner = async {
          match notifier.send_owner_new_order(&order).await {
            Ok(()) => info!("Owner new-order notification sent."),
            Err(e) => warn!(error = %e, "Failed to send owner new-order notification."),
          }
        };
        // Independent sends: a slow customer mail must not hold up the owner.
        tokio::join!(customer, owner);
      }
      .instrument(span),
    )
  }
}
