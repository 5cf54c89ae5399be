// server/src/services/notify_http.rs

use anyhow::{bail, Context};
use async_trait::async_trait;
use footprint_core::{Order, OrderNotifier};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

/// Triggers the app's own email endpoints: `POST {base}/api/orders/{id}/confirm`
/// for the customer and `POST {base}/api/orders/{id}/notify` for the owner.
#[derive(Clone)]
pub struct HttpOrderNotifier {
  client: reqwest::Client,
  base_url: String,
}

impl HttpOrderNotifier {
  pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(10))
      .build()
      .context("building notification HTTP client")?;
    Ok(Self {
      client,
      base_url: base_url.into().trim_end_matches('/').to_string(),
    })
  }

  fn endpoint(&self, order_id: Uuid, action: &str) -> String {
    format!("{}/api/orders/{}/{}", self.base_url, order_id, action)
  }

  async fn trigger(&self, order_id: Uuid, action: &str) -> anyhow::Result<()> {
    let url = self.endpoint(order_id, action);
    let response = self
      .client
      .post(&url)
      .json(&serde_json::json!({}))
      .send()
      .await
      .with_context(|| format!("POST {}", url))?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      bail!("POST {} returned {}: {}", url, status, body);
    }
    info!(%url, "Notification endpoint accepted the request.");
    Ok(())
  }
}

#[async_trait]
impl OrderNotifier for HttpOrderNotifier {
  #[instrument(name = "notify_http::confirm", skip(self, order), fields(order_id = %order.id))]
  async fn send_customer_confirmation(&self, order: &Order) -> anyhow::Result<()> {
    self.trigger(order.id, "confirm").await
  }

  #[instrument(name = "notify_http::notify", skip(self, order), fields(order_id = %order.id))]
  async fn send_owner_new_order(&self, order: &Order) -> anyhow::Result<()> {
    self.trigger(order.id, "notify").await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn endpoints_strip_trailing_slash() {
    let notifier = HttpOrderNotifier::new("https://footprint.example/").unwrap();
    let id = Uuid::nil();
    assert_eq!(
      notifier.endpoint(id, "confirm"),
      "https://footprint.example/api/orders/00000000-0000-0000-0000-000000000000/confirm"
    );
  }
}
