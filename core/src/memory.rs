// core/src/memory.rs

//! In-process adapters for the ports: used by tests and by the server when no
//! database is configured.

use crate::error::{StoreError, StoreResult};
use crate::order::{Order, OrderStatus, PaymentRecord, PaymentStatus};
use crate::ports::{OrderNotifier, OrderStore, PaymentStore};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
  orders: RwLock<HashMap<Uuid, Order>>,
  paid_transitions: AtomicUsize,
  fail_writes: AtomicBool,
}

impl InMemoryOrderStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_orders(orders: impl IntoIterator<Item = Order>) -> Self {
    let store = Self::new();
    for order in orders {
      store.insert(order);
    }
    store
  }

  pub fn insert(&self, order: Order) {
    self.orders.write().insert(order.id, order);
  }

  /// Overwrites the status of an existing order, as fulfillment would.
  pub fn set_status(&self, order_id: Uuid, status: OrderStatus) -> bool {
    match self.orders.write().get_mut(&order_id) {
      Some(order) => {
        order.status = status;
        order.updated_at = Utc::now();
        true
      }
      None => false,
    }
  }

  pub fn snapshot(&self, order_id: Uuid) -> Option<Order> {
    self.orders.read().get(&order_id).cloned()
  }

  /// Number of successful `pending_payment` -> `paid` writes so far.
  pub fn paid_transitions(&self) -> usize {
    self.paid_transitions.load(Ordering::SeqCst)
  }

  /// Makes subsequent `mark_paid` calls fail with a backend error.
  pub fn set_fail_writes(&self, fail: bool) {
    self.fail_writes.store(fail, Ordering::SeqCst);
  }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
  async fn get(&self, order_id: Uuid) -> StoreResult<Option<Order>> {
    Ok(self.orders.read().get(&order_id).cloned())
  }

  async fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Order>> {
    Ok(
      self
        .orders
        .read()
        .values()
        .filter(|order| order.user_id == Some(user_id))
        .cloned()
        .collect(),
    )
  }

  async fn mark_paid(&self, order_id: Uuid, paid_at: DateTime<Utc>) -> StoreResult<bool> {
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(StoreError::from(anyhow!("simulated write failure for order {}", order_id)));
    }
    let mut orders = self.orders.write();
    match orders.get_mut(&order_id) {
      Some(order) if order.status == OrderStatus::PendingPayment => {
        order.status = OrderStatus::Paid;
        order.paid_at = Some(paid_at);
        order.updated_at = paid_at;
        self.paid_transitions.fetch_add(1, Ordering::SeqCst);
        Ok(true)
      }
      _ => Ok(false),
    }
  }
}

#[derive(Debug, Default)]
pub struct InMemoryPaymentStore {
  payments: RwLock<Vec<PaymentRecord>>,
}

impl InMemoryPaymentStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn for_order(&self, order_id: Uuid) -> Vec<PaymentRecord> {
    self
      .payments
      .read()
      .iter()
      .filter(|payment| payment.order_id == order_id)
      .cloned()
      .collect()
  }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
  async fn record(&self, payment: PaymentRecord) -> StoreResult<bool> {
    let mut payments = self.payments.write();
    if payments
      .iter()
      .any(|existing| existing.transaction_uid == payment.transaction_uid)
    {
      return Ok(false);
    }
    payments.push(payment);
    Ok(true)
  }

  async fn has_succeeded(&self, order_id: Uuid) -> StoreResult<bool> {
    Ok(
      self
        .payments
        .read()
        .iter()
        .any(|payment| payment.order_id == order_id && payment.status == PaymentStatus::Succeeded),
    )
  }
}

/// Which notification a [`RecordingNotifier`] received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
  CustomerConfirmation,
  OwnerNewOrder,
}

/// Notifier that remembers what it was asked to send. Can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
  sent: Mutex<Vec<(NotificationKind, Uuid)>>,
  fail: AtomicBool,
}

impl RecordingNotifier {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn failing() -> Self {
    let notifier = Self::new();
    notifier.fail.store(true, Ordering::SeqCst);
    notifier
  }

  pub fn sent(&self) -> Vec<(NotificationKind, Uuid)> {
    self.sent.lock().clone()
  }

  pub fn count(&self) -> usize {
    self.sent.lock().len()
  }

  fn push(&self, kind: NotificationKind, order: &Order) -> anyhow::Result<()> {
    self.sent.lock().push((kind, order.id));
    if self.fail.load(Ordering::SeqCst) {
      return Err(anyhow!("simulated notification failure"));
    }
    Ok(())
  }
}

#[async_trait]
impl OrderNotifier for RecordingNotifier {
  async fn send_customer_confirmation(&self, order: &Order) -> anyhow::Result<()> {
    self.push(NotificationKind::CustomerConfirmation, order)
  }

  async fn send_owner_new_order(&self, order: &Order) -> anyhow::Result<()> {
    self.push(NotificationKind::OwnerNewOrder, order)
  }
}
