// core/src/history.rs

//! Order history for the account page: a filtered, newest-first page of
//! orders plus stats computed over the customer's full order set.

use crate::error::HistoryError;
use crate::order::{Order, OrderStatus};
use serde::Serialize;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Statuses shown under the "processing" tab.
const PROCESSING_GROUP: [OrderStatus; 4] = [
  OrderStatus::PendingPayment,
  OrderStatus::Paid,
  OrderStatus::Processing,
  OrderStatus::Printing,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
  #[default]
  All,
  /// Anything not yet handed to the carrier.
  Processing,
  Exact(OrderStatus),
}

impl StatusFilter {
  pub fn matches(&self, status: OrderStatus) -> bool {
    match self {
      StatusFilter::All => true,
      StatusFilter::Processing => PROCESSING_GROUP.contains(&status),
      StatusFilter::Exact(wanted) => *wanted == status,
    }
  }
}

impl FromStr for StatusFilter {
  type Err = HistoryError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim() {
      "" | "all" => Ok(StatusFilter::All),
      "processing" => Ok(StatusFilter::Processing),
      other => other
        .parse::<OrderStatus>()
        .map(StatusFilter::Exact)
        .map_err(|_| HistoryError::UnknownStatusFilter(other.to_string())),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
  pub status: StatusFilter,
  /// 1-indexed; clamped into range.
  pub page: usize,
  pub page_size: usize,
}

impl Default for HistoryQuery {
  fn default() -> Self {
    Self {
      status: StatusFilter::All,
      page: 1,
      page_size: DEFAULT_PAGE_SIZE,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistory {
  pub orders: Vec<Order>,
  pub total_orders: usize,
  pub total_spent: i64,
  pub in_transit_count: usize,
  pub total_pages: usize,
  pub current_page: usize,
  pub has_next_page: bool,
  pub has_prev_page: bool,
}

/// Builds the history view. Stats cover every order; the page covers only
/// orders passing the filter.
pub fn summarize(orders: Vec<Order>, query: &HistoryQuery) -> OrderHistory {
  let total_orders = orders.len();
  let total_spent = orders.iter().map(|order| order.total).sum();
  let in_transit_count = orders.iter().filter(|order| order.status.is_in_transit()).count();

  let mut filtered: Vec<Order> = orders
    .into_iter()
    .filter(|order| query.status.matches(order.status))
    .collect();
  filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

  let page_size = query.page_size.max(1);
  let total_pages = filtered.len().div_ceil(page_size);
  let current_page = query.page.max(1).min(total_pages.max(1));

  let page: Vec<Order> = filtered
    .into_iter()
    .skip((current_page - 1) * page_size)
    .take(page_size)
    .collect();

  OrderHistory {
    orders: page,
    total_orders,
    total_spent,
    in_transit_count,
    total_pages,
    current_page,
    has_next_page: current_page < total_pages,
    has_prev_page: current_page > 1,
  }
}
