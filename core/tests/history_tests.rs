// tests/history_tests.rs
mod common;

use common::*;
use footprint_core::{summarize, HistoryError, HistoryQuery, OrderStatus, StatusFilter};
use uuid::Uuid;

#[test]
fn test_stats_cover_all_orders_and_list_is_newest_first() {
  setup_tracing();
  let user = Uuid::new_v4();
  let delivered = order_for_user(user, 100, OrderStatus::Delivered, 10);
  let shipped = order_for_user(user, 50, OrderStatus::Shipped, 2);

  let history = summarize(vec![delivered.clone(), shipped.clone()], &HistoryQuery::default());

  assert_eq!(history.total_orders, 2);
  assert_eq!(history.total_spent, 150);
  assert_eq!(history.in_transit_count, 1);
  assert_eq!(history.orders, vec![shipped, delivered]);
  assert_eq!(history.total_pages, 1);
  assert_eq!(history.current_page, 1);
  assert!(!history.has_next_page);
  assert!(!history.has_prev_page);
}

#[test]
fn test_filter_does_not_change_stats() {
  setup_tracing();
  let user = Uuid::new_v4();
  let orders = vec![
    order_for_user(user, 100, OrderStatus::Delivered, 10),
    order_for_user(user, 50, OrderStatus::Shipped, 2),
    order_for_user(user, 70, OrderStatus::Printing, 1),
  ];

  let query = HistoryQuery {
    status: "delivered".parse().unwrap(),
    ..HistoryQuery::default()
  };
  let history = summarize(orders, &query);

  assert_eq!(history.orders.len(), 1);
  assert_eq!(history.orders[0].status, OrderStatus::Delivered);
  assert_eq!(history.total_orders, 3);
  assert_eq!(history.total_spent, 220);
  assert_eq!(history.in_transit_count, 2);
}

#[test]
fn test_processing_group_includes_unshipped_statuses() {
  setup_tracing();
  let user = Uuid::new_v4();
  let orders = vec![
    order_for_user(user, 1, OrderStatus::PendingPayment, 5),
    order_for_user(user, 1, OrderStatus::Paid, 4),
    order_for_user(user, 1, OrderStatus::Processing, 3),
    order_for_user(user, 1, OrderStatus::Printing, 2),
    order_for_user(user, 1, OrderStatus::Shipped, 1),
    order_for_user(user, 1, OrderStatus::Cancelled, 0),
  ];

  let query = HistoryQuery {
    status: StatusFilter::Processing,
    ..HistoryQuery::default()
  };
  let history = summarize(orders, &query);

  let statuses: Vec<OrderStatus> = history.orders.iter().map(|o| o.status).collect();
  assert_eq!(
    statuses,
    vec![
      OrderStatus::Printing,
      OrderStatus::Processing,
      OrderStatus::Paid,
      OrderStatus::PendingPayment,
    ]
  );
}

#[test]
fn test_pagination_clamps_page() {
  setup_tracing();
  let user = Uuid::new_v4();
  let orders: Vec<_> = (0..25)
    .map(|age| order_for_user(user, 10, OrderStatus::Delivered, age))
    .collect();

  let page_two = summarize(
    orders.clone(),
    &HistoryQuery {
      page: 2,
      ..HistoryQuery::default()
    },
  );
  assert_eq!(page_two.orders.len(), 10);
  assert_eq!(page_two.total_pages, 3);
  assert!(page_two.has_next_page);
  assert!(page_two.has_prev_page);

  let past_end = summarize(
    orders.clone(),
    &HistoryQuery {
      page: 99,
      ..HistoryQuery::default()
    },
  );
  assert_eq!(past_end.current_page, 3);
  assert_eq!(past_end.orders.len(), 5);
  assert!(!past_end.has_next_page);

  let page_zero = summarize(
    orders,
    &HistoryQuery {
      page: 0,
      ..HistoryQuery::default()
    },
  );
  assert_eq!(page_zero.current_page, 1);
}

#[test]
fn test_empty_history() {
  setup_tracing();
  let history = summarize(Vec::new(), &HistoryQuery::default());
  assert!(history.orders.is_empty());
  assert_eq!(history.total_orders, 0);
  assert_eq!(history.total_spent, 0);
  assert_eq!(history.total_pages, 0);
  assert_eq!(history.current_page, 1);
  assert!(!history.has_next_page);
  assert!(!history.has_prev_page);
}

#[test]
fn test_status_filter_parsing() {
  setup_tracing();
  assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
  assert_eq!("processing".parse::<StatusFilter>().unwrap(), StatusFilter::Processing);
  assert_eq!(
    "shipped".parse::<StatusFilter>().unwrap(),
    StatusFilter::Exact(OrderStatus::Shipped)
  );
  assert_eq!(
    "teleported".parse::<StatusFilter>().unwrap_err(),
    HistoryError::UnknownStatusFilter("teleported".to_string())
  );
}
