use chrono::{Duration, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use footprint_core::memory::{InMemoryOrderStore, RecordingNotifier};
use footprint_core::{summarize, HistoryQuery, IpAllowlist, NotificationDispatcher, Order, OrderFinalizer, OrderStatus};
use std::hint::black_box;
use std::sync::Arc;
use tokio::runtime::Runtime; // To run async code within Criterion

// --- Helpers ---

fn allowlist_with(entries: usize) -> IpAllowlist {
  let list: Vec<String> = (0..entries)
    .map(|i| {
      if i % 2 == 0 {
        format!("10.{}.0.0/16", i % 256)
      } else {
        format!("203.0.113.{}", i % 256)
      }
    })
    .collect();
  IpAllowlist::parse(&list.join(","))
}

fn orders_for_history(count: usize) -> Vec<Order> {
  let user = uuid::Uuid::new_v4();
  (0..count)
    .map(|i| {
      let mut order = Order::pending(format!("FP-{}", i), Some(user), (i as i64 % 500) * 100);
      order.status = OrderStatus::ALL[i % OrderStatus::ALL.len()];
      order.created_at = Utc::now() - Duration::minutes(i as i64 * 7 % 10_000);
      order
    })
    .collect()
}

// --- Benchmark Functions ---

fn bench_allowlist(c: &mut Criterion) {
  let mut group = c.benchmark_group("allowlist_match");
  for entries in [1usize, 16, 128].iter() {
    let allowlist = allowlist_with(*entries);
    group.throughput(Throughput::Elements(1));
    group.bench_with_input(BenchmarkId::new("miss", entries), entries, |b, _| {
      b.iter(|| black_box(allowlist.is_allowed(black_box("198.51.100.7"))))
    });
    group.bench_with_input(BenchmarkId::new("parse", entries), entries, |b, &n| {
      b.iter(|| black_box(allowlist_with(n)))
    });
  }
  group.finish();
}

fn bench_history(c: &mut Criterion) {
  let mut group = c.benchmark_group("order_history");
  for count in [10usize, 100, 1_000].iter() {
    let orders = orders_for_history(*count);
    let query = HistoryQuery {
      status: "processing".parse().unwrap(),
      ..HistoryQuery::default()
    };
    group.throughput(Throughput::Elements(*count as u64));
    group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
      b.iter(|| black_box(summarize(orders.clone(), &query)))
    });
  }
  group.finish();
}

fn bench_finalize_already_paid(c: &mut Criterion) {
  let rt = Runtime::new().unwrap();
  let mut paid = Order::pending("FP-paid", None, 100);
  paid.status = OrderStatus::Paid;
  let order_id = paid.id;
  let store = Arc::new(InMemoryOrderStore::with_orders([paid]));
  let finalizer = OrderFinalizer::new(store, NotificationDispatcher::new(Arc::new(RecordingNotifier::new())));

  c.bench_function("finalize_idempotent_hit", |b| {
    b.to_async(&rt).iter(|| async { black_box(finalizer.finalize(order_id).await.unwrap()) })
  });
}

criterion_group!(benches, bench_allowlist, bench_history, bench_finalize_already_paid);
criterion_main!(benches);
