// src/lib.rs

//! Footprint core: the payment side of an order's life.
//!
//! This crate owns the pieces of the store that have a real contract:
//!  - Finalizing an order (`pending_payment` -> `paid`) exactly once, whether the
//!    request comes from the PayPlus webhook or from the browser redirect.
//!  - Dispatching the customer/owner notifications for a finalized order without
//!    blocking the caller.
//!  - Deciding whether a webhook caller's IP is on the PayPlus allowlist.
//!  - Verifying PayPlus webhook signatures.
//!  - Summarizing a customer's order history.
//!
//! Storage and side effects are reached through the traits in [`ports`]; the
//! HTTP server supplies Postgres and HTTP adapters, while [`memory`] provides
//! in-process ones.

pub mod allowlist;
pub mod error;
pub mod finalize;
pub mod history;
pub mod memory;
pub mod notify;
pub mod order;
pub mod ports;
pub mod signature;

// --- Re-exports for the Public API ---

pub use crate::allowlist::{extract_client_ip, AllowlistEntry, IpAllowlist};
pub use crate::error::{FinalizeError, HistoryError, StoreError, StoreResult};
pub use crate::finalize::{FinalizeOutcome, OrderFinalizer};
pub use crate::history::{summarize, HistoryQuery, OrderHistory, StatusFilter};
pub use crate::notify::NotificationDispatcher;
pub use crate::order::{Order, OrderStatus, PaymentRecord, PaymentStatus};
pub use crate::ports::{OrderNotifier, OrderStore, PaymentStore};
