// server/src/db/mod.rs

//! Postgres adapters for the core ports, using runtime sqlx queries.

pub mod orders;
pub mod payments;

pub use orders::PgOrderStore;
pub use payments::PgPaymentStore;

use footprint_core::StoreError;

pub(crate) fn backend(err: sqlx::Error) -> StoreError {
  StoreError::Backend {
    source: anyhow::Error::new(err),
  }
}
