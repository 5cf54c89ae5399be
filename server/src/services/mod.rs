// server/src/services/mod.rs

pub mod notify_http;
pub mod notify_log;

pub use notify_http::HttpOrderNotifier;
pub use notify_log::LogOrderNotifier;
