// server/src/web/handlers/mod.rs

pub mod history_handlers;
pub mod order_handlers;
pub mod webhook_handlers;
