// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use footprint_core::IpAllowlist;
use std::env;
use std::fmt;

/// A value that must never reach the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
  pub fn new(value: impl Into<String>) -> Self {
    Secret(value.into())
  }

  pub fn expose(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Secret {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[REDACTED]")
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

impl LogFormat {
  /// Read on its own so logging can be set up before the rest of the config.
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    match env::var("LOG_FORMAT").ok().as_deref().map(str::trim) {
      None | Some("") | Some("pretty") => Ok(LogFormat::Pretty),
      Some("json") => Ok(LogFormat::Json),
      Some(other) => Err(AppError::Config(format!(
        "Invalid LOG_FORMAT value '{}': expected 'pretty' or 'json'",
        other
      ))),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationMode {
  /// POST to the app's own `/confirm` and `/notify` endpoints.
  Http,
  /// Log instead of sending; for local runs.
  Log,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// Absent: orders and payments live in memory.
  pub database_url: Option<Secret>,
  pub app_base_url: String,
  /// Absent: the PayPlus webhook answers 500.
  pub payplus_secret_key: Option<Secret>,
  pub webhook_allowlist: IpAllowlist,
  /// Redirect-path finalize waits for the webhook's payment record.
  pub finalize_requires_payment: bool,
  pub notification_mode: NotificationMode,
  pub log_format: LogFormat,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      database_url: None,
      app_base_url: "http://127.0.0.1:8080".to_string(),
      payplus_secret_key: None,
      webhook_allowlist: IpAllowlist::open(),
      finalize_requires_payment: false,
      notification_mode: NotificationMode::Http,
      log_format: LogFormat::Pretty,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| env::var(var_name).ok().filter(|v| !v.trim().is_empty());

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL").map(Secret::new);
    let app_base_url = get_env("APP_BASE_URL").unwrap_or_else(|| format!("http://{}:{}", server_host, server_port));
    let payplus_secret_key = get_env("PAYPLUS_SECRET_KEY").map(Secret::new);
    let webhook_allowlist = IpAllowlist::parse(&get_env("PAYPLUS_WEBHOOK_IPS").unwrap_or_default());

    let finalize_requires_payment = get_env("FINALIZE_REQUIRE_PAYMENT")
      .unwrap_or_else(|| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid FINALIZE_REQUIRE_PAYMENT value: {}", e)))?;

    let notification_mode = match get_env("NOTIFICATIONS").as_deref() {
      None | Some("http") => NotificationMode::Http,
      Some("log") => NotificationMode::Log,
      Some(other) => {
        return Err(AppError::Config(format!(
          "Invalid NOTIFICATIONS value '{}': expected 'http' or 'log'",
          other
        )))
      }
    };

    let log_format = LogFormat::from_env()?;

    if webhook_allowlist.is_open() {
      tracing::warn!("PAYPLUS_WEBHOOK_IPS is empty; webhook accepts any caller IP.");
    }
    if payplus_secret_key.is_none() {
      tracing::warn!("PAYPLUS_SECRET_KEY is not configured; webhook requests will be refused.");
    }
    tracing::info!(allowlist = %webhook_allowlist, finalize_requires_payment, "Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      app_base_url,
      payplus_secret_key,
      webhook_allowlist,
      finalize_requires_payment,
      notification_mode,
      log_format,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
