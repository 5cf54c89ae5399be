// core/src/allowlist.rs

//! PayPlus webhook IP allowlist.
//!
//! Configured from a comma-separated list of literal IPv4 addresses and CIDR
//! blocks. An empty list allows every caller (local/dev mode).

use std::fmt;
use std::net::Ipv4Addr;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CidrBlock {
  network: u32,
  mask: u32,
}

impl CidrBlock {
  /// Parses `address/prefix`. Returns `None` for a malformed address or a
  /// prefix outside 0..=32.
  pub fn parse(raw: &str) -> Option<Self> {
    let (network, prefix) = raw.trim().split_once('/')?;
    let prefix: u32 = prefix.trim().parse().ok()?;
    if prefix > 32 {
      return None;
    }
    Some(Self {
      network: ipv4_to_u32(network)?,
      mask: prefix_mask(prefix),
    })
  }

  pub fn contains(&self, ip: &str) -> bool {
    match ipv4_to_u32(ip) {
      Some(candidate) => candidate & self.mask == self.network & self.mask,
      None => false,
    }
  }
}

fn ipv4_to_u32(ip: &str) -> Option<u32> {
  ip.trim().parse::<Ipv4Addr>().ok().map(u32::from)
}

/// `prefix` leading one-bits. `/0` yields an all-zero mask, which matches everything.
fn prefix_mask(prefix: u32) -> u32 {
  if prefix == 0 {
    0
  } else {
    u32::MAX << (32 - prefix)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowlistEntry {
  Exact(String),
  Cidr(CidrBlock),
  /// Kept so the configured list stays inspectable; never matches.
  Malformed(String),
}

impl AllowlistEntry {
  pub fn parse(raw: &str) -> Self {
    let raw = raw.trim();
    if raw.contains('/') {
      match CidrBlock::parse(raw) {
        Some(block) => AllowlistEntry::Cidr(block),
        None => {
          warn!(entry = raw, "Ignoring malformed CIDR entry in webhook allowlist.");
          AllowlistEntry::Malformed(raw.to_string())
        }
      }
    } else {
      AllowlistEntry::Exact(raw.to_string())
    }
  }

  pub fn matches(&self, ip: &str) -> bool {
    match self {
      AllowlistEntry::Exact(entry) => entry == ip.trim(),
      AllowlistEntry::Cidr(block) => block.contains(ip),
      AllowlistEntry::Malformed(_) => false,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpAllowlist {
  entries: Vec<AllowlistEntry>,
}

impl IpAllowlist {
  /// Parses the `PAYPLUS_WEBHOOK_IPS` format. Blank entries are dropped.
  pub fn parse(list: &str) -> Self {
    let entries = list
      .split(',')
      .map(str::trim)
      .filter(|entry| !entry.is_empty())
      .map(AllowlistEntry::parse)
      .collect();
    Self { entries }
  }

  pub fn open() -> Self {
    Self::default()
  }

  pub fn is_open(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn entries(&self) -> &[AllowlistEntry] {
    &self.entries
  }

  pub fn is_allowed(&self, ip: &str) -> bool {
    self.is_open() || self.entries.iter().any(|entry| entry.matches(ip))
  }

  /// Like [`is_allowed`](Self::is_allowed), but an unknown caller is rejected
  /// unless the list is open.
  pub fn is_request_allowed(&self, client_ip: Option<&str>) -> bool {
    match client_ip {
      Some(ip) => self.is_allowed(ip),
      None => self.is_open(),
    }
  }
}

impl fmt::Display for IpAllowlist {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_open() {
      return f.write_str("<open>");
    }
    write!(f, "{} entries", self.entries.len())
  }
}

/// Client address for a request: the first `x-forwarded-for` entry, else
/// `x-real-ip`, else `None`.
///
/// `header` looks up a header value by lowercase name.
pub fn extract_client_ip<'a, F>(header: F) -> Option<String>
where
  F: Fn(&str) -> Option<&'a str>,
{
  if let Some(forwarded_for) = header("x-forwarded-for").filter(|v| !v.is_empty()) {
    return forwarded_for.split(',').next().map(|first| first.trim().to_string());
  }
  header("x-real-ip")
    .filter(|v| !v.is_empty())
    .map(|real_ip| real_ip.trim().to_string())
}
