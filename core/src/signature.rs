// core/src/signature.rs

//! PayPlus webhook signatures: base64(HMAC-SHA256(secret, raw body)), sent in
//! the `hash` header.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

fn mac_for(body: &[u8], secret: &str) -> HmacSha256 {
  let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
  mac.update(body);
  mac
}

/// The `hash` header value PayPlus would send for `body`.
pub fn sign(body: &[u8], secret: &str) -> String {
  BASE64.encode(mac_for(body, secret).finalize().into_bytes())
}

/// Constant-time check of a webhook's `hash` header against the raw body.
pub fn verify_signature(body: &[u8], hash: &str, secret: &str) -> bool {
  let expected = sign(body, secret);
  let provided = hash.as_bytes();
  if expected.len() != provided.len() {
    return false;
  }
  expected.as_bytes().ct_eq(provided).into()
}
