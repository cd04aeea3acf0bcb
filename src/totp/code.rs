use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::time::{SystemTime, UNIX_EPOCH};

use super::base32::base32_decode;

const TIME_STEP_SECS: u64 = 30;
const CODE_MODULUS: u32 = 1_000_000;

/// Generates a 6-digit TOTP code for the current time.
///
/// A code generated near a step boundary may already be invalid by the time
/// the server checks it; callers racing the boundary can consult
/// [`seconds_until_step`] first.
pub fn generate_code(secret: &str) -> String {
    generate_code_at(secret, unix_now())
}

/// Generates the 6-digit code for an explicit unix timestamp.
///
/// Deterministic: any two timestamps within the same 30-second step yield the
/// same code.
pub fn generate_code_at(secret: &str, unix_time_secs: u64) -> String {
    let key = base32_decode(secret);
    let counter = unix_time_secs / TIME_STEP_SECS;

    let mut mac =
        Hmac::<Sha1>::new_from_slice(&key).expect("HMAC-SHA1 accepts keys of any length");
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    // Dynamic truncation per RFC 4226 section 5.3
    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary = u32::from_be_bytes([
        digest[offset] & 0x7f,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]);

    format!("{:06}", binary % CODE_MODULUS)
}

/// Seconds remaining in the current 30-second step for the given timestamp.
pub fn seconds_until_step(unix_time_secs: u64) -> u64 {
    TIME_STEP_SECS - (unix_time_secs % TIME_STEP_SECS)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
