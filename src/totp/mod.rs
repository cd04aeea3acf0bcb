//! RFC 6238 time-based one-time password generation
//!
//! Codes are derived client-side from the base32 "manual entry key" the
//! backend hands out during two-factor enrollment, with RFC 6238 defaults:
//! HMAC-SHA1, 30-second step, 6 digits.

mod base32;
mod code;

pub use base32::base32_decode;
pub use code::{generate_code, generate_code_at, seconds_until_step};
