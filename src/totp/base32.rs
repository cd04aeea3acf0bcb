const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Decodes an RFC 4648 base32 string into raw bytes.
///
/// Case-insensitive. Characters outside the alphabet (`=` padding, whitespace,
/// separators) are skipped rather than rejected, so a secret copy-pasted with
/// formatting still decodes. Trailing bits that do not fill a byte are
/// discarded. Never fails; a mis-typed secret surfaces as a rejected code at
/// verification instead.
pub fn base32_decode(input: &str) -> Vec<u8> {
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;
    let mut bytes = Vec::with_capacity(input.len() * 5 / 8);

    for c in input.bytes() {
        let Some(index) = BASE32_ALPHABET
            .iter()
            .position(|&a| a == c.to_ascii_uppercase())
        else {
            continue;
        };
        buffer = (buffer << 5) | index as u32;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            bytes.push((buffer >> bits) as u8);
        }
    }

    bytes
}
