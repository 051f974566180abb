//! Identifier generation
//!
//! OAuth 1.0a needs a fresh, unguessable nonce per signed request. The
//! alphabet is restricted to ASCII alphanumerics so the value never needs
//! percent-encoding.

use nanoid::nanoid;

const NONCE_ALPHABET: [char; 62] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm',
    'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
    'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Length of an OAuth nonce
pub const NONCE_LEN: usize = 32;

/// Generate a random alphanumeric nonce for request signing
pub fn generate_nonce() -> String {
    nanoid!(NONCE_LEN, &NONCE_ALPHABET)
}

/// Generate a short id, used to correlate log lines of one logical call
pub fn generate_id() -> String {
    nanoid!(12, &NONCE_ALPHABET)
}
