//! # Search Classification
//!
//! Turns whatever the user typed into the search prompt into a `SearchIntent`.
//! Pure and total: every string maps to exactly one variant.
//!
//! ```text
//! "12345"          → BlockNumber(12345)
//! "0x" + 64 hex    → Hash("0x…")
//! "0x" + 10 hex    → Invalid("invalid hash length: 10")
//! "not-hex!"       → Invalid("unrecognized format")
//! ```
//!
//! Digits are tried before hex, so `"1234"` is always a block number even
//! though it is also valid (short) hex.

/// Length of a block or transaction hash in hex characters, without `0x`.
pub const HASH_HEX_LEN: usize = 64;

/// The classified meaning of free-text search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchIntent {
    BlockNumber(u64),
    /// Lower-cased, `0x`-prefixed 32-byte hash.
    Hash(String),
    Invalid(String),
}

pub fn classify(text: &str) -> SearchIntent {
    let trimmed = text.trim();
    let body = trimmed.strip_prefix("0x").unwrap_or(trimmed);

    if let Ok(number) = body.parse::<u64>() {
        // `parse` accepts a leading '+'; block numbers are plain digits.
        if body.bytes().all(|b| b.is_ascii_digit()) {
            return SearchIntent::BlockNumber(number);
        }
    }

    if is_hex(body) {
        if body.len() == HASH_HEX_LEN {
            return SearchIntent::Hash(format!("0x{}", body.to_ascii_lowercase()));
        }
        return SearchIntent::Invalid(format!("invalid hash length: {}", body.len()));
    }

    SearchIntent::Invalid("unrecognized format".to_string())
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}
