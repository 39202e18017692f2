//! Display formatting for opaque integrity hashes
//!
//! The digest algorithm is a server contract; the client only ever displays
//! and forwards hashes. Truncation for on-screen verification is a pure
//! formatting concern, kept apart from the workflows that fetch the values.

/// Number of leading characters shown for a truncated hash.
pub const SHORT_HASH_LEN: usize = 16;

/// Truncate an opaque hex digest for display.
///
/// Hashes short enough to show in full are returned unchanged.
pub fn short_hash(hash: &str) -> String {
    match hash.char_indices().nth(SHORT_HASH_LEN) {
        Some((idx, _)) => format!("{}...", &hash[..idx]),
        None => hash.to_string(),
    }
}
