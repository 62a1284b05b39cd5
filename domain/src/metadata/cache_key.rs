//! Connection fingerprint used to name cache files.

use sha2::{Digest, Sha256};
use std::fmt;

const KEY_LEN: usize = 16;

/// First 16 hex characters of SHA-256 over url, transport, token and client
/// name, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn derive(server_url: &str, transport: &str, token: &str, client_name: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(server_url.as_bytes());
        hasher.update(transport.as_bytes());
        hasher.update(token.as_bytes());
        hasher.update(client_name.as_bytes());

        let mut digest = hex::encode(hasher.finalize());
        digest.truncate(KEY_LEN);
        Self(digest)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<key>.json`
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_stable_and_short() {
        let a = CacheKey::derive("https://example.com/sse", "sse", "", "mcpmap");
        let b = CacheKey::derive("https://example.com/sse", "sse", "", "mcpmap");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 16);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(a.file_name(), format!("{a}.json"));
    }

    #[test]
    fn test_every_input_changes_key() {
        let base = CacheKey::derive("u", "sse", "t", "c");
        assert_ne!(base, CacheKey::derive("u2", "sse", "t", "c"));
        assert_ne!(base, CacheKey::derive("u", "http", "t", "c"));
        assert_ne!(base, CacheKey::derive("u", "sse", "t2", "c"));
        assert_ne!(base, CacheKey::derive("u", "sse", "t", "c2"));
    }

    #[test]
    fn test_matches_sha256_prefix() {
        // sha256("abc") = ba7816bf8f01cfea...
        let key = CacheKey::derive("a", "b", "c", "");
        assert_eq!(key.as_str(), "ba7816bf8f01cfea");
    }
}
