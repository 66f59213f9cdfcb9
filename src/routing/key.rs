//! Composite route keys.
//!
//! A key joins an HTTP method token and a literal path with a single space.
//! A space is never part of a method token (RFC 9110 `tchar`) and never
//! appears unescaped in a request path, so two distinct (method, path) pairs
//! always produce distinct keys.
//!
//! Matching is exact: no case folding, no trailing-slash normalization,
//! no percent-decoding.

use std::fmt;

const SEPARATOR: char = ' ';

/// Lookup key for the route registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    key: String,
    method_len: usize,
}

impl RouteKey {
    /// Build the key for a method and path.
    pub fn new(method: &str, path: &str) -> Self {
        let mut key = String::with_capacity(method.len() + 1 + path.len());
        key.push_str(method);
        key.push(SEPARATOR);
        key.push_str(path);
        Self {
            key,
            method_len: method.len(),
        }
    }

    pub fn method(&self) -> &str {
        &self.key[..self.method_len]
    }

    pub fn path(&self) -> &str {
        &self.key[self.method_len + SEPARATOR.len_utf8()..]
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parts() {
        let key = RouteKey::new("GET", "/hello");
        assert_eq!(key.as_str(), "GET /hello");
        assert_eq!(key.method(), "GET");
        assert_eq!(key.path(), "/hello");
        assert_eq!(key.to_string(), "GET /hello");
    }

    #[test]
    fn test_method_is_part_of_key() {
        assert_ne!(RouteKey::new("GET", "/"), RouteKey::new("POST", "/"));
    }

    #[test]
    fn test_exact_case() {
        assert_ne!(RouteKey::new("GET", "/hello"), RouteKey::new("GET", "/Hello"));
        assert_ne!(RouteKey::new("GET", "/"), RouteKey::new("get", "/"));
    }

    #[test]
    fn test_separator_does_not_collide() {
        // With a '-' separator these two would both be "GET--/x".
        assert_ne!(RouteKey::new("GET-", "/x"), RouteKey::new("GET", "-/x"));
        // Trailing slash is significant.
        assert_ne!(RouteKey::new("GET", "/a"), RouteKey::new("GET", "/a/"));
    }
}
