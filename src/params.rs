//! Route parameters and query strings.
//!
//! - [`RouteParams`] - the `params` mapping carried by every route in a
//!   navigation state. Values are strings, keys are kept in sorted order so
//!   that paths generated from a state are stable.
//! - [`QueryParams`] - the `?key=value&...` tail of a path.
//!
//! # Example
//!
//! ```
//! use stack_navigation::{QueryParams, RouteParams};
//!
//! let params = RouteParams::new().with("reportID", "42");
//! assert_eq!(params.get_as::<u64>("reportID"), Some(42));
//!
//! let query = QueryParams::from_query_string("backTo=home&tab=chats");
//! assert_eq!(query.get("tab"), Some("chats"));
//! assert_eq!(query.to_query_string(), "backTo=home&tab=chats");
//! ```

use std::collections::BTreeMap;

/// String parameters attached to a route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RouteParams {
    params: BTreeMap<String, String>,
}

impl RouteParams {
    /// Create empty route parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a parameter value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Get a parameter and parse it as a specific type.
    ///
    /// Returns `None` if the parameter doesn't exist or cannot be parsed.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(key)?.parse().ok()
    }

    /// Insert or overwrite a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Remove a parameter, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.params.remove(key)
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Iterate over all `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Return the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Merge parent parameters with child parameters.
    ///
    /// Child parameters override parent parameters on collision.
    ///
    /// ```
    /// use stack_navigation::RouteParams;
    ///
    /// let parent = RouteParams::new().with("policyID", "7").with("tab", "list");
    /// let child = RouteParams::new().with("tab", "grid");
    ///
    /// let merged = RouteParams::merge(&parent, &child);
    /// assert_eq!(merged.get("policyID"), Some("7"));
    /// assert_eq!(merged.get("tab"), Some("grid"));
    /// ```
    pub fn merge(parent: &RouteParams, child: &RouteParams) -> RouteParams {
        let mut merged = parent.clone();
        merged.extend(child.clone());
        merged
    }

    /// Overwrite entries with the ones from `other`.
    pub fn extend(&mut self, other: RouteParams) {
        self.params.extend(other.params);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<QueryParams> for RouteParams {
    fn from(query: QueryParams) -> Self {
        Self {
            params: query.params,
        }
    }
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters parsed from the part of a path after `?`.
///
/// A repeated key keeps its last value, matching how route params are
/// flattened when a state is built from a path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, String>,
}

impl QueryParams {
    /// Create empty query parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a query string (without the leading `?`).
    ///
    /// Pairs without `=` are kept with an empty value. Empty pairs are skipped.
    pub fn from_query_string(query: &str) -> Self {
        let mut params = BTreeMap::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params.insert(decode_uri_component(key), decode_uri_component(value));
        }
        Self { params }
    }

    /// Get the value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Insert or overwrite a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Serialize back into a query string, keys in sorted order.
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    encode_uri_component(key),
                    encode_uri_component(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Return the number of keys.
    pub fn len(&self) -> usize {
        self.params.len()
    }
}

impl From<RouteParams> for QueryParams {
    fn from(params: RouteParams) -> Self {
        Self {
            params: params.params,
        }
    }
}

/// Percent-encode everything outside the URI unreserved set.
pub(crate) fn encode_uri_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Decode `%XX` escapes and `+` as space. Malformed escapes are kept verbatim.
fn decode_uri_component(s: &str) -> String {
    percent_decode(s, true)
}

/// Decode `%XX` escapes in a path segment. `+` stays literal.
pub(crate) fn decode_path_segment(s: &str) -> String {
    percent_decode(s, false)
}

fn percent_decode(s: &str, plus_as_space: bool) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let escaped = bytes
                    .get(i + 1..i + 3)
                    .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                    .and_then(|hex| std::str::from_utf8(hex).ok())
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                if let Some(byte) = escaped {
                    out.push(byte);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b'+' if plus_as_space => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

// ============================================================================
// Tests
// ============================================================================
