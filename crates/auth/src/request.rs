//! Framework-independent request view
//!
//! Strategies consume this narrow struct instead of any particular web
//! framework's request type: just the path, the headers, and the cookies.

use std::collections::HashMap;

/// The slice of an inbound request that authentication needs.
#[derive(Debug, Clone, Default)]
pub struct RequestView {
    pub path: Option<String>,
    pub headers: HashMap<String, String>,
    pub cookies: HashMap<String, String>,
}

impl RequestView {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Build a view from a path and raw headers, deriving the cookie map from
    /// the `Cookie` header (`k=v` pairs separated by `;`).
    pub fn from_parts(path: Option<String>, headers: HashMap<String, String>) -> Self {
        let cookies = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("cookie"))
            .map(|(_, raw)| parse_cookie_header(raw))
            .unwrap_or_default();

        Self {
            path,
            headers,
            cookies,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Case-insensitive header lookup (HTTP header names are case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }
}

fn parse_cookie_header(raw: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for pair in raw.split(';') {
        if let Some((name, value)) = pair.trim().split_once('=') {
            cookies.insert(name.to_string(), value.to_string());
        }
    }
    cookies
}
