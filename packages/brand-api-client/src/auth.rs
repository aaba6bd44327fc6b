//! Bearer token providers.
//!
//! The client never reads ambient storage itself. Whoever owns the session
//! (a login flow, a cookie jar, a CLI flag) hands the client a provider.

use std::sync::{Arc, RwLock};

/// Supplies the bearer token for outgoing requests.
pub trait TokenProvider: Send + Sync {
    /// Current token, or `None` when the caller is anonymous.
    fn token(&self) -> Option<String>;
}

/// Anonymous access. No `Authorization` header is sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenProvider for NoToken {
    fn token(&self) -> Option<String> {
        None
    }
}

/// A fixed token, e.g. from `BRAND_API_TOKEN` or `--token`.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.clone())
        }
    }
}

/// A token slot the auth collaborator can fill, replace or clear at runtime.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct SharedToken {
    inner: Arc<RwLock<Option<String>>>,
}

impl SharedToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: impl Into<String>) {
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(token.into());
    }

    pub fn clear(&self) {
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}

impl TokenProvider for SharedToken {
    fn token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// Reads the token from a named cookie in a `Cookie`-header style string
/// (`name=value; other=value`).
#[derive(Debug, Clone)]
pub struct CookieToken {
    name: String,
    cookies: SharedCookies,
}

/// Cookie storage shared between the session owner and the client.
#[derive(Debug, Clone, Default)]
pub struct SharedCookies(Arc<RwLock<String>>);

impl SharedCookies {
    pub fn new(cookie_header: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(cookie_header.into())))
    }

    pub fn replace(&self, cookie_header: impl Into<String>) {
        let mut jar = self.0.write().unwrap_or_else(|e| e.into_inner());
        *jar = cookie_header.into();
    }

    fn get(&self, name: &str) -> Option<String> {
        let jar = self.0.read().unwrap_or_else(|e| e.into_inner());
        parse_cookie(&jar, name)
    }
}

impl CookieToken {
    pub fn new(name: impl Into<String>, cookies: SharedCookies) -> Self {
        Self {
            name: name.into(),
            cookies,
        }
    }
}

impl TokenProvider for CookieToken {
    fn token(&self) -> Option<String> {
        self.cookies.get(&self.name)
    }
}

fn parse_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}
