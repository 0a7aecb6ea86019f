//! In-memory stand-ins for the browser stores, usable outside of a browser.

use std::cell::RefCell;
use std::collections::HashMap;

use itertools::Itertools;
use time::OffsetDateTime;

use crate::error::StoreError;
use crate::store::{CookieStore, KeyValueStore, PageLocation};
use crate::time_ext::parse_cookie_date;

/// A cookie as remembered by [`MemoryCookieJar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    pub path: String,
    /// `None` for session cookies.
    pub expires: Option<OffsetDateTime>,
    pub secure: bool,
}

impl StoredCookie {
    fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }
}

/// Cookie jar following the `document.cookie` contract.
///
/// Cookies are identified by name and path. Writing a cookie with an `expires` attribute in the
/// past removes the cookie with the same name and path. Path matching against the current
/// document is not modelled: reads see every unexpired cookie.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: RefCell<Vec<StoredCookie>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cookie stored under `name` and `path`, even if it already expired.
    pub fn get(&self, name: &str, path: &str) -> Option<StoredCookie> {
        self.cookies
            .borrow()
            .iter()
            .find(|it| it.name == name && it.path == path)
            .cloned()
    }

    /// All stored cookies in insertion order.
    pub fn cookies(&self) -> Vec<StoredCookie> {
        self.cookies.borrow().clone()
    }

    fn parse(cookie: &str) -> Option<StoredCookie> {
        let mut parts = cookie.split(';');
        let (name, value) = parts.next()?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut stored = StoredCookie {
            name: name.to_owned(),
            value: value.trim().to_owned(),
            path: "/".to_owned(),
            expires: None,
            secure: false,
        };
        for attribute in parts {
            let (key, value) = match attribute.split_once('=') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (attribute.trim(), ""),
            };
            match key.to_ascii_lowercase().as_str() {
                "path" => stored.path = value.to_owned(),
                "expires" => stored.expires = parse_cookie_date(value),
                "secure" => stored.secure = true,
                _ => {}
            }
        }
        Some(stored)
    }
}

impl CookieStore for MemoryCookieJar {
    fn cookie_string(&self) -> Result<String, StoreError> {
        let now = OffsetDateTime::now_utc();
        Ok(self
            .cookies
            .borrow()
            .iter()
            .filter(|it| !it.is_expired_at(now))
            .map(|it| format!("{}={}", it.name, it.value))
            .join("; "))
    }

    fn write_cookie(&self, cookie: &str) -> Result<(), StoreError> {
        let Some(stored) = Self::parse(cookie) else {
            tracing::debug!(cookie, "Ignoring cookie without a name.");
            return Ok(());
        };

        let mut cookies = self.cookies.borrow_mut();
        let existing = cookies
            .iter()
            .position(|it| it.name == stored.name && it.path == stored.path);

        if stored.is_expired_at(OffsetDateTime::now_utc()) {
            if let Some(idx) = existing {
                cookies.remove(idx);
            }
            return Ok(());
        }

        match existing {
            Some(idx) => cookies[idx] = stored,
            None => cookies.push(stored),
        }
        Ok(())
    }
}

/// Key/value store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value, bypassing any encoding.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.items.borrow_mut().insert(key.into(), value.into());
    }

    pub fn item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.item(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.insert(key, value);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// A page location that always reports the same host.
#[derive(Debug, Clone)]
pub struct FixedLocation {
    host: String,
}

impl FixedLocation {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

impl PageLocation for FixedLocation {
    fn host(&self) -> Result<String, StoreError> {
        Ok(self.host.clone())
    }
}
