use crate::config::{AppConfig, PUBLISHER};
use crate::error::StoreError;

/// Access to the cookies of the current document.
pub trait CookieStore {
    /// All cookies visible to the page, formatted as `key=value; key2=value2`.
    fn cookie_string(&self) -> Result<String, StoreError>;

    /// Writes a single cookie, attributes included, with the semantics of assigning to
    /// `document.cookie`: only the named cookie is affected.
    fn write_cookie(&self, cookie: &str) -> Result<(), StoreError>;
}

/// A string key/value store, like `window.localStorage`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// Where the app is currently served from.
pub trait PageLocation {
    /// Host of the current page, including a non-default port.
    fn host(&self) -> Result<String, StoreError>;
}

/// Storage capabilities and app configuration handed to every operation of this crate.
///
/// Nothing is cached in here. Every operation reads through to the underlying stores.
#[derive(Clone, Copy)]
pub struct Platform<'a> {
    pub cookies: &'a dyn CookieStore,
    pub storage: &'a dyn KeyValueStore,
    pub location: &'a dyn PageLocation,
    pub config: &'a AppConfig,
}

impl<'a> Platform<'a> {
    /// Bundles the given stores with the [`PUBLISHER`] configuration.
    pub fn new(
        cookies: &'a dyn CookieStore,
        storage: &'a dyn KeyValueStore,
        location: &'a dyn PageLocation,
    ) -> Self {
        Self {
            cookies,
            storage,
            location,
            config: &PUBLISHER,
        }
    }

    pub fn with_config(mut self, config: &'a AppConfig) -> Self {
        self.config = config;
        self
    }
}

impl std::fmt::Debug for Platform<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
