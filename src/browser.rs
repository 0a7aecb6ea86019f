//! Stores backed by the browser's `document.cookie`, web storage and `window.location`.
//!
//! Every call looks up the current window. A page without a window, document or storage area
//! yields [`StoreError::Unavailable`]. Off `wasm32` there is never a window.

use leptos_use::storage::StorageType;
use snafu::OptionExt;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlDocument, Storage};

use crate::error::{StoreError, UnavailableSnafu};
use crate::store::{CookieStore, KeyValueStore, PageLocation, Platform};

/// `document.cookie` of the current page.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentCookies;

/// One of the two web storage areas of the current window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BrowserStorage {
    /// `window.localStorage`, surviving browser restarts.
    #[default]
    Local,
    /// `window.sessionStorage`, scoped to the current tab.
    Session,
}

/// `window.location` of the current page.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowLocation;

/// A platform operating on the current page, persisting the environment in `storage`.
pub fn browser_platform(storage: BrowserStorage) -> Platform<'static> {
    let storage: &'static BrowserStorage = match storage {
        BrowserStorage::Local => &BrowserStorage::Local,
        BrowserStorage::Session => &BrowserStorage::Session,
    };
    Platform::new(&DocumentCookies, storage, &WindowLocation)
}

impl From<BrowserStorage> for StorageType {
    fn from(storage: BrowserStorage) -> Self {
        match storage {
            BrowserStorage::Local => StorageType::Local,
            BrowserStorage::Session => StorageType::Session,
        }
    }
}

fn js_error(err: JsValue) -> StoreError {
    StoreError::Js {
        message: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}

#[cfg(target_arch = "wasm32")]
fn window() -> Result<web_sys::Window, StoreError> {
    web_sys::window().context(UnavailableSnafu { what: "window" })
}

/// JavaScript imports can't be called off `wasm32`, e.g. when rendering on the server.
#[cfg(not(target_arch = "wasm32"))]
fn window() -> Result<web_sys::Window, StoreError> {
    UnavailableSnafu { what: "window" }.fail()
}

fn html_document() -> Result<HtmlDocument, StoreError> {
    window()?
        .document()
        .context(UnavailableSnafu { what: "document" })?
        .dyn_into::<HtmlDocument>()
        .map_err(|_| StoreError::Unavailable {
            what: "HTML document",
        })
}

impl CookieStore for DocumentCookies {
    fn cookie_string(&self) -> Result<String, StoreError> {
        html_document()?.cookie().map_err(js_error)
    }

    fn write_cookie(&self, cookie: &str) -> Result<(), StoreError> {
        html_document()?.set_cookie(cookie).map_err(js_error)
    }
}

impl BrowserStorage {
    fn storage(self) -> Result<Storage, StoreError> {
        let window = window()?;
        let (storage, what) = match self {
            BrowserStorage::Local => (window.local_storage(), "localStorage"),
            BrowserStorage::Session => (window.session_storage(), "sessionStorage"),
        };
        storage.map_err(js_error)?.context(UnavailableSnafu { what })
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.storage()?.remove_item(key).map_err(js_error)
    }
}

impl PageLocation for WindowLocation {
    fn host(&self) -> Result<String, StoreError> {
        window()?.location().host().map_err(js_error)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::error::{CookieError, EnvironmentError};
    use crate::{get_app_login_url, get_cookie, get_environment, set_cookie, CookieOptions};
    use assertr::prelude::*;

    #[test]
    fn reports_missing_window_when_reading_environment() {
        let platform = browser_platform(BrowserStorage::Local);

        let result = get_environment(&platform);

        assert_that(matches!(
            result,
            Err(EnvironmentError::ReadStorage {
                source: StoreError::Unavailable { what: "window" },
                ..
            })
        ))
        .is_true();
    }

    #[test]
    fn cookie_and_url_operations_fail_without_window() {
        let platform = browser_platform(BrowserStorage::Session);

        assert_that(matches!(
            get_cookie(&platform, "token"),
            Err(CookieError::Environment { .. })
        ))
        .is_true();
        assert_that(
            set_cookie(&platform, "token", "abc", &CookieOptions::default()).is_err(),
        )
        .is_true();
        assert_that(get_app_login_url(&platform).is_err()).is_true();
    }

    #[test]
    fn stores_report_missing_window() {
        let unavailable = Err::<String, _>(StoreError::Unavailable { what: "window" });

        assert_that(DocumentCookies.cookie_string()).is_equal_to(unavailable.clone());
        assert_that(WindowLocation.host()).is_equal_to(unavailable);
        assert_that(BrowserStorage::Local.get_item("environment")).is_equal_to(Err::<
            Option<String>,
            _,
        >(
            StoreError::Unavailable { what: "window" },
        ));
    }
}
