//! Persists the selected API publisher environment (label, host, token path) and derives the
//! publisher's login, logout, token and swagger URLs from it.
//!
//! Cookies written through this crate are namespaced with the label of the active environment,
//! so switching environments never mixes up their session state.
//!
//! All operations take a [`Platform`], bundling the stores they work on. Use
//! [`browser::browser_platform`] in the browser, or the [`memory`] stores anywhere else:
//!
//! ```
//! use leptos_publisher_env::memory::{FixedLocation, MemoryCookieJar, MemoryStorage};
//! use leptos_publisher_env::{
//!     get_app_login_url, get_cookie, set_cookie, set_environment, CookieOptions, Environment,
//!     Platform,
//! };
//!
//! let cookies = MemoryCookieJar::new();
//! let storage = MemoryStorage::new();
//! let location = FixedLocation::new("localhost:9443");
//! let platform = Platform::new(&cookies, &storage, &location);
//!
//! set_environment(&platform, Some(Environment::new("QA").with_host("api.example.com"))).unwrap();
//! assert_eq!(
//!     get_app_login_url(&platform).unwrap(),
//!     "https://api.example.com/login/login/publisher"
//! );
//!
//! set_cookie(&platform, "token", "abc", &CookieOptions::default()).unwrap();
//! assert_eq!(cookies.get("token_QA", "/").unwrap().value, "abc");
//! assert_eq!(get_cookie(&platform, "token").unwrap().as_deref(), Some("abc"));
//! ```
//!
//! Inside a Leptos app, [`use_environment`] offers the same record as signals:
//!
//! ```no_run
//! use leptos::prelude::*;
//! use leptos_publisher_env::{use_environment, UseEnvironmentOptions};
//!
//! let env = use_environment(UseEnvironmentOptions::default());
//! let login_url = Signal::derive(move || env.urls.login.get().ok());
//! ```

pub mod browser;
mod config;
mod cookie;
mod environment;
mod error;
mod hooks;
pub mod memory;
mod storage;
mod store;
mod time_ext;
mod urls;
mod utils;

// Library exports (additional to pub modules).
pub use config::*;
pub use cookie::*;
pub use environment::*;
pub use error::*;
pub use hooks::*;
pub use store::*;
pub use urls::*;
pub use utils::*;
pub mod url {
    pub use url::Url;
}
