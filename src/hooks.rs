use std::convert::Infallible;

use leptos::prelude::*;
use snafu::ResultExt;
use url::Url;

use crate::browser::BrowserStorage;
use crate::config::{AppConfig, Environment, PUBLISHER};
use crate::environment::bind_host;
use crate::error::{DerivedUrlError, ParsingSnafu};
use crate::storage::{use_environment_storage, EnvironmentStorage};
use crate::urls;

#[derive(Debug, Clone)]
pub struct UseEnvironmentOptions {
    /// Where the environment record is persisted. Defaults to local storage.
    pub storage: BrowserStorage,

    /// Defaults to [`PUBLISHER`].
    pub config: AppConfig,
}

impl Default for UseEnvironmentOptions {
    fn default() -> Self {
        Self {
            storage: BrowserStorage::Local,
            config: PUBLISHER,
        }
    }
}

/// Reactive access to the persisted environment.
#[derive(Debug, Clone, Copy)]
pub struct UseEnvironment {
    /// The current environment. Always bound to a host.
    pub environment: Signal<Environment>,

    /// Persists the given environment, or the default one for `None`.
    /// An environment without a host is bound to the current page host.
    pub set_environment: Callback<Option<Environment>>,

    /// Removes the persisted environment.
    pub clear_environment: Callback<()>,

    pub urls: DerivedUrls,
}

/// Endpoint URLs derived from the current environment, updating whenever it changes.
#[derive(Debug, Clone, Copy)]
pub struct DerivedUrls {
    pub login: Signal<Result<Url, DerivedUrlError>>,
    pub logout: Signal<Result<Url, DerivedUrlError>>,
    pub login_token: Signal<Result<Url, DerivedUrlError>>,
    pub swagger: Signal<Result<Url, DerivedUrlError>>,
}

impl DerivedUrls {
    pub(crate) fn new(config: AppConfig, environment: Signal<Environment>) -> Self {
        let derive = move |build: fn(&AppConfig, &Environment) -> String| {
            Signal::derive(move || {
                let url = build(&config, &environment.read());
                Url::parse(&url).context(ParsingSnafu { url: &url })
            })
        };

        Self {
            login: derive(urls::app_login_url_for),
            logout: derive(urls::app_logout_url_for),
            login_token: derive(urls::login_token_path_for),
            swagger: derive(urls::swagger_url_for),
        }
    }
}

/// Tracks the environment persisted in browser storage.
///
/// Reads and writes the same record as [`crate::get_environment`] and
/// [`crate::set_environment`], so changes made through either are visible to both.
pub fn use_environment(options: UseEnvironmentOptions) -> UseEnvironment {
    tracing::trace!("Initializing environment...");

    let UseEnvironmentOptions { storage, config } = options;
    let page_host = current_page_host();
    let fallback = config.default_environment(page_host.clone());

    let EnvironmentStorage {
        read, write, remove, ..
    } = use_environment_storage(storage.into(), config.storage_key, fallback);

    let environment = bound_environment(read, config, page_host.clone());
    let set_environment = environment_setter(write, config, page_host);

    let clear_environment = Callback::new(move |()| {
        tracing::trace!("Removing persisted environment");
        remove();
    });

    UseEnvironment {
        environment,
        set_environment,
        clear_environment,
        urls: DerivedUrls::new(config, environment),
    }
}

/// The stored environment, bound to `page_host` if it has no host.
fn bound_environment(
    read: Signal<Environment>,
    config: AppConfig,
    page_host: String,
) -> Signal<Environment> {
    Signal::derive(move || {
        let Ok(environment) =
            bind_host(Some(read.get()), &config, || Ok::<_, Infallible>(page_host.clone()));
        environment
    })
}

fn environment_setter(
    write: WriteSignal<Environment>,
    config: AppConfig,
    page_host: String,
) -> Callback<Option<Environment>> {
    Callback::new(move |environment: Option<Environment>| {
        let Ok(environment) =
            bind_host(environment, &config, || Ok::<_, Infallible>(page_host.clone()));
        tracing::trace!(label = %environment.label, host = %environment.host, "Persisting environment");
        write.set(environment);
    })
}

#[cfg(not(feature = "ssr"))]
fn current_page_host() -> String {
    use crate::browser::WindowLocation;
    use crate::store::PageLocation;

    WindowLocation.host().unwrap_or_else(|err| {
        tracing::warn!(?err, "Could not determine the page host. Environments stay unbound.");
        String::new()
    })
}

#[cfg(feature = "ssr")]
fn current_page_host() -> String {
    String::new()
}
