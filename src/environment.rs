use snafu::ResultExt;

use crate::config::{AppConfig, Environment};
use crate::error::{
    EnvironmentError, LocationSnafu, ParseSnafu, ReadStorageSnafu, RemoveStorageSnafu,
    SerializeSnafu, WriteStorageSnafu,
};
use crate::store::Platform;

/// Reads the persisted environment.
///
/// Falls back to the configured default record, bound to the current page host, when nothing
/// (or an empty string) is stored. A stored record without a host is bound to the page host
/// as well. A stored value that is not a valid record is reported as
/// [`EnvironmentError::Parse`] and left in place.
pub fn get_environment(platform: &Platform<'_>) -> Result<Environment, EnvironmentError> {
    let key = platform.config.storage_key;
    let stored = platform
        .storage
        .get_item(key)
        .context(ReadStorageSnafu { key })?;

    let environment = match stored.as_deref() {
        None | Some("") => {
            tracing::trace!("Nothing persisted under '{key}'. Using the default environment.");
            None
        }
        Some(json) => Some(serde_json::from_str::<Environment>(json).context(ParseSnafu { key })?),
    };

    bind_host(environment, platform.config, || page_host(platform))
}

/// Persists `environment`, or the default record if `None` is given.
///
/// An environment without a host is bound to the current page host before it is stored.
pub fn set_environment(
    platform: &Platform<'_>,
    environment: Option<Environment>,
) -> Result<(), EnvironmentError> {
    let environment = bind_host(environment, platform.config, || page_host(platform))?;

    let key = platform.config.storage_key;
    let json = serde_json::to_string(&environment).context(SerializeSnafu)?;
    tracing::trace!(label = %environment.label, host = %environment.host, "Persisting environment");
    platform
        .storage
        .set_item(key, &json)
        .context(WriteStorageSnafu { key })
}

/// Removes the persisted environment. Subsequent reads yield the default record.
pub fn clear_environment(platform: &Platform<'_>) -> Result<(), EnvironmentError> {
    let key = platform.config.storage_key;
    platform
        .storage
        .remove_item(key)
        .context(RemoveStorageSnafu { key })
}

/// `environment`, or the default record of `config` for `None`, bound to the page host if it
/// has no host. `page_host` is only asked when needed.
pub(crate) fn bind_host<E>(
    environment: Option<Environment>,
    config: &AppConfig,
    page_host: impl FnOnce() -> Result<String, E>,
) -> Result<Environment, E> {
    let Some(mut environment) = environment else {
        return Ok(config.default_environment(page_host()?));
    };
    if !environment.has_host() {
        environment.host = page_host()?;
    }
    Ok(environment)
}

fn page_host(platform: &Platform<'_>) -> Result<String, EnvironmentError> {
    platform.location.host().context(LocationSnafu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PUBLISHER;
    use crate::error::StoreError;
    use std::convert::Infallible;
    use crate::memory::{FixedLocation, MemoryCookieJar, MemoryStorage};
    use crate::store::PageLocation;
    use assertr::prelude::*;

    struct Fixture {
        cookies: MemoryCookieJar,
        storage: MemoryStorage,
        location: FixedLocation,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                cookies: MemoryCookieJar::new(),
                storage: MemoryStorage::new(),
                location: FixedLocation::new("localhost:9443"),
            }
        }

        fn platform(&self) -> Platform<'_> {
            Platform::new(&self.cookies, &self.storage, &self.location)
        }
    }

    #[test]
    fn defaults_when_nothing_is_stored() {
        let fixture = Fixture::new();
        let environment = get_environment(&fixture.platform()).unwrap();
        assert_that(environment).is_equal_to(Environment {
            label: "Default".to_owned(),
            host: "localhost:9443".to_owned(),
            login_token_path: Some("/login/token".to_owned()),
        });
    }

    #[test]
    fn defaults_when_empty_string_is_stored() {
        let fixture = Fixture::new();
        fixture.storage.insert("environment", "");
        let environment = get_environment(&fixture.platform()).unwrap();
        assert_that(environment.label.as_str()).is_equal_to("Default");
    }

    #[test]
    fn fills_missing_host_on_write() {
        let fixture = Fixture::new();
        let platform = fixture.platform();

        set_environment(&platform, Some(Environment::new("QA"))).unwrap();

        assert_that(fixture.storage.item("environment")).is_equal_to(Some(
            r#"{"label":"QA","host":"localhost:9443"}"#.to_owned(),
        ));
        assert_that(get_environment(&platform).unwrap())
            .is_equal_to(Environment::new("QA").with_host("localhost:9443"));
    }

    #[test]
    fn keeps_explicit_host() {
        let fixture = Fixture::new();
        let platform = fixture.platform();
        let qa = Environment::new("QA").with_host("api.example.com");

        set_environment(&platform, Some(qa.clone())).unwrap();

        assert_that(get_environment(&platform).unwrap()).is_equal_to(qa);
    }

    #[test]
    fn stores_default_record_when_given_none() {
        let fixture = Fixture::new();
        let platform = fixture.platform();

        set_environment(&platform, None).unwrap();

        assert_that(fixture.storage.item("environment")).is_equal_to(Some(
            r#"{"label":"Default","host":"localhost:9443","loginTokenPath":"/login/token"}"#
                .to_owned(),
        ));
    }

    #[test]
    fn binds_stored_record_without_host_to_page_host() {
        let fixture = Fixture::new();
        fixture.storage.insert("environment", r#"{"label":"Prod"}"#);
        let environment = get_environment(&fixture.platform()).unwrap();
        assert_that(environment.host.as_str()).is_equal_to("localhost:9443");
    }

    #[test]
    fn propagates_corrupt_record() {
        let fixture = Fixture::new();
        fixture.storage.insert("environment", "{not json");

        let result = get_environment(&fixture.platform());

        assert_that(matches!(result, Err(EnvironmentError::Parse { .. }))).is_true();
        assert_that(fixture.storage.item("environment"))
            .is_equal_to(Some("{not json".to_owned()));
    }

    #[test]
    fn clearing_restores_default() {
        let fixture = Fixture::new();
        let platform = fixture.platform();
        set_environment(&platform, Some(Environment::new("QA"))).unwrap();

        clear_environment(&platform).unwrap();

        assert_that(get_environment(&platform).unwrap().label.as_str()).is_equal_to("Default");
    }

    #[test]
    fn uses_configured_storage_key() {
        const STORE: AppConfig = AppConfig {
            storage_key: "store_environment",
            context_path: "/store",
            ..PUBLISHER
        };
        let fixture = Fixture::new();
        let platform = fixture.platform().with_config(&STORE);

        set_environment(&platform, Some(Environment::new("QA"))).unwrap();

        assert_that(fixture.storage.item("environment")).is_equal_to(None::<String>);
        assert_that(fixture.storage.item("store_environment").is_some()).is_true();
    }

    fn no_host() -> Result<String, &'static str> {
        Err("page host must not be asked for")
    }

    #[test]
    fn bind_host_defaults_missing_environment() {
        let environment = bind_host(None, &PUBLISHER, || Ok::<_, Infallible>("page:8080".to_owned()));

        assert_that(environment).is_equal_to(Ok::<_, Infallible>(
            PUBLISHER.default_environment("page:8080"),
        ));
    }

    #[test]
    fn bind_host_fills_missing_host() {
        let environment = bind_host(Some(Environment::new("QA")), &PUBLISHER, || {
            Ok::<_, Infallible>("page:8080".to_owned())
        });

        assert_that(environment).is_equal_to(Ok::<_, Infallible>(
            Environment::new("QA").with_host("page:8080"),
        ));
    }

    #[test]
    fn bind_host_keeps_existing_host_without_asking() {
        let qa = Environment::new("QA").with_host("api.example.com");

        let environment = bind_host(Some(qa.clone()), &PUBLISHER, no_host);

        assert_that(environment).is_equal_to(Ok::<_, &'static str>(qa));
    }

    #[test]
    fn bind_host_propagates_page_host_failure() {
        assert_that(bind_host(None, &PUBLISHER, no_host))
            .is_equal_to(Err::<Environment, _>("page host must not be asked for"));
    }

    #[test]
    fn reads_record_with_host_without_location() {
        let cookies = MemoryCookieJar::new();
        let storage = MemoryStorage::new();
        storage.insert("environment", r#"{"label":"QA","host":"api.example.com"}"#);
        let platform = Platform::new(&cookies, &storage, &NoLocation);

        assert_that(get_environment(&platform).unwrap())
            .is_equal_to(Environment::new("QA").with_host("api.example.com"));
    }

    struct NoLocation;

    impl PageLocation for NoLocation {
        fn host(&self) -> Result<String, StoreError> {
            Err(StoreError::Unavailable { what: "window" })
        }
    }

    #[test]
    fn reports_unavailable_location() {
        let cookies = MemoryCookieJar::new();
        let storage = MemoryStorage::new();
        let platform = Platform::new(&cookies, &storage, &NoLocation);

        let result = get_environment(&platform);

        assert_that(matches!(result, Err(EnvironmentError::Location { .. }))).is_true();
    }
}
