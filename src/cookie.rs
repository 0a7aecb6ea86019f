use std::borrow::Cow;
use std::time::Duration;

use snafu::{OptionExt, ResultExt};
use time::OffsetDateTime;

use crate::environment::get_environment;
use crate::error::{
    CookieError, EnvironmentSnafu, ExpiryOutOfRangeSnafu, FormatExpirySnafu, ReadCookiesSnafu,
    WriteCookieSnafu,
};
use crate::store::Platform;
use crate::time_ext::CookieDateExt;

/// Expiry date used to invalidate a cookie.
pub const EXPIRED: &str = "Thu, 01 Jan 1970 00:00:01 GMT";

/// Attributes of a cookie written by [`set_cookie`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    /// How long the cookie stays valid. `None` or zero creates a session cookie.
    pub validity: Option<Duration>,

    /// Defaults to `/`.
    pub path: String,

    /// Adds the `Secure` attribute. Defaults to `true`.
    pub secure: bool,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            validity: None,
            path: "/".to_owned(),
            secure: true,
        }
    }
}

impl CookieOptions {
    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = Some(validity);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }
}

/// Name under which cookie `name` is stored for the environment labeled `label`.
pub fn namespaced_name(name: &str, label: &str) -> String {
    format!("{name}_{label}")
}

/// Iterates over the `key=value` pairs of a cookie header.
///
/// Pairs are split at their first `=`, so values may contain `=`. Keys are trimmed, values are kept as is.
/// Pairs without any `=` are skipped.
pub fn cookie_pairs(header: &str) -> impl Iterator<Item = (&str, &str)> {
    header.split(';').filter_map(|pair| match pair.split_once('=') {
        Some((key, value)) => Some((key.trim(), value)),
        None => {
            if !pair.trim().is_empty() {
                tracing::debug!(pair, "Skipping malformed cookie pair.");
            }
            None
        }
    })
}

/// Reads cookie `name` of the current environment, percent-decoded.
///
/// Returns `Ok(None)` when no such cookie is set, or when its value is not valid
/// percent-encoded UTF-8.
pub fn get_cookie(platform: &Platform<'_>, name: &str) -> Result<Option<String>, CookieError> {
    let environment = get_environment(platform).context(EnvironmentSnafu)?;
    let key = namespaced_name(name, &environment.label);
    let header = platform.cookies.cookie_string().context(ReadCookiesSnafu)?;

    let Some((_, value)) = cookie_pairs(&header).find(|(it, _)| *it == key) else {
        return Ok(None);
    };

    match urlencoding::decode(value) {
        Ok(decoded) => Ok(Some(decoded.into_owned())),
        Err(err) => {
            tracing::debug!(?err, "Value of cookie '{key}' is not valid percent-encoded UTF-8.");
            Ok(None)
        }
    }
}

/// Sets cookie `name` of the current environment.
///
/// `value` is written as given. Callers must percent-encode it, e.g. with
/// [`encode_cookie_value`].
pub fn set_cookie(
    platform: &Platform<'_>,
    name: &str,
    value: &str,
    options: &CookieOptions,
) -> Result<(), CookieError> {
    set_cookie_at(platform, name, value, options, OffsetDateTime::now_utc())
}

/// Like [`set_cookie`], computing the expiry relative to `now`.
pub fn set_cookie_at(
    platform: &Platform<'_>,
    name: &str,
    value: &str,
    options: &CookieOptions,
    now: OffsetDateTime,
) -> Result<(), CookieError> {
    let environment = get_environment(platform).context(EnvironmentSnafu)?;
    let key = namespaced_name(name, &environment.label);

    let expires = match options.validity.filter(|it| !it.is_zero()) {
        Some(validity) => {
            let expires = time::Duration::try_from(validity)
                .ok()
                .and_then(|it| now.checked_add(it))
                .context(ExpiryOutOfRangeSnafu { name: &key })?;
            let expires = expires
                .to_cookie_date()
                .context(FormatExpirySnafu { name: &key })?;
            Cow::Owned(format!("; expires={expires}"))
        }
        None => Cow::Borrowed(""),
    };
    let secure = if options.secure { "; Secure" } else { "" };

    let cookie = format!("{key}={value}; path={}{expires}{secure}", options.path);
    tracing::trace!(cookie, "Setting cookie");
    platform
        .cookies
        .write_cookie(&cookie)
        .context(WriteCookieSnafu { name: key })
}

/// Invalidates cookie `name` of the current environment, previously set for `path`.
pub fn delete_cookie(platform: &Platform<'_>, name: &str, path: &str) -> Result<(), CookieError> {
    let environment = get_environment(platform).context(EnvironmentSnafu)?;
    let key = namespaced_name(name, &environment.label);

    let cookie = format!("{key}=; path={path}; expires={EXPIRED}");
    tracing::trace!(cookie, "Deleting cookie");
    platform
        .cookies
        .write_cookie(&cookie)
        .context(WriteCookieSnafu { name: key })
}

/// Percent-encodes `value` for use with [`set_cookie`].
pub fn encode_cookie_value(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}
