use snafu::Snafu;

/// Failure of one of the injected storage capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum StoreError {
    #[snafu(display("StoreError: {what} is not available"))]
    Unavailable { what: &'static str },

    #[snafu(display("StoreError: JavaScript exception: {message}"))]
    Js { message: String },
}

/// Errors reading or writing the persisted environment record.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum EnvironmentError {
    #[snafu(display("EnvironmentError: Could not read '{key}' from storage"))]
    ReadStorage { key: String, source: StoreError },

    #[snafu(display("EnvironmentError: Could not write '{key}' to storage"))]
    WriteStorage { key: String, source: StoreError },

    #[snafu(display("EnvironmentError: Could not remove '{key}' from storage"))]
    RemoveStorage { key: String, source: StoreError },

    #[snafu(display("EnvironmentError: Could not determine the current page host"))]
    Location { source: StoreError },

    /// The stored value is present but not a valid environment record.
    #[snafu(display("EnvironmentError: Stored '{key}' is not a valid environment record: {source}"))]
    Parse {
        key: String,
        source: serde_json::Error,
    },

    #[snafu(display("EnvironmentError: Could not serialize environment: {source}"))]
    Serialize { source: serde_json::Error },
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CookieError {
    #[snafu(display("CookieError: Could not resolve the cookie namespace"))]
    Environment { source: EnvironmentError },

    #[snafu(display("CookieError: Could not read cookies"))]
    ReadCookies { source: StoreError },

    #[snafu(display("CookieError: Could not write cookie '{name}'"))]
    WriteCookie { name: String, source: StoreError },

    #[snafu(display("CookieError: Expiry of cookie '{name}' is out of range"))]
    ExpiryOutOfRange { name: String },

    #[snafu(display("CookieError: Could not format expiry of cookie '{name}'"))]
    FormatExpiry {
        name: String,
        source: time::error::Format,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DerivedUrlError {
    #[snafu(display("DerivedUrlError: Could not parse '{url}'"))]
    Parsing {
        url: String,
        source: url::ParseError,
    },
}
