use serde::{Deserialize, Serialize};

/// Fixed paths and keys of an API manager web app.
///
/// All derived URLs are built as `protocol + host + <path> [+ context_path]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// Key under which the environment record is persisted.
    pub storage_key: &'static str,

    /// Label of the environment used when nothing was persisted yet.
    pub default_label: &'static str,

    /// Token path stored in the default environment record.
    pub default_login_token_path: &'static str,

    pub protocol: &'static str,
    pub login: &'static str,
    pub logout: &'static str,
    pub login_token_path: &'static str,

    /// Path of the swagger definition. Not followed by `context_path`.
    pub swagger_yaml: &'static str,

    /// Suffix appended to the login, logout and token URLs, identifying the app.
    pub context_path: &'static str,
}

/// Configuration of the publisher app.
pub const PUBLISHER: AppConfig = AppConfig {
    storage_key: "environment",
    default_label: "Default",
    default_login_token_path: "/login/token",
    protocol: "https://",
    login: "/login/login",
    logout: "/login/logout",
    login_token_path: "/login/token",
    swagger_yaml: "/api/am/publisher/v1.0/apis/swagger.yaml",
    context_path: "/publisher",
};

impl Default for AppConfig {
    fn default() -> Self {
        PUBLISHER
    }
}

impl AppConfig {
    /// The environment used when none was persisted, bound to the given page host.
    pub fn default_environment(&self, host: impl Into<String>) -> Environment {
        Environment {
            label: self.default_label.to_owned(),
            host: host.into(),
            login_token_path: Some(self.default_login_token_path.to_owned()),
        }
    }
}

/// A named backend configuration. Its label namespaces all cookies of this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub label: String,

    /// Network host, e.g. "api.example.com:9443". Empty means "use the current page host".
    #[serde(default)]
    pub host: String,

    #[serde(
        rename = "loginTokenPath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub login_token_path: Option<String>,
}

impl Environment {
    /// An environment without a host, which will be bound to the page host when stored.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            host: String::new(),
            login_token_path: None,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_login_token_path(mut self, login_token_path: impl Into<String>) -> Self {
        self.login_token_path = Some(login_token_path.into());
        self
    }

    pub fn has_host(&self) -> bool {
        !self.host.is_empty()
    }
}

/// The publisher default record without a host. Required by the reactive storage layer.
impl Default for Environment {
    fn default() -> Self {
        PUBLISHER.default_environment(String::new())
    }
}
