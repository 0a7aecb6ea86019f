//! URLs of the login, logout, token and swagger endpoints of the configured environment.
//!
//! The `get_*` functions read the persisted environment on every call. The `*_for` variants
//! derive the same strings from an environment at hand.

use crate::config::{AppConfig, Environment};
use crate::environment::get_environment;
use crate::error::EnvironmentError;
use crate::store::Platform;

/// `https://{host}/login/login/publisher` for the publisher config.
pub fn app_login_url_for(config: &AppConfig, environment: &Environment) -> String {
    with_context_path(config, environment, config.login)
}

/// `https://{host}/login/logout/publisher` for the publisher config.
pub fn app_logout_url_for(config: &AppConfig, environment: &Environment) -> String {
    with_context_path(config, environment, config.logout)
}

/// `https://{host}/login/token/publisher` for the publisher config.
pub fn login_token_path_for(config: &AppConfig, environment: &Environment) -> String {
    with_context_path(config, environment, config.login_token_path)
}

/// `https://{host}/api/am/publisher/v1.0/apis/swagger.yaml` for the publisher config.
pub fn swagger_url_for(config: &AppConfig, environment: &Environment) -> String {
    format!(
        "{}{}{}",
        config.protocol, environment.host, config.swagger_yaml
    )
}

fn with_context_path(config: &AppConfig, environment: &Environment, path: &str) -> String {
    format!(
        "{}{}{path}{}",
        config.protocol, environment.host, config.context_path
    )
}

pub fn get_app_login_url(platform: &Platform<'_>) -> Result<String, EnvironmentError> {
    let environment = get_environment(platform)?;
    Ok(app_login_url_for(platform.config, &environment))
}

pub fn get_app_logout_url(platform: &Platform<'_>) -> Result<String, EnvironmentError> {
    let environment = get_environment(platform)?;
    Ok(app_logout_url_for(platform.config, &environment))
}

pub fn get_login_token_path(platform: &Platform<'_>) -> Result<String, EnvironmentError> {
    let environment = get_environment(platform)?;
    Ok(login_token_path_for(platform.config, &environment))
}

pub fn get_swagger_url(platform: &Platform<'_>) -> Result<String, EnvironmentError> {
    let environment = get_environment(platform)?;
    Ok(swagger_url_for(platform.config, &environment))
}
