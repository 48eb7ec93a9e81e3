//! Client configuration parsed from environment variables.
//!
//! In the browser no variables are visible and every field takes its
//! default; natively (CLI, tests) each can be overridden.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::error::ConfigError;
use crate::guard::GuardPolicy;
use crate::routes::{ProtectionProfile, RouteName, RouteTable};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

const VAR_BASE_URL: &str = "TRAINER_API_BASE_URL";
const VAR_WITH_CREDENTIALS: &str = "TRAINER_WITH_CREDENTIALS";
const VAR_GUARD_POLICY: &str = "TRAINER_GUARD_POLICY";
const VAR_ROUTE_PROFILE: &str = "TRAINER_ROUTE_PROFILE";
const VAR_ADMIN_ROUTES: &str = "TRAINER_ADMIN_ROUTES";
const VAR_REQUEST_TIMEOUT: &str = "TRAINER_REQUEST_TIMEOUT_SECS";
const VAR_CONNECT_TIMEOUT: &str = "TRAINER_CONNECT_TIMEOUT_SECS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin every API path is joined onto. No trailing slash.
    pub api_base_url: String,
    /// Send cookies with every request (cookie store natively, `credentials: include` in the browser).
    pub with_credentials: bool,
    pub guard_policy: GuardPolicy,
    pub route_profile: ProtectionProfile,
    pub admin_routes: Vec<RouteName>,
    pub timeouts: Timeouts,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            with_credentials: true,
            guard_policy: GuardPolicy::default(),
            route_profile: ProtectionProfile::default(),
            admin_routes: Vec::new(),
            timeouts: Timeouts::default(),
        }
    }
}

impl ClientConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `TRAINER_API_BASE_URL`: default `http://127.0.0.1:5000`
    /// - `TRAINER_WITH_CREDENTIALS`: default `true`
    /// - `TRAINER_GUARD_POLICY`: `admin_aware` (default) or `lenient`
    /// - `TRAINER_ROUTE_PROFILE`: `protected` (default) or `open`
    /// - `TRAINER_ADMIN_ROUTES`: comma-separated route names, default none
    /// - `TRAINER_REQUEST_TIMEOUT_SECS`: default 10
    /// - `TRAINER_CONNECT_TIMEOUT_SECS`: default 5
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = var(VAR_BASE_URL)
            .map_or(defaults.api_base_url, |v| v.trim().trim_end_matches('/').to_owned());

        let with_credentials = match var(VAR_WITH_CREDENTIALS) {
            None => defaults.with_credentials,
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue { var: VAR_WITH_CREDENTIALS, value: raw })?,
        };

        let guard_policy = match var(VAR_GUARD_POLICY) {
            None => defaults.guard_policy,
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue { var: VAR_GUARD_POLICY, value: raw })?,
        };

        let route_profile = match var(VAR_ROUTE_PROFILE) {
            None => defaults.route_profile,
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue { var: VAR_ROUTE_PROFILE, value: raw })?,
        };

        let admin_routes = match var(VAR_ADMIN_ROUTES) {
            None => defaults.admin_routes,
            Some(raw) => parse_route_list(&raw)?,
        };

        let timeouts = Timeouts {
            request_secs: parse_u64(var(VAR_REQUEST_TIMEOUT), VAR_REQUEST_TIMEOUT, defaults.timeouts.request_secs)?,
            connect_secs: parse_u64(var(VAR_CONNECT_TIMEOUT), VAR_CONNECT_TIMEOUT, defaults.timeouts.connect_secs)?,
        };

        Ok(Self { api_base_url, with_credentials, guard_policy, route_profile, admin_routes, timeouts })
    }

    /// The route table this configuration describes.
    #[must_use]
    pub fn route_table(&self) -> RouteTable {
        RouteTable::standard(self.route_profile).with_admin_routes(&self.admin_routes)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_u64(raw: Option<String>, var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue { var, value: raw }),
    }
}

fn parse_route_list(raw: &str) -> Result<Vec<RouteName>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<RouteName>()
                .map_err(|name| ConfigError::UnknownRoute { var: VAR_ADMIN_ROUTES, name })
        })
        .collect()
}
