//! Versioning options
//!
//! Options are plain data: build them in code with the setters, or load them
//! from `APIVER_`-prefixed environment variables with the `config` feature.
//!
//! ```ignore
//! use apiver_core::{ApiVersion, UnspecifiedVersionPolicy, VersioningOptions};
//!
//! let options = VersioningOptions::new()
//!     .default_version(ApiVersion::new(2, 0))
//!     .unspecified_version(UnspecifiedVersionPolicy::Default);
//! ```

use crate::version::ApiVersion;
use serde::Deserialize;
#[cfg(feature = "config")]
use std::fmt;

/// How a request without a version token is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnspecifiedVersionPolicy {
    /// Use the endpoint's current version
    #[default]
    Current,
    /// Use the configured default version
    Default,
    /// Reject the request with `ApiVersionUnspecified`
    Reject,
}

/// Options shared by the selector and the route table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VersioningOptions {
    /// Version assumed when nothing else applies (defaults to 1.0)
    pub default_version: ApiVersion,
    /// Resolution rule for requests without a version
    pub unspecified_version: UnspecifiedVersionPolicy,
    /// Whether resolutions carry the supported/deprecated header lists
    pub report_api_versions: bool,
}

impl Default for VersioningOptions {
    fn default() -> Self {
        Self {
            default_version: ApiVersion::new(1, 0),
            unspecified_version: UnspecifiedVersionPolicy::Current,
            report_api_versions: true,
        }
    }
}

impl VersioningOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default version
    pub fn default_version(mut self, version: ApiVersion) -> Self {
        self.default_version = version;
        self
    }

    /// Set the policy for requests without a version
    pub fn unspecified_version(mut self, policy: UnspecifiedVersionPolicy) -> Self {
        self.unspecified_version = policy;
        self
    }

    /// Enable or disable version reporting headers
    pub fn report_api_versions(mut self, report: bool) -> Self {
        self.report_api_versions = report;
        self
    }
}

#[cfg(feature = "config")]
impl VersioningOptions {
    /// Load options from `APIVER_*` environment variables
    ///
    /// A `.env` file in the working directory is loaded first; variables
    /// already set in the environment take precedence. Unset variables keep
    /// their defaults.
    ///
    /// - `APIVER_DEFAULT_VERSION=2.0`
    /// - `APIVER_UNSPECIFIED_VERSION=current|default|reject`
    /// - `APIVER_REPORT_API_VERSIONS=true|false`
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_env_prefixed("APIVER")
    }

    /// Load options from environment variables with a custom prefix
    pub fn from_env_prefixed(prefix: &str) -> Result<Self, ConfigError> {
        envy::prefixed(format!("{}_", prefix))
            .from_env::<Self>()
            .map_err(ConfigError::from)
    }
}

/// Error type for configuration loading failures.
#[cfg(feature = "config")]
#[derive(Debug)]
pub enum ConfigError {
    /// Environment variable deserialization failed.
    EnvyError(envy::Error),
}

#[cfg(feature = "config")]
impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvyError(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

#[cfg(feature = "config")]
impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::EnvyError(e) => Some(e),
        }
    }
}

#[cfg(feature = "config")]
impl From<envy::Error> for ConfigError {
    fn from(err: envy::Error) -> Self {
        ConfigError::EnvyError(err)
    }
}
