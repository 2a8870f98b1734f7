//! PTV client configuration

use std::fmt;
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::signer::DEFAULT_HOST;

/// Environment variable prefix, e.g. `PTV_DEVELOPER_ID`
const ENV_PREFIX: &str = "PTV";

/// Configuration for the PTV Timetable API client
#[derive(Clone, Serialize, Deserialize)]
pub struct PtvConfig {
    /// Developer id issued by PTV, sent as `devid`
    #[serde(default)]
    pub developer_id: Option<String>,

    /// Developer key used to sign requests (sensitive - never sent)
    #[serde(default, skip_serializing)]
    pub developer_key: Option<SecretString>,

    /// API host without scheme
    #[serde(default = "default_host")]
    pub host: String,

    /// Use `https://` for generated URLs
    #[serde(default = "default_use_https")]
    pub use_https: bool,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Overall request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl fmt::Debug for PtvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PtvConfig")
            .field("developer_id", &self.developer_id)
            .field("developer_key", &"[REDACTED]")
            .field("host", &self.host)
            .field("use_https", &self.use_https)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

const fn default_use_https() -> bool {
    true
}

const fn default_connect_timeout_secs() -> u64 {
    5
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for PtvConfig {
    fn default() -> Self {
        Self {
            developer_id: None,
            developer_key: None,
            host: default_host(),
            use_https: default_use_https(),
            connect_timeout_secs: default_connect_timeout_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl PtvConfig {
    /// Create a configuration with credentials and default transport settings
    #[must_use]
    pub fn new(developer_id: impl Into<String>, developer_key: impl Into<String>) -> Self {
        Self {
            developer_id: Some(developer_id.into()),
            developer_key: Some(SecretString::from(developer_key.into())),
            ..Default::default()
        }
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            connect_timeout_secs: 1,
            timeout_secs: 5,
            ..Self::new("1", "test")
        }
    }

    /// Load from an optional `ptv.toml` in the working directory, then `PTV_*` env vars
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or does not deserialize.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(
            config::File::with_name("ptv").required(false),
            Self::environment(),
        )
    }

    /// Load from the given file, then `PTV_*` env vars
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or does not deserialize.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path.as_ref()), Self::environment())
    }

    /// `PTV_*` variables, e.g. `PTV_DEVELOPER_KEY`
    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }

    fn build(
        file: impl config::Source + Send + Sync + 'static,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// Check whether both credentials are present and non-empty
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.developer_id.as_deref().is_some_and(|id| !id.is_empty())
            && self
                .developer_key
                .as_ref()
                .is_some_and(|key| !key.expose_secret().is_empty())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.has_credentials() {
            return Err("developer_id and developer_key must be set".to_string());
        }

        if self.host.is_empty() {
            return Err("host must not be empty".to_string());
        }

        if self.host.contains("://") {
            return Err("host must not include a scheme; use use_https".to_string());
        }

        if self.connect_timeout_secs == 0 {
            return Err("connect_timeout_secs must be greater than 0".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
