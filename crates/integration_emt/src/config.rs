//! EMT client configuration

use std::fmt;
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::models::MinuteStyle;

/// Configuration for the EMT Palma MAAS API client
#[derive(Clone, Serialize, Deserialize)]
pub struct EmtConfig {
    /// Base URL of the MAAS API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent with every request (sensitive - uses SecretString)
    #[serde(default = "default_api_token", skip_serializing)]
    pub api_token: SecretString,

    /// User agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of arrivals returned for a stop
    #[serde(default = "default_max_arrivals")]
    pub max_arrivals: usize,

    /// Maximum number of stops returned for a line
    #[serde(default = "default_max_stops")]
    pub max_stops: usize,

    /// Destination names longer than this are cut
    #[serde(default = "default_destination_max_chars")]
    pub destination_max_chars: usize,

    /// How minute countdowns are rendered ("5min" or "5'")
    #[serde(default)]
    pub minute_style: MinuteStyle,
}

fn default_base_url() -> String {
    "https://www.emtpalma.cat/maas/api/v1".to_string()
}

fn default_api_token() -> SecretString {
    SecretString::from("")
}

fn default_user_agent() -> String {
    "EMT-Palma-Client/1.0".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_max_arrivals() -> usize {
    8
}

const fn default_max_stops() -> usize {
    20
}

const fn default_destination_max_chars() -> usize {
    30
}

impl Default for EmtConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: default_api_token(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_arrivals: default_max_arrivals(),
            max_stops: default_max_stops(),
            destination_max_chars: default_destination_max_chars(),
            minute_style: MinuteStyle::default(),
        }
    }
}

impl fmt::Debug for EmtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmtConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"[REDACTED]")
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_arrivals", &self.max_arrivals)
            .field("max_stops", &self.max_stops)
            .field("destination_max_chars", &self.destination_max_chars)
            .field("minute_style", &self.minute_style)
            .finish()
    }
}

impl EmtConfig {
    /// Create a configuration for the given base URL and token
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: SecretString::from(api_token.into()),
            ..Default::default()
        }
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_token: SecretString::from("test-token"),
            timeout_secs: 2,
            ..Default::default()
        }
    }

    /// Load configuration from an optional `emt.toml` in the working
    /// directory, overridden by `EMT_*` environment variables
    /// (e.g. `EMT_API_TOKEN`, `EMT_TIMEOUT_SECS`).
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_layered("emt", None)
    }

    /// Layer an optional file under `EMT_*` variables
    ///
    /// `env` replaces the process environment when given. Values stay strings
    /// until deserialization, so a numeric token keeps its leading zeros.
    fn load_layered(
        file_name: &str,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(file_name).required(false))
            .add_source(
                config::Environment::with_prefix("EMT").source(env),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a specific file (format inferred from extension)
    pub fn from_file(path: &Path) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()
    }

    /// Get the token as a string reference (for API calls)
    #[must_use]
    pub fn api_token_str(&self) -> &str {
        self.api_token.expose_secret()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.api_token_str().trim().is_empty() {
            return Err("api_token must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.max_arrivals == 0 {
            return Err("max_arrivals must be greater than 0".to_string());
        }

        if self.max_stops == 0 {
            return Err("max_stops must be greater than 0".to_string());
        }

        if self.destination_max_chars == 0 {
            return Err("destination_max_chars must be greater than 0".to_string());
        }

        Ok(())
    }
}
