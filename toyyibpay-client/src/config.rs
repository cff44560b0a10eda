//! Client configuration.
//!
//! Configuration is TOML-deserializable so embedding applications can keep it
//! next to the rest of their settings. The shared secret is never part of it;
//! it is always passed to the client directly.

use std::{path::Path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::error::{Result, ToyyibPayError};

/// Production API root.
pub const PRODUCTION_BASE_URL: &str = "https://toyyibpay.com/index.php/api/";

/// Sandbox API root.
pub const SANDBOX_BASE_URL: &str = "https://dev.toyyibpay.com/index.php/api/";

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("toyyibpay-rs-client/", env!("CARGO_PKG_VERSION"));

/// Root client configuration.
///
/// # Examples
///
/// ```
/// use toyyibpay_client::ClientConfig;
///
/// let config = ClientConfig::from_toml(
///     r#"
///     base_url = "https://dev.toyyibpay.com/index.php/api/"
///     debug = true
///
///     [http]
///     timeout_secs = 20
///     "#,
/// )
/// .unwrap();
///
/// assert!(config.debug);
/// assert_eq!(config.http.timeout_secs, Some(20));
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root that endpoint names are joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User agent header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Emit request fields and raw response bodies as debug events.
    #[serde(default)]
    pub debug: bool,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            debug: false,
            http: HttpConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at the gateway's sandbox.
    #[must_use]
    pub fn sandbox() -> Self {
        Self { base_url: SANDBOX_BASE_URL.to_owned(), ..Self::default() }
    }

    /// Parses and validates configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ToyyibPayError::InvalidConfig`] if parsing or validation fails.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ToyyibPayError::InvalidConfig(format!("invalid TOML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ToyyibPayError::InvalidConfig`] if the file cannot be read or
    /// its contents are invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ToyyibPayError::InvalidConfig(format!("cannot read config file: {e}")))?;
        Self::from_toml(&content)
    }

    /// Validates the configuration.
    ///
    /// Checks that:
    /// - `base_url` is an absolute `http` or `https` URL
    /// - `user_agent` is not empty and has no control characters
    /// - HTTP timeouts are within range
    ///
    /// # Errors
    ///
    /// Returns [`ToyyibPayError::InvalidConfig`] describing the first problem.
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;

        if self.user_agent.trim().is_empty() {
            return Err(ToyyibPayError::InvalidConfig("user_agent must not be empty".to_owned()));
        }
        if self.user_agent.chars().any(char::is_control) {
            return Err(ToyyibPayError::InvalidConfig(
                "user_agent must not contain control characters".to_owned(),
            ));
        }

        self.http.validate()
    }

    /// Parses the base URL, adding the trailing `/` that endpoint joining needs.
    ///
    /// # Errors
    ///
    /// Returns [`ToyyibPayError::InvalidConfig`] if the URL is malformed or
    /// not `http`/`https`.
    pub fn base_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ToyyibPayError::InvalidConfig(format!("invalid base_url '{}': {e}", self.base_url))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ToyyibPayError::InvalidConfig(format!(
                "base_url must use http or https, got: {}",
                url.scheme()
            )));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }
}

/// HTTP transport settings.
///
/// Unset values fall back to reqwest's own defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    /// Total request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Connection timeout in seconds.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,

    /// Maximum idle connections kept per host.
    #[serde(default)]
    pub pool_max_idle_per_host: Option<usize>,
}

impl HttpConfig {
    /// Validates timeout values.
    ///
    /// # Errors
    ///
    /// Returns [`ToyyibPayError::InvalidConfig`] if a timeout is set outside:
    /// - `timeout_secs`: 1-300 seconds
    /// - `connect_timeout_secs`: 1-60 seconds
    pub fn validate(&self) -> Result<()> {
        if let Some(secs) = self.timeout_secs
            && !(1..=300).contains(&secs)
        {
            return Err(ToyyibPayError::InvalidConfig(
                "timeout_secs must be between 1 and 300".to_owned(),
            ));
        }
        if let Some(secs) = self.connect_timeout_secs
            && !(1..=60).contains(&secs)
        {
            return Err(ToyyibPayError::InvalidConfig(
                "connect_timeout_secs must be between 1 and 60".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Returns the connect timeout, if configured.
    #[must_use]
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}

fn default_base_url() -> String {
    PRODUCTION_BASE_URL.to_owned()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_owned()
}
