//! Configuration module for the signing server
//!
//! This module handles server configuration from various sources: YAML files and
//! environment variables. Environment variables always override YAML values.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//! - `utils`: Utility functions for configuration parsing
//!
//! # Example
//! ```rust,no_run
//! use xfyun_sign::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use crate::core::{Credential, Protocol};
use crate::errors::{SignError, SignResult};

mod env;
mod merge;
mod utils;
mod validation;
mod yaml;

/// Credential section names, in the order `ServerConfig` stores them
pub(crate) const CREDENTIAL_SECTIONS: [&str; 4] = ["iat", "tts", "rtasr", "dts"];

/// One credential section as loaded, before per-protocol requirements apply
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialConfig {
    pub app_id: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

impl std::fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("app_id", &self.app_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Server configuration
///
/// Contains all configuration needed to run the signing server:
/// - Server settings (host, port)
/// - One credential section per remote service family
/// - The result encryption switch
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // Credential sections
    pub iat: CredentialConfig,
    pub tts: CredentialConfig,
    pub rtasr: CredentialConfig,
    /// Shared by long-form create and query
    pub dts: CredentialConfig,

    // Result encryption
    pub encryption_enabled: bool,
}

impl ServerConfig {
    /// Load configuration from a YAML file with environment variable overrides
    ///
    /// Priority order (highest to lowest):
    /// 1. Environment variables
    /// 2. YAML file values
    /// 3. Default values
    ///
    /// After loading and merging, performs validation on the final configuration.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        // .env is not consulted here; only real environment variables override the file.
        let yaml_config = yaml::YamlConfig::from_file(path)?;

        let config = merge::merge_config(Some(yaml_config))?;
        config.validate()?;

        Ok(config)
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Raw credential section backing a protocol
    pub fn credential_config(&self, protocol: Protocol) -> &CredentialConfig {
        match protocol {
            Protocol::StreamAsr => &self.iat,
            Protocol::StreamTts => &self.tts,
            Protocol::ContinuousAsr => &self.rtasr,
            Protocol::LongFormCreate | Protocol::LongFormQuery => &self.dts,
        }
    }

    /// Resolve the credential a protocol signs with
    ///
    /// `app_id` and `api_key` are always required; `api_secret` is required
    /// unless the protocol signs without one.
    ///
    /// # Errors
    /// Returns `SignError::ConfigMissing` naming the first missing setting,
    /// e.g. `iat.api_secret`.
    ///
    /// # Example
    /// ```rust,no_run
    /// use xfyun_sign::config::ServerConfig;
    /// use xfyun_sign::core::Protocol;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ServerConfig::from_env()?;
    /// let credential = config.credential(Protocol::StreamTts)?;
    /// println!("{credential:?}");
    /// # Ok(())
    /// # }
    /// ```
    pub fn credential(&self, protocol: Protocol) -> SignResult<Credential> {
        let section = protocol.credential_section();
        let raw = self.credential_config(protocol);

        let require = |name: &str, value: &Option<String>| {
            value
                .clone()
                .ok_or_else(|| SignError::ConfigMissing(format!("{section}.{name}")))
        };

        let app_id = require("app_id", &raw.app_id)?;
        let api_key = require("api_key", &raw.api_key)?;
        let api_secret = if protocol.requires_api_secret() {
            Some(require("api_secret", &raw.api_secret)?)
        } else {
            raw.api_secret.clone()
        };

        Ok(Credential::new(app_id, api_key, api_secret))
    }

    /// Protocols that cannot currently be signed for lack of credentials
    pub fn missing_credentials(&self) -> Vec<Protocol> {
        Protocol::ALL
            .into_iter()
            .filter(|protocol| self.credential(*protocol).is_err())
            .collect()
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        validation::validate_host(&self.host)?;
        for (section, credential) in CREDENTIAL_SECTIONS
            .into_iter()
            .zip([&self.iat, &self.tts, &self.rtasr, &self.dts])
        {
            validation::validate_credential(section, credential)?;
        }
        Ok(())
    }
}
