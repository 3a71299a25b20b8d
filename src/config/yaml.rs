use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Environment
/// variables override any values specified here.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 3001
///
/// xfyun:
///   iat:
///     app_id: "your-app-id"
///     api_key: "your-api-key"
///     api_secret: "your-api-secret"
///   tts:
///     app_id: "your-app-id"
///     api_key: "your-api-key"
///     api_secret: "your-api-secret"
///   rtasr:
///     app_id: "your-app-id"
///     api_key: "your-api-key"
///   dts:
///     app_id: "your-app-id"
///     api_key: "your-api-key"
///     api_secret: "your-api-secret"
///
/// encryption:
///   enabled: false
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub xfyun: Option<XfyunYaml>,
    pub encryption: Option<EncryptionYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Per-protocol credential sections from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct XfyunYaml {
    pub iat: Option<CredentialYaml>,
    pub tts: Option<CredentialYaml>,
    pub rtasr: Option<CredentialYaml>,
    pub dts: Option<CredentialYaml>,
}

impl XfyunYaml {
    /// Look up a credential section by name (`iat`, `tts`, `rtasr`, `dts`)
    pub fn section(&self, name: &str) -> Option<&CredentialYaml> {
        match name {
            "iat" => self.iat.as_ref(),
            "tts" => self.tts.as_ref(),
            "rtasr" => self.rtasr.as_ref(),
            "dts" => self.dts.as_ref(),
            _ => None,
        }
    }
}

/// One credential section
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CredentialYaml {
    pub app_id: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

/// Encryption gate configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct EncryptionYaml {
    pub enabled: Option<bool>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the YAML is malformed.
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}
