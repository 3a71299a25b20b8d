use std::env;

use super::utils::parse_bool;
use super::yaml::{CredentialYaml, YamlConfig};
use super::{CREDENTIAL_SECTIONS, CredentialConfig, ServerConfig};

/// Merge YAML configuration with environment variables
///
/// Priority order (highest to lowest):
/// 1. Environment variables
/// 2. YAML configuration values
/// 3. Default values
///
/// # Arguments
/// * `yaml_config` - Optional YAML configuration providing base values
///
/// # Returns
/// * `Result<ServerConfig, Box<dyn std::error::Error>>` - The merged configuration or an error
pub fn merge_config(
    yaml_config: Option<YamlConfig>,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let yaml = yaml_config.unwrap_or_default();

    // Helper macro to get value with priority: ENV > YAML > Default
    macro_rules! get_value {
        ($env_var:expr, $yaml_value:expr, $default:expr) => {
            env::var($env_var)
                .ok()
                .or($yaml_value)
                .unwrap_or_else(|| $default.to_string())
        };
    }

    // Server configuration
    let host = get_value!(
        "HOST",
        yaml.server.as_ref().and_then(|s| s.host.clone()),
        "0.0.0.0"
    );

    let port = if let Ok(port_str) = env::var("PORT") {
        port_str
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT environment variable: {e}"))?
    } else if let Some(yaml_port) = yaml.server.as_ref().and_then(|s| s.port) {
        yaml_port
    } else {
        3001
    };

    // Credential sections
    let xfyun = yaml.xfyun.unwrap_or_default();
    let [iat, tts, rtasr, dts] =
        CREDENTIAL_SECTIONS.map(|section| merge_credential(section, xfyun.section(section)));

    // Encryption gate, off unless explicitly enabled
    let encryption_enabled = match env::var("SIGN_ENCRYPTION_ENABLED") {
        Ok(value) => parse_bool("SIGN_ENCRYPTION_ENABLED", &value)?,
        Err(_) => yaml
            .encryption
            .as_ref()
            .and_then(|e| e.enabled)
            .unwrap_or(false),
    };

    Ok(ServerConfig {
        host,
        port,
        iat,
        tts,
        rtasr,
        dts,
        encryption_enabled,
    })
}

/// Merge one credential section: `XFYUN_{SECTION}_{FIELD}` > YAML
fn merge_credential(section: &str, yaml: Option<&CredentialYaml>) -> CredentialConfig {
    let prefix = format!("XFYUN_{}", section.to_uppercase());
    let from_env = |field: &str| env::var(format!("{prefix}_{field}")).ok();

    CredentialConfig {
        app_id: from_env("APP_ID").or_else(|| yaml.and_then(|c| c.app_id.clone())),
        api_key: from_env("API_KEY").or_else(|| yaml.and_then(|c| c.api_key.clone())),
        api_secret: from_env("API_SECRET").or_else(|| yaml.and_then(|c| c.api_secret.clone())),
    }
}
