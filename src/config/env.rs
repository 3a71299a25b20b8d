use super::ServerConfig;
use super::merge::merge_config;

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Reads configuration from environment variables, with sensible defaults.
    /// Also loads from .env file if present using dotenvy.
    ///
    /// # Returns
    /// * `Result<Self, Box<dyn std::error::Error>>` - The loaded configuration or an error
    ///
    /// # Errors
    /// Returns an error if:
    /// - `PORT` is not a valid port number
    /// - `SIGN_ENCRYPTION_ENABLED` is not a recognised boolean
    /// - A credential variable is set to a blank value
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let config = merge_config(None)?;
        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Protocol;
    use serial_test::serial;
    use std::env;

    fn cleanup_env_vars() {
        unsafe {
            env::remove_var("HOST");
            env::remove_var("PORT");
            env::remove_var("SIGN_ENCRYPTION_ENABLED");
            env::remove_var("XFYUN_IAT_APP_ID");
            env::remove_var("XFYUN_IAT_API_KEY");
            env::remove_var("XFYUN_IAT_API_SECRET");
            env::remove_var("XFYUN_RTASR_APP_ID");
            env::remove_var("XFYUN_RTASR_API_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        cleanup_env_vars();

        let config = ServerConfig::from_env().expect("Should load config");
        assert_eq!(config.address(), "0.0.0.0:3001");
        assert!(!config.encryption_enabled);

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_credentials() {
        cleanup_env_vars();

        unsafe {
            env::set_var("PORT", "8088");
            env::set_var("XFYUN_IAT_APP_ID", "iat-app");
            env::set_var("XFYUN_IAT_API_KEY", "iat-key");
            env::set_var("XFYUN_IAT_API_SECRET", "iat-secret");
            env::set_var("XFYUN_RTASR_APP_ID", "rtasr-app");
            env::set_var("XFYUN_RTASR_API_KEY", "rtasr-key");
            env::set_var("SIGN_ENCRYPTION_ENABLED", "true");
        }

        let config = ServerConfig::from_env().expect("Should load config");
        assert_eq!(config.port, 8088);
        assert!(config.encryption_enabled);

        let iat = config.credential(Protocol::StreamAsr).unwrap();
        assert_eq!(iat.app_id, "iat-app");
        assert_eq!(iat.api_secret.as_deref(), Some("iat-secret"));

        let rtasr = config.credential(Protocol::ContinuousAsr).unwrap();
        assert_eq!(rtasr.api_key, "rtasr-key");
        assert!(rtasr.api_secret.is_none());

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_blank_credential_rejected() {
        cleanup_env_vars();

        unsafe {
            env::set_var("XFYUN_IAT_API_KEY", "");
        }

        let err = ServerConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("xfyun.iat.api_key"));

        cleanup_env_vars();
    }
}
