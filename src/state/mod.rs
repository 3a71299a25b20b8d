use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::{EncryptionGate, Signer};

/// Application state that can be shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ServerConfig,
    /// Signing orchestrator, shared by every request
    pub signer: Signer,
}

impl AppState {
    /// Build state on the system clock, with the encryption gate taken from config
    pub fn new(config: ServerConfig) -> Arc<Self> {
        let signer = Signer::new(EncryptionGate::new(config.encryption_enabled));
        Self::with_signer(config, signer)
    }

    /// Build state around an already-configured signer
    pub fn with_signer(config: ServerConfig, signer: Signer) -> Arc<Self> {
        Arc::new(Self { config, signer })
    }
}
