use std::sync::Arc;

use super::assembler::{self, SigningResult};
use super::clock::{Clock, SystemClock};
use super::credential::Credential;
use super::encryption::EncryptionGate;
use super::protocol::{Protocol, Strategy};
use crate::errors::SignResult;

/// Signing orchestrator.
///
/// Runs the linear pipeline for one call: read the clock once, assemble the
/// protocol's artifact with its strategy, pass it through the encryption
/// gate. Holds no per-call state, so one instance is shared by every
/// request.
#[derive(Clone)]
pub struct Signer {
    clock: Arc<dyn Clock>,
    gate: EncryptionGate,
}

impl Signer {
    /// Create a signer on the system clock.
    pub fn new(gate: EncryptionGate) -> Self {
        Self::with_clock(Arc::new(SystemClock), gate)
    }

    pub fn with_clock(clock: Arc<dyn Clock>, gate: EncryptionGate) -> Self {
        Self { clock, gate }
    }

    pub fn encryption_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    /// Produce the signed artifact for `protocol`.
    ///
    /// `authorization` is the caller's raw `Authorization` header; it is
    /// only read when the encryption gate is enabled.
    pub fn sign(
        &self,
        protocol: Protocol,
        credential: &Credential,
        authorization: Option<&str>,
    ) -> SignResult<SigningResult> {
        let now = self.clock.now();

        tracing::debug!(
            protocol = %protocol,
            app_id = %credential.app_id,
            strategy = ?protocol.strategy(),
            "Signing request"
        );

        let raw = match protocol.strategy() {
            Strategy::StreamingAuth => assembler::streaming_auth(protocol, credential, &now)?,
            Strategy::ElapsedTime => assembler::elapsed_time(protocol, credential, &now)?,
            Strategy::HttpDate => assembler::http_date(protocol, credential, &now)?,
        };

        self.gate.apply(raw, authorization)
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer").field("gate", &self.gate).finish()
    }
}
