//! Optional field-level encryption of signing results.
//!
//! When enabled, every value in a [`SigningResult`] is replaced by its
//! AES-128-ECB ciphertext (hex), keyed from the caller's own bearer token:
//! `md5_hex(token)[..16]`, after stripping a leading `Bearer ` scheme.
//!
//! A field whose encryption fails is blanked and the rest of the response is
//! still returned. A missing or empty bearer token fails the whole call.

use super::assembler::{ResultField, SigningResult};
use super::crypto::{AES_KEY_LEN, aes_ecb_encrypt_hex, md5_hex};
use crate::errors::{SignError, SignResult};

const BEARER_PREFIX: &str = "Bearer ";

/// Derive the 16-character field key from an `Authorization` header value.
pub fn derive_field_key(authorization: Option<&str>) -> SignResult<String> {
    let header = authorization.ok_or_else(|| {
        SignError::InvalidAuthorization("Authorization header is missing".to_string())
    })?;
    let token = header.strip_prefix(BEARER_PREFIX).unwrap_or(header);
    if token.is_empty() {
        return Err(SignError::InvalidAuthorization(
            "Authorization token is empty".to_string(),
        ));
    }

    let key: String = md5_hex(token).chars().take(AES_KEY_LEN).collect();
    if key.len() < AES_KEY_LEN {
        return Err(SignError::InvalidAuthorization(
            "Derived key is too short".to_string(),
        ));
    }
    Ok(key)
}

/// The encryption post-pass. Disabled gates pass results through untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncryptionGate {
    enabled: bool,
}

impl EncryptionGate {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn apply(
        &self,
        result: SigningResult,
        authorization: Option<&str>,
    ) -> SignResult<SigningResult> {
        if !self.enabled {
            return Ok(result);
        }

        let key = derive_field_key(authorization)?;
        tracing::debug!(fields = result.len(), "Encrypting signing result fields");
        Ok(encrypt_fields(result, |_, value| {
            aes_ecb_encrypt_hex(value, &key)
        }))
    }
}

/// Encrypt each field with `encrypt`. A failing field becomes an empty
/// string and the failure is logged.
fn encrypt_fields<F>(result: SigningResult, mut encrypt: F) -> SigningResult
where
    F: FnMut(ResultField, &str) -> SignResult<String>,
{
    result.map_values(|field, value| match encrypt(field, value.as_str()) {
        Ok(ciphertext) => ciphertext,
        Err(e) => {
            SignError::FieldEncryption {
                field: field.as_str(),
                reason: e.to_string(),
            }
            .log();
            String::new()
        }
    })
}
