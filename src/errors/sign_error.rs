use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Integer codes carried in the `errorCode` field of failure envelopes
pub mod error_codes {
    pub const SUCCESS: i32 = 0;
    pub const CONFIG_MISSING: i32 = 1001;
    pub const CRYPTO_FAILURE: i32 = 1002;
    pub const INVALID_AUTHORIZATION: i32 = 1003;
    pub const FIELD_ENCRYPTION: i32 = 1004;
}

/// Signing engine error types
///
/// Messages never carry secret material: credential errors name the missing
/// field, crypto errors name the primitive.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// A credential field required by the protocol is not configured
    #[error("Missing credential configuration: {0}")]
    ConfigMissing(String),

    /// A hash, MAC or cipher primitive rejected its key or input
    #[error("Crypto failure: {0}")]
    CryptoFailure(String),

    /// Encryption is enabled but the caller's bearer token cannot key it
    #[error("Invalid authorization: {0}")]
    InvalidAuthorization(String),

    /// A single result field could not be encrypted. Never returned from
    /// the orchestrator; the field is blanked instead.
    #[error("Failed to encrypt field '{field}': {reason}")]
    FieldEncryption { field: &'static str, reason: String },
}

impl SignError {
    /// Get the integer error code for the response envelope
    pub fn error_code(&self) -> i32 {
        match self {
            SignError::ConfigMissing(_) => error_codes::CONFIG_MISSING,
            SignError::CryptoFailure(_) => error_codes::CRYPTO_FAILURE,
            SignError::InvalidAuthorization(_) => error_codes::INVALID_AUTHORIZATION,
            SignError::FieldEncryption { .. } => error_codes::FIELD_ENCRYPTION,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SignError::InvalidAuthorization(_) => StatusCode::UNAUTHORIZED,
            SignError::ConfigMissing(_)
            | SignError::CryptoFailure(_)
            | SignError::FieldEncryption { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Log the error at the appropriate level
    pub fn log(&self) {
        match self {
            SignError::InvalidAuthorization(msg) => {
                tracing::debug!("Invalid authorization: {}", msg);
            }
            SignError::FieldEncryption { field, reason } => {
                tracing::warn!(field = %field, "Field encryption failed: {}", reason);
            }
            SignError::ConfigMissing(msg) => {
                tracing::error!("Credential configuration missing: {}", msg);
            }
            SignError::CryptoFailure(msg) => {
                tracing::error!("Crypto failure: {}", msg);
            }
        }
    }
}

impl IntoResponse for SignError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status_code();

        // Response format: {"errorCode": 1001, "message": "human readable message"}
        let body = Json(json!({
            "errorCode": self.error_code(),
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}

// Result type alias for convenience
pub type SignResult<T> = Result<T, SignError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn body_json(response: Response) -> serde_json::Value {
        let body_bytes = tokio_test::block_on(async {
            response.into_body().collect().await.unwrap().to_bytes()
        });
        serde_json::from_slice(&body_bytes).unwrap()
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SignError::ConfigMissing("iat.app_id".to_string()).error_code(),
            error_codes::CONFIG_MISSING
        );
        assert_eq!(
            SignError::CryptoFailure("hmac".to_string()).error_code(),
            error_codes::CRYPTO_FAILURE
        );
        assert_eq!(
            SignError::InvalidAuthorization("missing".to_string()).error_code(),
            error_codes::INVALID_AUTHORIZATION
        );
        assert_ne!(error_codes::SUCCESS, error_codes::CONFIG_MISSING);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            SignError::InvalidAuthorization("missing".to_string()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            SignError::ConfigMissing("dts.api_secret".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            SignError::CryptoFailure("aes".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SignError::ConfigMissing("tts.api_key".to_string()).to_string(),
            "Missing credential configuration: tts.api_key"
        );
        assert_eq!(
            SignError::FieldEncryption {
                field: "url",
                reason: "bad key".to_string()
            }
            .to_string(),
            "Failed to encrypt field 'url': bad key"
        );
    }

    #[test]
    fn test_into_response_invalid_authorization() {
        let response =
            SignError::InvalidAuthorization("Authorization header missing".to_string())
                .into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response);
        assert_eq!(body["errorCode"], 1003);
        assert_eq!(
            body["message"],
            "Invalid authorization: Authorization header missing"
        );
        assert!(body.get("data").is_none());
    }

    #[test]
    fn test_into_response_config_missing() {
        let response = SignError::ConfigMissing("rtasr.app_id".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response);
        assert_eq!(body["errorCode"], 1001);
        assert_eq!(
            body["message"],
            "Missing credential configuration: rtasr.app_id"
        );
    }
}
