use axum::{
    extract::State,
    http::{HeaderMap, header::AUTHORIZATION},
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::core::{Protocol, SigningResult};
use crate::errors::{SignResult, error_codes};
use crate::state::AppState;

/// Success envelope: `{"errorCode": 0, "data": {...}}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignResponse {
    pub error_code: i32,
    pub data: SigningResult,
}

impl SignResponse {
    fn ok(data: SigningResult) -> Self {
        Self {
            error_code: error_codes::SUCCESS,
            data,
        }
    }
}

/// Raw `Authorization` header value, if present and valid UTF-8
fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

async fn sign(
    state: &AppState,
    protocol: Protocol,
    headers: &HeaderMap,
) -> SignResult<Json<SignResponse>> {
    let credential = state.config.credential(protocol)?;
    let result = state
        .signer
        .sign(protocol, &credential, authorization(headers))?;

    info!(
        protocol = %protocol,
        encrypted = state.signer.encryption_enabled(),
        fields = result.len(),
        "Issued signature"
    );

    Ok(Json(SignResponse::ok(result)))
}

/// Streaming speech recognition: returns `url`
pub async fn sign_iat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> SignResult<Json<SignResponse>> {
    sign(&state, Protocol::StreamAsr, &headers).await
}

/// Streaming speech synthesis: returns `url`
pub async fn sign_tts(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> SignResult<Json<SignResponse>> {
    sign(&state, Protocol::StreamTts, &headers).await
}

/// Continuous transcription: returns `url`, `appId`, `ts`, `signa`
pub async fn sign_rtasr(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> SignResult<Json<SignResponse>> {
    sign(&state, Protocol::ContinuousAsr, &headers).await
}

/// Long-form task creation: returns `url`, `host`, `date`, `authorization`
pub async fn sign_dts_create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> SignResult<Json<SignResponse>> {
    sign(&state, Protocol::LongFormCreate, &headers).await
}

/// Long-form task query: returns `url`, `host`, `date`, `authorization`
pub async fn sign_dts_query(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> SignResult<Json<SignResponse>> {
    sign(&state, Protocol::LongFormQuery, &headers).await
}
