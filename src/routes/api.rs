use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers::sign;
use crate::state::AppState;
use std::sync::Arc;

/// Signing routes, one per remote protocol
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/xfyun/sign/iat", get(sign::sign_iat))
        .route("/api/v1/xfyun/sign/tts", get(sign::sign_tts))
        .route("/api/v1/xfyun/sign/rtasr", get(sign::sign_rtasr))
        .route("/api/v1/xfyun/sign/dts/create", get(sign::sign_dts_create))
        .route("/api/v1/xfyun/sign/dts/query", get(sign::sign_dts_query))
        .layer(TraceLayer::new_for_http())
}
