pub mod config;
pub mod core;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export commonly used items for convenience
pub use config::ServerConfig;
pub use crate::core::{Protocol, Signer, SigningResult};
pub use errors::{SignError, SignResult};
pub use state::AppState;

use axum::Router;

/// Full application router: public health check plus the signing API
pub fn create_app(state: std::sync::Arc<AppState>) -> Router {
    let public_routes = Router::new().route("/", axum::routing::get(handlers::api::health_check));

    public_routes
        .merge(routes::api::create_api_router())
        .with_state(state)
}
