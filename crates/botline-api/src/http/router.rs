//! Axum router configuration with middleware.
//!
//! Middleware: CORS, tracing. The `/whatsapp/webhook` routes are mounted
//! only when the channel is configured.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/gupshup-webhook", post(handlers::webhook::gupshup_webhook))
        .route("/health", get(health_check));

    if state.whatsapp.is_some() {
        router = router.route(
            "/whatsapp/webhook",
            get(handlers::whatsapp::verify).post(handlers::whatsapp::receive),
        );
        tracing::info!("WhatsApp webhook routes enabled");
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
