//! Axum router configuration with middleware.
//!
//! All routes are under `/api/`. Middleware: CORS, request tracing.
//! Every route except registration, login, the public widget endpoint,
//! and `/health` requires a session token.

use axum::Router;
use axum::routing::{get, patch, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Authentication
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        // Dashboard
        .route("/dashboard", get(handlers::dashboard::summary))
        // Chatbot CRUD
        .route(
            "/chatbots",
            get(handlers::chatbot::list).post(handlers::chatbot::create),
        )
        .route(
            "/chatbots/{id}",
            get(handlers::chatbot::get)
                .patch(handlers::chatbot::update)
                .delete(handlers::chatbot::delete),
        )
        // Templates
        .route("/templates", get(handlers::template::list))
        // Public widget endpoint (no session required)
        .route("/chatbot/response", post(handlers::widget::respond))
        // Analytics
        .route("/analytics", get(handlers::analytics::report))
        // Billing
        .route("/billing", get(handlers::billing::overview))
        .route("/billing/upgrade", post(handlers::billing::upgrade))
        // Profile
        .route(
            "/profile",
            get(handlers::profile::get).patch(handlers::profile::update),
        )
        .route("/profile/password", patch(handlers::profile::change_password))
        // Settings
        .route("/settings", get(handlers::settings::get))
        .route("/settings/api", patch(handlers::settings::update_api))
        .route(
            "/settings/notifications",
            patch(handlers::settings::update_notifications),
        )
        .route(
            "/settings/appearance",
            patch(handlers::settings::update_appearance),
        )
        // AI utilities
        .route("/generate/persona", post(handlers::ai::generate_persona))
        .route("/embeddings", post(handlers::ai::embed))
        .route("/ai/models", get(handlers::ai::list_models));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - liveness check, no auth required.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
