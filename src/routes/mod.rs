//! HTTP API surface.
//!
//! ROUTE MAP
//! =========
//! - `GET  /healthz`                      — liveness probe
//! - `GET  /auth/github`                  — start GitHub OAuth
//! - `GET  /auth/github/callback`         — finish GitHub OAuth
//! - `POST /api/auth/email/request-code`  — email an access code
//! - `POST /api/auth/email/verify-code`   — exchange code for a session
//! - `GET  /api/auth/me`, `POST /api/auth/logout`
//! - `GET|PATCH /api/auth/profile`
//! - CRUD under `/api/tasks`, `/api/habits`, `/api/moods`, `/api/goals`,
//!   `/api/journals`
//! - `POST /api/habits/{id}/toggle`       — streak toggle
//! - `POST /api/nexus/chat`, `POST /api/journal/analyze`

pub mod auth;
pub mod goals;
pub mod habits;
pub mod journals;
pub mod moods;
pub mod nexus;
pub mod tasks;
pub mod users;

use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, patch, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

async fn healthz() -> &'static str {
    "ok"
}

/// CORS layer from `CORS_ALLOWED_ORIGINS` (comma-separated). Unset means
/// permissive, which suits local development; cookie auth in production
/// needs explicit origins.
fn cors_layer() -> CorsLayer {
    let Ok(raw) = std::env::var("CORS_ALLOWED_ORIGINS") else {
        return CorsLayer::permissive();
    };

    let origins: Vec<HeaderValue> = raw
        .split(',')
        .filter_map(|o| HeaderValue::from_str(o.trim()).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        // auth
        .route("/auth/github", get(auth::github_redirect))
        .route("/auth/github/callback", get(auth::github_callback))
        .route("/api/auth/email/request-code", post(auth::request_email_code))
        .route("/api/auth/email/verify-code", post(auth::verify_email_code))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        // profile
        .route(
            "/api/auth/profile",
            get(users::get_profile).patch(users::update_profile),
        )
        // flow
        .route("/api/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/api/tasks/{id}",
            patch(tasks::update_task).delete(tasks::delete_task),
        )
        // sequence
        .route("/api/habits", get(habits::list_habits).post(habits::create_habit))
        .route("/api/habits/{id}/toggle", post(habits::toggle_habit))
        .route("/api/habits/{id}", axum::routing::delete(habits::delete_habit))
        // pulse (append-only)
        .route("/api/moods", get(moods::list_moods).post(moods::create_mood))
        // horizon
        .route("/api/goals", get(goals::list_goals).post(goals::create_goal))
        .route(
            "/api/goals/{id}",
            patch(goals::update_goal).delete(goals::delete_goal),
        )
        // chronicle
        .route(
            "/api/journals",
            get(journals::list_entries).post(journals::create_entry),
        )
        .route(
            "/api/journals/{id}",
            get(journals::get_entry)
                .patch(journals::update_entry)
                .delete(journals::delete_entry),
        )
        // nexus
        .route("/api/nexus/chat", post(nexus::chat))
        .route("/api/journal/analyze", post(nexus::analyze_journal))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_helpers;

    #[tokio::test]
    async fn router_builds() {
        let _app = app(test_helpers::test_app_state());
    }
}
