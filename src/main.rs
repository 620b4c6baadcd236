mod db;
mod llm;
mod rate_limit;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use crate::llm::LlmChat;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    // Initialize LLM client (non-fatal: Nexus features disabled if config missing).
    let llm: Option<Arc<dyn LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured — Nexus features disabled");
            None
        }
    };

    let github = services::auth::GitHubConfig::from_env();
    if github.is_none() {
        tracing::warn!("GitHub OAuth not configured — email sign-in only");
    }

    let state = state::AppState::new(pool, llm, github);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "continuity listening");
    axum::serve(listener, app).await.expect("server failed");
}
