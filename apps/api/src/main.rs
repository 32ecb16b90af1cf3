mod analysis;
mod config;
mod errors;
mod generation;
mod interview;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interview::controller::InterviewController;
use crate::interview::gate::{FollowupGate, NeedsFollowupGate, ProbabilisticGate};
use crate::llm_client::{CompletionService, LlmClient};
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Fails fast when the credential is missing or a value is malformed
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(
        config.llm_api_url.clone(),
        config.llm_api_key.clone(),
        config.llm_model.clone(),
        config.llm_timeout,
    )?;
    info!(
        "LLM client initialized (model: {}, timeout: {:?})",
        llm.model(),
        config.llm_timeout
    );
    let llm: Arc<dyn CompletionService> = Arc::new(llm);

    let gate: Arc<dyn FollowupGate> = match config.followup_probability {
        Some(p) => {
            let gate = ProbabilisticGate::new(p);
            info!("Follow-up gate: probabilistic (p = {})", gate.probability());
            Arc::new(gate)
        }
        None => {
            info!("Follow-up gate: every flagged answer");
            Arc::new(NeedsFollowupGate)
        }
    };

    let controller = InterviewController::new(llm, gate, config.interview);
    let settings = controller.settings();
    info!(
        "Interview settings: max {} / min {} questions, {:?} termination",
        settings.max_questions, settings.min_questions, settings.termination_policy
    );

    let sessions = SessionStore::new();
    spawn_idle_sweep(sessions.clone(), config.session_idle_ttl);

    let state = AppState {
        sessions,
        controller: Arc::new(controller),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the chat frontend has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drops sessions idle for longer than `idle_ttl`.
fn spawn_idle_sweep(sessions: SessionStore, idle_ttl: Duration) {
    let period = (idle_ttl / 4).clamp(Duration::from_secs(1), Duration::from_secs(300));
    info!("Session idle TTL: {:?} (sweep every {:?})", idle_ttl, period);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            sessions.purge_idle(idle_ttl);
        }
    });
}
