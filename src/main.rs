//! Reflection Coach server
//!
//! Serves the hybrid dialogue engine over HTTP. Configuration comes from
//! `REFLECTION_COACH__*` environment variables (see [`AppConfig::load`]).

use std::sync::Arc;

use axum::http::HeaderValue;
use reflection_coach::adapters::ai::{OpenAIConfig, OpenAIProvider};
use reflection_coach::adapters::http::{dialogue_router, DialogueAppState};
use reflection_coach::application::HybridOrchestrator;
use reflection_coach::config::{AppConfig, ServerConfig};
use reflection_coach::domain::dialogue::{DialogueMatcher, MotivationClassifier, ScriptRegistry};
use reflection_coach::ports::AIProvider;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);

    // Scripts are validated here; a bad built-in script stops startup.
    let registry = Arc::new(ScriptRegistry::builtin()?);
    tracing::info!(scripts = registry.len(), "script registry loaded");

    let classifier =
        MotivationClassifier::new().with_ambiguous_default(config.dialogue.ambiguous_motivation);
    let matcher = DialogueMatcher::new(registry).with_classifier(classifier);

    let mut orchestrator = HybridOrchestrator::new(matcher)
        .with_timeout(config.ai.timeout())
        .with_live_enabled(config.ai.enabled);

    match config.ai.openai_api_key() {
        Some(key) => {
            let provider = OpenAIProvider::new(
                OpenAIConfig::new(key)
                    .with_model(config.ai.model.clone())
                    .with_base_url(config.ai.base_url.clone())
                    .with_timeout(config.ai.timeout()),
            )?;
            let info = provider.provider_info();
            tracing::info!(
                provider = %info.name,
                model = %info.model,
                timeout_secs = config.ai.timeout_secs,
                enabled = config.ai.enabled,
                "live replies configured"
            );
            orchestrator = orchestrator.with_live_provider(Arc::new(provider));
        }
        None => {
            tracing::warn!("No OpenAI API key configured; serving scripted replies only.");
        }
    }

    let app = dialogue_router(DialogueAppState::new(orchestrator))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    tracing::info!(
        environment = ?config.server.environment,
        "Reflection Coach listening on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| server.log_level.as_str().into());

    let json = server.json_logs();
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().pretty()))
        .init();
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
