//! Server entrypoint: configuration, tracing, adapter wiring, axum serve.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use concierge::adapters::ai::{GeminiConfig, GeminiModel};
use concierge::adapters::http::{api_router, ChatHandlers, LeadHandlers};
use concierge::adapters::store::{ServiceAccountKey, SheetsConfig, SheetsLeadStore};
use concierge::application::SessionRegistry;
use concierge::config::AppConfig;

/// Built-in persona used when `ai.persona_path` is not configured.
const DEFAULT_PERSONA: &str = include_str!("../persona/default.md");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.server.log_level)?)
        .init();

    let persona = load_persona(&config)?;
    let model = build_model(&config);
    let registry = Arc::new(SessionRegistry::new(model, persona));
    let store = Arc::new(build_store(&config));

    let app = api_router(ChatHandlers::new(registry), LeadHandlers::new(store))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, model = %config.ai.model, "concierge listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// The persona is configuration data: read it from the configured file or
/// fall back to the bundled default. No special-casing anywhere else.
fn load_persona(config: &AppConfig) -> Result<String, Box<dyn std::error::Error>> {
    match &config.ai.persona_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read persona file {}: {}", path, e))?;
            tracing::info!(path = %path, "persona loaded from file");
            Ok(text)
        }
        None => Ok(DEFAULT_PERSONA.to_string()),
    }
}

fn build_model(config: &AppConfig) -> Arc<GeminiModel> {
    // validate() already guaranteed the key is present.
    let api_key = config.ai.api_key().unwrap_or_default();
    let gemini = GeminiConfig::new(api_key)
        .with_model(config.ai.model.clone())
        .with_timeout(config.ai.timeout())
        .with_max_output_tokens(config.ai.max_output_tokens);
    Arc::new(GeminiModel::new(gemini))
}

/// A misconfigured store must not take chat down: fall back to an
/// unconfigured store that reports `Unavailable` on the lead endpoints.
fn build_store(config: &AppConfig) -> SheetsLeadStore {
    if !config.store.has_spreadsheet() {
        tracing::warn!("no spreadsheet configured; lead persistence is disabled");
        return SheetsLeadStore::unconfigured("no spreadsheet configured");
    }
    let spreadsheet_id = config.store.spreadsheet_id.clone().unwrap_or_default();

    let key = match ServiceAccountKey::load(
        config.store.credentials_base64.as_deref(),
        Path::new(&config.store.credentials_path),
    ) {
        Ok(key) => key,
        Err(e) => {
            tracing::error!(error = %e, "lead store credentials failed to load");
            return SheetsLeadStore::unconfigured(e.to_string());
        }
    };

    let sheets = SheetsConfig::new(spreadsheet_id)
        .with_range(config.store.range.clone())
        .with_timeout(config.store.timeout());
    SheetsLeadStore::new(sheets, key)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        // Development default: open CORS, same as the reference frontend
        // expects when no origins are pinned.
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
