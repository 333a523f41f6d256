//! Orderly Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use orderly_engine::app::{App, AppDependencies};
use orderly_engine::infrastructure::{
    backends::{build_backends, Purpose},
    clock::SystemClock,
    config::EngineConfig,
    ledger::SqliteLedger,
    liveness::HttpLivenessProbe,
    nominatim::NominatimGeocoder,
    ports::ClockPort,
};
use orderly_engine::use_cases::generation::{FallbackController, RelaxationPolicy};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary is often run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orderly_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Orderly Engine");

    let config = EngineConfig::from_env()?;

    let suggestion_backends = build_backends(
        &config.suggestion_backends,
        &config.backends,
        Purpose::Suggestion,
    );
    let itinerary_backends = build_backends(
        &config.itinerary_backends,
        &config.backends,
        Purpose::Itinerary,
    );
    if suggestion_backends.is_empty() {
        anyhow::bail!("no suggestion backend is configured; set SUGGESTION_BACKENDS and its API keys");
    }
    if itinerary_backends.is_empty() {
        anyhow::bail!("no itinerary backend is configured; set ITINERARY_BACKENDS and its API keys");
    }

    let suggestion_controller = Arc::new(FallbackController::new(
        suggestion_backends,
        RelaxationPolicy::StrictThenRelaxed,
        config.backends.timeout,
    ));
    let itinerary_controller = Arc::new(FallbackController::new(
        itinerary_backends,
        RelaxationPolicy::SingleAttempt,
        config.backends.timeout,
    ));
    tracing::info!(
        suggestion = ?suggestion_controller.backend_ids(),
        itinerary = ?itinerary_controller.backend_ids(),
        timeout_secs = config.backends.timeout.as_secs(),
        "Generation backends configured"
    );

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

    tracing::info!(path = %config.ledger_db, "Opening suggestion ledger");
    let ledger = Arc::new(SqliteLedger::new(&config.ledger_db, clock.clone()).await?);

    let app = Arc::new(App::new(AppDependencies {
        suggestion_controller,
        itinerary_controller,
        geocoder: Arc::new(NominatimGeocoder::new(&config.nominatim_base_url)),
        liveness: Arc::new(HttpLivenessProbe::new()),
        suggestion_ledger: ledger.clone(),
        itinerary_ledger: ledger,
        clock,
    }));

    let mut router = orderly_engine::api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer_from_env() {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = config.bind_address().parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer_from_env() -> Option<CorsLayer> {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
