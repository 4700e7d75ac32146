use forest_cover_predictor::{
    api::{build_router, AppState},
    config::{Config, ObservabilityConfig},
    ml::ModelArtifacts,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Using default configuration");
        Config::default()
    });

    init_tracing(&config.observability);

    tracing::info!(
        "Starting Forest Cover Type Predictor v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Without both artifacts no prediction is possible
    let artifacts = match ModelArtifacts::load(&config.models) {
        Ok(artifacts) => artifacts,
        Err(e) => {
            tracing::error!("Failed to load model artifacts: {}", e);
            return Err(e.into());
        }
    };
    tracing::info!("✅ Model artifacts loaded");

    let app_state = AppState::from_config(&config, artifacts);
    tracing::info!(
        steps = config.progress.steps,
        step_delay_ms = config.progress.step_delay_ms,
        "✅ Progress indicator configured"
    );
    tracing::info!(
        idle_timeout_secs = config.session.idle_timeout_secs,
        max_sessions = config.session.max_sessions,
        "✅ Session store initialized"
    );

    let app = build_router(app_state);

    let http_addr = config.http_addr();
    let http_listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("🚀 HTTP server listening on http://{}", http_addr);
    tracing::info!("   Form: http://{}/", http_addr);
    tracing::info!("   History: http://{}/history", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   REST API: http://{}/v1/predictions", http_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(http_listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down gracefully...");
    Ok(())
}

fn init_tracing(observability: &ObservabilityConfig) {
    let default_filter = format!(
        "forest_cover_predictor={},tower_http={}",
        observability.log_level, observability.log_level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if observability.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
