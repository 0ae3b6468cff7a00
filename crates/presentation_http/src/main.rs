//! VoxCare HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use ai_chat::{ChatCompletion, GroqChatProvider};
use ai_speech::GoogleSpeechProvider;
use presentation_http::{AppConfig, AppState, create_router};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voxcare_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("VoxCare v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load and validate configuration; missing credentials are fatal here
    // rather than surfacing per-request
    let config = AppConfig::load().map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    info!(
        host = %config.server.host,
        port = %config.server.port,
        model = %config.chat.model,
        voice = %config.speech.default_voice,
        "Configuration loaded"
    );

    // Initialize providers
    let chat_provider = GroqChatProvider::new(config.chat.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize chat provider: {e}"))?;
    let speech_provider = Arc::new(
        GoogleSpeechProvider::new(config.speech.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize speech provider: {e}"))?,
    );

    let chat: Arc<dyn ChatCompletion> = Arc::new(chat_provider);

    if chat.is_available().await {
        info!(model = %chat.model_name(), "Completion service reachable");
    } else {
        warn!("Completion service not reachable at startup, requests may fail");
    }

    // Create app state; the speech provider serves both STT and TTS
    let state = AppState {
        chat,
        stt: speech_provider.clone(),
        tts: speech_provider,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Configure CORS layer
    let cors_layer = if config.server.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    };

    // Add middleware (order matters: first added = outermost)
    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(RequestBodyLimitLayer::new(config.server.max_body_bytes));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}
