use std::net::SocketAddr;

use clipgate_providers::VideoProvider;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clipgate_api::config::ServerConfig;
use clipgate_api::state::AppState;
use clipgate_api::app;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "clipgate_api=debug,clipgate_providers=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        default_provider = %config.default_provider,
        "Loaded server configuration",
    );

    // --- Writable static tree for tts/mux artifacts ---
    for dir in [config.tts_dir(), config.mux_dir()] {
        tokio::fs::create_dir_all(&dir)
            .await
            .expect("Failed to create static directory");
    }

    // --- App state (provider clients, cache, shared HTTP client) ---
    let state = AppState::from_env(config.clone());
    tracing::info!(
        kie_auth = state.kie.has_credentials(),
        fal_auth = state.fal.has_credentials(),
        eleven_key = state.eleven.has_credentials(),
        mux_enabled = config.enable_mux,
        "Upstream configuration loaded",
    );

    // --- Router ---
    let app = app::build_app(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
