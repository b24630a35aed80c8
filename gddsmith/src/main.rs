use std::sync::Arc;

use anyhow::Context;
use gddsmith::config::AppConfig;
use gddsmith::observability::init_tracing;
use gddsmith::pipeline::Orchestrator;
use gddsmith::providers::OpenAiProvider;
use gddsmith::server::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- Configuration ---
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    // --- Tracing ---
    init_tracing(config.log_format).context("failed to install tracing subscriber")?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        output_dir = %config.output_dir.display(),
        chat_model = %config.provider.chat_model,
        "Loaded configuration"
    );

    // --- Pipeline ---
    let provider = Arc::new(OpenAiProvider::new(config.provider.clone()));
    let orchestrator = Orchestrator::new(provider.clone(), provider, config.output_dir.clone());
    let app = router(AppState::new(orchestrator), &config.public_dir);

    // --- Serve ---
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Server running at http://localhost:{}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
