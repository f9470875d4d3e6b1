use clap::Parser;
use std::sync::Arc;

use ai_prompt_gateway::cache::CacheStore;
use ai_prompt_gateway::config::Args;
use ai_prompt_gateway::provider::OpenAiProvider;
use ai_prompt_gateway::state::AppState;
use ai_prompt_gateway::{app, logging, port};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    // parse cli arguments
    let args = Args::parse();
    logging::init();

    // connected once here, shared by every request, dropped on shutdown
    let cache = CacheStore::connect(&args.cache_config()).await;

    if args.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set, completion requests will fail");
    }
    let provider = Arc::new(OpenAiProvider::new(args.provider_config())?);

    let state = Arc::new(
        AppState::new(cache, provider).with_provider_timeout(args.provider_timeout()),
    );
    let router = app(state, &args.cors_origin)?;

    let listener = port::bind_available(&args.host, args.port, args.port_attempts).await?;
    let addr = listener.local_addr()?;

    tracing::info!(%addr, "Gateway running");
    tracing::info!(url = %args.openai_base_url, model = %args.model, "Forwarding completions");
    tracing::info!(
        backend = ?args.cache_backend,
        ttl_secs = args.cache_ttl,
        "Cache configured"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
