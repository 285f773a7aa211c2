//! Recommendation server binary
//!
//! Run with: cargo run --bin staysense-server [config.toml]

use staysense::{config::AppConfig, server::ApiServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "staysense=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Optional config file path as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_file(&path)?,
        None => AppConfig::default(),
    };

    tracing::info!("Configuration loaded");
    tracing::info!("  - Document store: {}", config.store.db_path.display());
    tracing::info!("  - Embedding model: {}", config.llm.embed_model);
    tracing::info!("  - Summary model: {}", config.llm.generate_model);

    // Check Ollama availability up front; the server still starts without it
    let client = reqwest::Client::new();
    match client
        .get(format!("{}/api/tags", config.llm.base_url))
        .send()
        .await
    {
        Ok(resp) if resp.status().is_success() => {
            tracing::info!("Ollama is running at {}", config.llm.base_url);
        }
        _ => {
            tracing::warn!("Ollama not available at {}", config.llm.base_url);
            tracing::warn!("Summaries and personalized review selection will fail until it is up");
        }
    }

    let server = ApiServer::new(config)?;
    tracing::info!("API: http://{}", server.address());

    server.start().await?;

    Ok(())
}
