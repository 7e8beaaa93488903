//! jobnorm HTTP server — batch job-posting normalization over REST.

mod app;

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_subscriber::EnvFilter;

use jobnorm_core::Pipeline;
use jobnorm_directory::DirectoryClient;
use jobnorm_llm::ExtractionClient;
use jobnorm_shared::config::{load_config, validate_api_keys};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,jobnorm=debug".into()),
        )
        .init();

    let config = load_config().wrap_err("failed to load configuration")?;
    validate_api_keys(&config)?;

    let primary = ExtractionClient::primary(&config.extraction)?;
    let fallback = ExtractionClient::fallback(&config.extraction)?;
    let directory = DirectoryClient::from_config(&config.directory)?;

    let pipeline = Arc::new(
        Pipeline::new(primary, fallback, directory)
            .with_max_extract_attempts(config.extraction.max_attempts),
    );

    let app = app::router(pipeline);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .wrap_err_with(|| format!("failed to bind {}", config.server.bind_addr))?;

    info!(addr = %config.server.bind_addr, "jobnorm server listening");
    axum::serve(listener, app).await.wrap_err("server error")?;

    Ok(())
}
