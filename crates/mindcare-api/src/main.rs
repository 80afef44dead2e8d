use std::env;

use tracing_subscriber::EnvFilter;

use mindcare_api::activity::{PRUNE_INTERVAL, spawn_session_pruner};
use mindcare_api::config::ServerConfig;
use mindcare_api::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ServerConfig::from_env()?;
    let state = AppState::from_config(&config).await?;
    spawn_session_pruner(state.sessions.clone(), PRUNE_INTERVAL);
    let app = mindcare_api::router(state);

    if env::var_os("AWS_LAMBDA_RUNTIME_API").is_some() {
        return lambda_http::run(app).await.map_err(|e| eyre::eyre!(e));
    }

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %config.bind, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
