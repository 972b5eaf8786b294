use anyhow::Result;
use darkscan::{api, app_state::AppState, config::Config};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = Config::from_env()?;
    let state = AppState::new(config.clone());

    // Load eagerly so a missing model shows up in the startup log
    if let Err(err) = state.scanner() {
        warn!(error = %err, "classifier unavailable; scans are refused until training has run");
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %config.bind_addr(), "darkscan api listening");
    axum::serve(listener, api::router(state)).await?;
    Ok(())
}
