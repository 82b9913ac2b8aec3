use bike_dashboard::config::log_filter;
use bike_dashboard::{load_dataset, router, AppState, Config};
use std::{env, net::SocketAddr};
use tracing::{error, info};
use tracing_subscriber::fmt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    fmt()
        .with_env_filter(log_filter(env::var("RUST_LOG").ok()))
        .init();

    let config = Config::from_env()?;
    config.log_config();

    let dataset = load_dataset(&config).await.inspect_err(|err| {
        error!("failed to load bike sharing data: {err}");
    })?;
    let state = AppState::new(dataset)?;
    let (min_date, max_date) = state.bounds;
    info!("dataset covers {min_date} to {max_date}");

    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
