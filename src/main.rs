use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;

use trip_journal::{
    create_mongo_repository, create_prom_metrics, create_router, AppConfig, AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;

    // A store that cannot be reached at startup is fatal; the process exits
    // with the connection error instead of serving requests it cannot back.
    let repository = create_mongo_repository(&config.mongo).await?;
    let metrics = create_prom_metrics()?;

    let state = AppState::new(repository, metrics);
    let app = create_router(state, &config.server.allowed_origins)?;

    let listener = TcpListener::bind(("0.0.0.0", config.server.port)).await?;
    info!("Server started at http://localhost:{}", config.server.port);
    info!(
        "Metrics available at http://localhost:{}/metrics",
        config.server.port
    );

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,trip_journal=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
