//! HTTP server for the payroll settlement engine.

use settlement_engine::api::{AppState, create_router};
use settlement_engine::config::ConfigLoader;
use settlement_engine::store::InMemoryStore;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "settlement_engine=info,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir =
        std::env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| "./config/payroll".to_string());
    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    info!(config_dir = %config_dir, "Loading payroll configuration");
    let config = ConfigLoader::load(&config_dir)?;
    let store = InMemoryStore::load(&config_dir, &config)?;
    info!(
        company = %config.company().name,
        agreements = config.config().agreements().len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config, store));

    let listener = TcpListener::bind(&bind_address).await?;
    info!("Settlement API listening on http://{}", bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}
