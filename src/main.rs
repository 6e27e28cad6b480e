use page_builder_api::config::{AppConfig, StoreBackend};
use page_builder_api::store::{MemoryStore, PostgresStore};
use page_builder_api::run_server;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with explicit filter to suppress sqlx debug logs
    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("sqlx", LevelFilter::Warn)
        .parse_default_env()
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    log::info!(
        "Configuration loaded: server={}:{}, backend={:?}",
        config.server.host,
        config.server.port,
        config.database.backend
    );

    match config.database.backend {
        StoreBackend::Memory => {
            log::info!("Using in-memory document store");
            run_server(Arc::new(MemoryStore::new()), &config).await?;
        }
        StoreBackend::Postgres => {
            log::info!("Connecting to PostgreSQL...");
            let database_url = config.database_url()?;
            let postgres_store = PostgresStore::new(&database_url, config.max_connections()).await?;

            log::info!("Running database migrations...");
            postgres_store.migrate().await?;

            run_server(Arc::new(postgres_store), &config).await?;
        }
    }

    Ok(())
}
