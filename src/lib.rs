pub mod api;
pub mod config;
pub mod graph;
pub mod model;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export the entity graph
pub use graph::{save_graph, Entity, Handle, OneToMany, PageGraph};

// Export store types
pub use store::{DocumentStore, MemoryStore, PostgresStore, Store};

use std::sync::Arc;

/// Router with state and CORS applied, ready to be served.
pub fn build_app<S: Store + 'static>(store: Arc<S>, config: &config::AppConfig) -> axum::Router {
    api::routes::create_router::<S>()
        .with_state(store)
        .layer(api::routes::cors_layer(&config.cors.allowed_origins))
}

/// Serve `store` on the configured address until the server stops.
pub async fn run_server<S: Store + 'static>(
    store: Arc<S>,
    config: &config::AppConfig,
) -> anyhow::Result<()> {
    use axum::serve;
    use tokio::net::TcpListener;

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("Page builder API running on http://{}", bind_address);

    serve(listener, build_app(store, config)).await?;

    Ok(())
}
