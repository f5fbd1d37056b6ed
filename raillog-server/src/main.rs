use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use raillog_server::canonical::ModelCanonicalizer;
use raillog_server::config::ServerConfig;
use raillog_server::providers::{ProviderClient, ProviderClientConfig, ProviderSource};
use raillog_server::resolver::Resolver;
use raillog_server::trips::InMemoryTripStore;
use raillog_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");
    let timeout_secs = config.providers.timeout_secs;

    // Build one pooled client per provider
    let sources: Vec<Arc<dyn ProviderSource>> = config
        .providers
        .descriptors()
        .into_iter()
        .map(|descriptor| {
            let client_config = ProviderClientConfig::new(descriptor).with_timeout(timeout_secs);
            ProviderClient::new(client_config)
                .map(|client| Arc::new(client) as Arc<dyn ProviderSource>)
        })
        .collect::<Result<_, _>>()
        .expect("Failed to create provider client");

    // Bound each attempt slightly above the HTTP timeout, covering body reads
    let resolver = Resolver::new(sources, ModelCanonicalizer::default())
        .with_attempt_timeout(Duration::from_secs(timeout_secs.saturating_add(1)));
    info!(providers = ?resolver.provider_names(), "provider chain configured");

    let state = AppState::new(resolver, InMemoryTripStore::new());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listener");
    info!("Rail trip log listening on http://{}", config.bind_addr);
    info!("  GET  /health             - Health check");
    info!("  GET  /api/rolling-stock  - Look up rolling stock (trainNumber, date)");
    info!("  GET  /api/trips          - List trip records");
    info!("  POST /api/trips          - Save a trip record");

    axum::serve(listener, app).await.expect("Server error");
}
