use std::sync::Arc;

use tracing::info;
use warp::Filter;

mod agents;
mod api;
mod blob_client;
mod chat_client;
mod config;
mod error;
mod middleware;
mod models;
mod orchestrator;
mod search_client;

use blob_client::{BlobClient, BlobStore};
use chat_client::{ChatClient, ChatCompletion};
use search_client::{WebSearch, WebSearchClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .init();

    info!("Starting Research Report Orchestrator");

    // Load configuration
    let config = config::Config::from_env()?;
    info!("Configuration loaded");

    // Collaborator clients
    let chat: Arc<dyn ChatCompletion> = Arc::new(ChatClient::new(&config)?);
    let search: Arc<dyn WebSearch> = Arc::new(WebSearchClient::new(&config)?);
    let blob: Arc<dyn BlobStore> = Arc::new(BlobClient::new(&config)?);
    info!("Collaborator clients ready");

    let orchestrator = Arc::new(orchestrator::Orchestrator::new(chat, search, blob));

    // Build API routes
    let api_routes = api::routes(orchestrator)
        .with(warp::log("api"))
        .with(middleware::cors());

    // Health check route
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::json(&serde_json::json!({"status": "healthy"})));

    // Metrics route
    let metrics = warp::path("metrics").and(warp::get()).map(|| {
        use prometheus::{Encoder, TextEncoder};
        let encoder = TextEncoder::new();
        let metric_families = prometheus::gather();
        let mut buffer = vec![];
        encoder.encode(&metric_families, &mut buffer).unwrap();
        warp::reply::with_header(buffer, "Content-Type", encoder.format_type())
    });

    let routes = health.or(metrics).or(api_routes);

    // Start server
    let addr = ([0, 0, 0, 0], config.port);
    info!("Server listening on {}", addr.1);

    warp::serve(routes).run(addr).await;

    Ok(())
}
