use plan_server::config::ServerConfig;
use plan_server::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env().expect("Invalid server configuration");
    let addr = config.bind_addr;
    info!(
        %addr,
        max_plan_set_size = config.max_plan_set_size,
        "starting plan server"
    );

    // Build app state
    let state = AppState::new(config);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    info!("Plan parameter server listening on http://{addr}");
    info!("  GET  /health    - Health check");
    info!("  GET  /plan      - Resolve the first search request");
    info!("  GET  /plan/set  - Resolve every search request in a plan set");

    axum::serve(listener, app).await.expect("Server error");
}
