/// Course service - main entry point
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use auth_core::TokenVerifier;
use course_service::{app, config::Config, AppState};
use entity_store::MemoryStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env().expect("Failed to load configuration from environment");

    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        verifier: Arc::new(TokenVerifier::new()),
    };

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Course service listening on {}", addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
