/// Enrollment service - main entry point
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use auth_core::{SigningKeys, TokenVerifier};
use enrollment_service::{app, config::Config, peers::PeerClient, AppState};
use entity_store::MemoryStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env().expect("Failed to load configuration from environment");

    // This service holds its own key pair: it signs the service tokens it
    // presents to peers. Boot fails if the material is missing or invalid.
    let keys = Arc::new(SigningKeys::from_pem_files(
        &config.key_id,
        &config.jku(),
        &config.private_key_path,
        &config.public_key_path,
    )?);
    tracing::info!(kid = keys.kid(), jku = keys.jku(), "signing keys initialized");

    let peers = PeerClient::new(
        keys.clone(),
        config.student_service_url.clone(),
        config.course_service_url.clone(),
    );

    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        verifier: Arc::new(TokenVerifier::new()),
        keys,
        peers,
    };

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Enrollment service listening on {}", addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
