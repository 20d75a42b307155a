/// Auth service - main entry point
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use auth_core::SigningKeys;
use auth_service::{app, config::Config, principal_store::PrincipalStore, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env().expect("Failed to load configuration from environment");

    tracing::info!(
        "Starting auth service on {}:{}",
        config.server_host,
        config.server_port
    );

    // Signing keys are loaded once and must be valid before the service
    // accepts a single request.
    let keys = Arc::new(SigningKeys::from_pem_files(
        &config.key_id,
        &config.jku(),
        &config.private_key_path,
        &config.public_key_path,
    )?);
    tracing::info!(kid = keys.kid(), jku = keys.jku(), "signing keys initialized");

    let principals = PrincipalStore::new(
        keys.clone(),
        config.student_service_url.clone(),
        config.professor_service_url.clone(),
    );

    let state = AppState { keys, principals };

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Auth service listening on {}", addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
