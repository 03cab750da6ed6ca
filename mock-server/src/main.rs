use mock_server::MockConfig;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let mut config = MockConfig::default();
    if let Ok(password) = std::env::var("MOCK_ENCRYPTION_PASSWORD") {
        config.encryption_password = password;
    }
    config.auth_token = std::env::var("MOCK_AUTH_TOKEN").ok();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "mock sellers API listening");
    mock_server::run(listener, config).await
}
