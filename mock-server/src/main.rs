use mock_server::{ListShape, ServerConfig};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let config = ServerConfig {
        list_shape: match std::env::var("LIST_SHAPE").as_deref() {
            Ok("bare") => ListShape::Bare,
            _ => ListShape::Envelope,
        },
        seed_sample_data: std::env::var_os("SEED_SAMPLE_DATA").is_some(),
    };

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, ?config, "listening");
    mock_server::serve(listener, &config).await
}
