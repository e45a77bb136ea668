use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use todo_server::{build_schema, ServerConfig, Storage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let storage = Storage::connect(&config).await?;
    storage.ensure_schema().await?;

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("server ready at http://{addr}/");
    todo_server::run(listener, build_schema(storage)).await?;
    Ok(())
}
