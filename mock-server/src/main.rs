use mock_server::{ServerError, ServerSettings, Store};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = ServerSettings::load()?;
    let store = match &settings.seed_dir {
        Some(dir) => Store::from_seed_dir(dir)?,
        None => Store::default(),
    };
    info!(todos = store.todos.len(), users = store.users.len(), "store ready");

    let addr = settings.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    mock_server::serve(listener, store).await?;
    Ok(())
}
