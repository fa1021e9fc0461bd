
mod config;
mod error;
mod web;

pub use self::error::{Error, Result};
pub use config::config;

use mtrh_store::ModelManager;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mm = ModelManager::new(&config().DB_URL).await?;

    let routes_all = web::routes_all(mm, &config().WEB_FOLDER);

    let addr = config().LISTEN_ADDR;
    info!("{:<12} - {addr}\n", "LISTENING");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, routes_all).await?;

    Ok(())
}
