use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};
use service::{file::products::FileProductStore, runtime};

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the backing store and fail early if it exists but cannot be parsed.
pub async fn open_store(cfg: &AppConfig) -> Result<AppState, StartupError> {
    let data_file = &cfg.storage.data_file;
    runtime::ensure_env(data_file).await?;
    let store = FileProductStore::new(data_file);
    let existing = store.list().await?;
    info!(path = %data_file.display(), products = existing.len(), "backing store ready");
    Ok(AppState::new(store))
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {raw}: {e}")))
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = open_store(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting inventory server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
