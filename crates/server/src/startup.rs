use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};
use service::{
    colors::ColorTable,
    person::table::SeaOrmPersonRepository,
    storage::flat_file::FlatFileStore,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file when present, otherwise defaults plus environment.
fn load_config() -> Result<AppConfig, StartupError> {
    let mut cfg = match configs::load_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            info!(error = %e, "no usable config file, using defaults and environment");
            AppConfig::from_env()
        }
    };
    cfg.normalize_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(cfg)
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    let host = if cfg.server.host.trim().is_empty() {
        env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    } else {
        cfg.server.host.clone()
    };
    Ok(format!("{}:{}", host, cfg.server.port).parse()?)
}

/// Load the color table and open the configured backend, then build the router.
///
/// `database.enabled` picks the relational table backend; otherwise persons live
/// in the flat file at `storage.persons_path`.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    common::env::require_file(&cfg.storage.colors_path)
        .await
        .map_err(|e| StartupError::Data(e.to_string()))?;
    let colors = ColorTable::load(&cfg.storage.colors_path)
        .await
        .map_err(|e| StartupError::Data(e.to_string()))?;
    let colors = Arc::new(colors);

    let app = if cfg.database.enabled {
        let db = models::db::connect_with_config(&cfg.database).await?;
        migration::Migrator::up(&db, None).await.map_err(anyhow::Error::from)?;
        info!(backend = "table", "persons stored in database");
        let repo = SeaOrmPersonRepository::new(db, Arc::clone(&colors));
        routes::build_router(AppState::new(repo, colors), build_cors())
    } else {
        common::env::ensure_parent_dir(&cfg.storage.persons_path).await?;
        let store = FlatFileStore::open(&cfg.storage.persons_path, Arc::clone(&colors))
            .await
            .map_err(|e| StartupError::Data(e.to_string()))?;
        info!(backend = "flat_file", file = %cfg.storage.persons_path, "persons stored in flat file");
        routes::build_router(AppState::new(store, colors), build_cors())
    };
    Ok(app)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = load_config()?;
    init_logging(cfg.server.log_json);

    let app = build_app(&cfg).await?;

    // Bind and serve
    let addr = load_bind_addr(&cfg)?;
    info!(%addr, "starting person service");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
