//! Backend entry-point: loads settings, prepares persistence and serves the
//! REST API, short-link redirects and health probes.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use cookbook::config::ServerSettings;
use cookbook::inbound::http::health::HealthState;
use cookbook::inbound::http::session_config::{BuildMode, key_fingerprint, session_settings};
use cookbook::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let session = session_settings(&settings.session_toggles(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
        settings.base_url(),
    );

    match settings.database_url() {
        Some(url) => {
            let applied = run_pending_migrations(url)
                .await
                .map_err(std::io::Error::other)?;
            info!(applied, "database migrations applied");
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; serving empty fixture data"),
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, base_url = settings.base_url(), "starting server");
    create_server(health_state, config)?.await
}
