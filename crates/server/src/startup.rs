use std::net::SocketAddr;

use axum::Router;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use configs::AppConfig;
use models::user::UserType;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Log a product key that lets the configured address sign up as the first ADMIN.
fn log_bootstrap_admin_key(state: &ServerState, cfg: &configs::AuthConfig) -> anyhow::Result<()> {
    if let Some(email) = &cfg.bootstrap_admin_email {
        let key = state.auth.product_key(email, UserType::Admin)?;
        warn!(%email, product_key = %key, "bootstrap admin product key issued; unset auth.bootstrap_admin_email once used");
    }
    Ok(())
}

/// Public entry: connect, migrate, build the app and run the HTTP server.
/// Logging is expected to be initialized by the caller.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }

    let state = ServerState::new(db, &cfg.auth);
    log_bootstrap_admin_key(&state, &cfg.auth)?;

    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = cfg
        .server
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}: {}", cfg.server.bind_addr(), e)))?;
    info!(%addr, "starting homelist server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
