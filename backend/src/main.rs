//! Backend entry-point: loads settings, applies migrations, and serves the
//! notes API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use backend::outbound::security::{BuildMode, signing_secret_from_env};
use server::{SecuritySettings, ServerConfig, ServerSettings, create_server, diesel_http_state};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|err| eyre!("failed to load server settings: {err}"))?;
    let database_url = settings
        .database_url
        .clone()
        .ok_or_else(|| eyre!("NOTES_DATABASE_URL must be set"))?;
    let bind_addr = settings.bind_addr().wrap_err("invalid NOTES_BIND_ADDR")?;
    let token_ttl = settings
        .token_ttl()
        .wrap_err("invalid NOTES_TOKEN_TTL_MINUTES")?;
    let secret = signing_secret_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("failed to load token signing secret")?;

    let migration_url = database_url.clone();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .wrap_err("migration task failed")?
        .wrap_err("failed to apply migrations")?;
    info!(applied, "database migrations applied");

    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_pool_max_size),
    )
    .await
    .wrap_err("failed to build database pool")?;
    let http_state = diesel_http_state(
        &pool,
        SecuritySettings {
            secret,
            token_ttl,
            bcrypt_cost: settings.bcrypt_cost,
        },
        Arc::new(DefaultClock),
    )
    .wrap_err("invalid NOTES_BCRYPT_COST")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(bind_addr, http_state),
    )
    .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "notes backend listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome.wrap_err("HTTP server failed")
}
