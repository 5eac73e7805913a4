//! Backend entry-point: loads settings, wires adapters and serves the API.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use trip_planner::domain::{DemoSeedOutcome, DemoSeeder};
use trip_planner::inbound::http::health::HealthState;
use trip_planner::inbound::http::state::HttpState;
use trip_planner::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use trip_planner::settings::{AppSettings, BuildMode, token_settings_from};

use server::{ServerConfig, Storage, build_http_ports, create_server};

async fn connect_storage(database_url: Option<&str>) -> std::io::Result<Storage> {
    let Some(url) = database_url else {
        warn!("no database URL configured; using in-memory storage");
        return Ok(Storage::Memory);
    };

    let migration_url = url.to_owned();
    let applied = web::block(move || run_pending_migrations(&migration_url))
        .await
        .map_err(|err| std::io::Error::other(format!("migration worker failed: {err}")))?
        .map_err(std::io::Error::other)?;
    info!(applied, "database migrations applied");

    let pool = DbPool::new(PoolConfig::new(url))
        .await
        .map_err(std::io::Error::other)?;
    Ok(Storage::Postgres(pool))
}

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

    let settings = AppSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?
        .with_env_fallbacks(&DefaultEnv::new());
    let token_settings = token_settings_from(&settings, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let storage = connect_storage(settings.database_url.as_deref()).await?;
    let ports = build_http_ports(&settings, &token_settings, &storage, Arc::clone(&clock))
        .map_err(std::io::Error::other)?;

    if settings.seed_demo() {
        let seeder = DemoSeeder::new(
            ports.auth.as_ref(),
            ports.trips.as_ref(),
            ports.trips_query.as_ref(),
        );
        match seeder.seed(clock.utc()).await {
            Ok(DemoSeedOutcome::Seeded { user_id, trip_id }) => {
                info!(%user_id, %trip_id, "demo account seeded");
            }
            Ok(DemoSeedOutcome::Completed { user_id, trip_id }) => {
                info!(%user_id, %trip_id, "partial demo seed completed");
            }
            Ok(DemoSeedOutcome::AlreadyPresent) => {}
            Err(err) => warn!(error = %err, "demo seeding failed"),
        }
    }

    let health_state = web::Data::new(HealthState::new());
    let http_state = web::Data::new(HttpState::new(ports));
    let config = ServerConfig::new(bind_addr, settings.client_origin());
    info!(addr = %config.bind_addr(), "starting HTTP server");

    create_server(health_state, http_state, config)?.await
}
