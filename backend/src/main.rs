//! Backend entry-point: configuration, migrations, and server start-up.

mod server;

use std::env;
use std::net::SocketAddr;

use actix_web::web;
use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig};
use server::ServerConfig;

/// SQL migrations compiled into the binary and applied at start-up.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Apply pending migrations on a blocking connection before the pool opens.
async fn run_migrations(database_url: String) -> std::io::Result<()> {
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url)
            .map_err(|err| std::io::Error::other(format!("database connection failed: {err}")))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|err| std::io::Error::other(format!("migrations failed: {err}")))?;
        Ok(())
    })
    .await
    .map_err(|err| std::io::Error::other(format!("migration task panicked: {err}")))?
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

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;
    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned())
        .parse()
        .map_err(|err| std::io::Error::other(format!("invalid BIND_ADDR: {err}")))?;

    run_migrations(database_url.clone()).await?;

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|err| std::io::Error::other(format!("pool construction failed: {err}")))?;

    let health_state = web::Data::new(HealthState::new());
    let server = server::run(ServerConfig::new(bind_addr, pool), health_state.clone())?;

    health_state.mark_ready();
    info!(%bind_addr, "server started");
    server.await
}
