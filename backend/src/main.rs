//! Entry point: load settings, open the store, serve, then release.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, UserStore, create_server};
use userbase::inbound::http::health::HealthState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let bind_addr = settings.bind_addr()?;
    let store = UserStore::open(&settings).await?;

    let health_state = web::Data::new(HealthState::new(store.kind()));
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(bind_addr, store.repository()),
    )?;
    let outcome = server.await;

    health_state.mark_unhealthy();
    store.release();
    info!("shutdown complete");
    outcome
}
