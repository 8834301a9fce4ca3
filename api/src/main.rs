use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use log::info;

use gp_api::{config::load_config, create_app, AppState};
use gp_core::services::SystemClock;
use gp_shared::Environment;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    let environment = Environment::from_env();
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(environment.default_log_level()),
    );

    info!("Starting Guardian Portal API Server ({})", environment);

    let config = load_config().context("failed to load configuration")?;
    let infrastructure = gp_infra::initialize(&config)
        .await
        .context("failed to initialize infrastructure")?;

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let state = web::Data::new(AppState::new(config, infrastructure, Arc::new(SystemClock)));

    info!("Server will bind to: {}", bind_address);
    let mut server = HttpServer::new(move || create_app(state.clone()));
    if workers > 0 {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}
