use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod model;
mod models;
mod routes;
mod state;
mod utils;
mod validation;
mod views;

#[cfg(test)]
mod tests;

use config::Config;
use db::{init_db, init_schema};
use state::AppState;

use tracing::{info, warn};
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url)
        .await
        .with_context(|| format!("Failed to connect to database {}", config.database_url))?;
    init_schema(&pool).await.context("Failed to create tables")?;

    let server_addr = config.server_addr.clone();
    let state = Data::new(AppState::new(pool, config)?);

    auth::handlers::bootstrap_admin(&state).await?;

    let warmup_state = state.clone();
    actix_web::rt::spawn(async move {
        if let Err(e) = warmup_state.usernames.warmup(&warmup_state.pool, 100).await {
            warn!(error = %e, "Failed to warmup username filter");
        }
    });

    info!(addr = %server_addr, "Listening");

    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .configure(|cfg| routes::configure(cfg, state))
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run()
    .await?;

    Ok(())
}
