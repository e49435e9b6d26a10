use salvo::conn::TcpListener;
use salvo::{Listener, Router};

use estore_app::app::api::routes;
use estore_app::config::ConfigHandler;
use estore_app::repo_handler::RepoHandler;
use estore_core::config::load_config;
use estore_db::db::connection::create_pool;
use estore_db::db::migrations::run_migrations;
use estore_service::repo::DieselRepo;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting EStore repair-shop API server");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let database_url = config.database.url.clone();
    tokio::task::spawn_blocking(move || run_migrations(&database_url)).await??;

    tracing::info!("Database migrations applied.");

    let pool = create_pool(
        &config.database.url,
        u32::from(config.database.max_connections),
    )
    .await?;

    tracing::info!("Database connection pool created.");

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(RepoHandler {
            repo: DieselRepo::new(pool),
        })
        .hoop(ConfigHandler { settings: config })
        .push(routes());

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
