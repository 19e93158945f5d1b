use aa_api::app::{create_app, AppState};
use aa_shared::config::{AppConfig, LogFormat, LoggingConfig};
use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingConfig) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    match logging.format {
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    tracing::info!(
        environment = %config.environment,
        "Starting admin auth server"
    );

    let manager = aa_infra::build_lifecycle_manager(&config.auth)
        .context("failed to initialize credential lifecycle services")?;
    let app_state = web::Data::new(AppState::new(manager));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")?;

    tracing::info!("Server stopped");
    Ok(())
}
