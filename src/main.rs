use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finsync_core::cli::{self, Cli, Commands, DbCommands, UpiCommands};
use finsync_core::config::{Config, LogFormat};
use finsync_core::{create_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let args = Cli::parse();
    match args.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&config).await,
        Commands::Db(DbCommands::Migrate) => cli::handle_db_migrate(&config).await,
        Commands::Config => cli::handle_config_validate(&config),
        Commands::Classify { amount, payee } => cli::handle_classify(&amount, &payee),
        Commands::Upi(UpiCommands::Decode { raw }) => cli::handle_upi_decode(&raw),
        Commands::Upi(UpiCommands::Prepare {
            raw,
            amount,
            user_agent,
        }) => cli::handle_upi_prepare(&config, &raw, &amount, &user_agent),
    }
}

fn init_tracing(format: LogFormat) {
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    let state = AppState::from_config(config).await?;
    tracing::info!(storage = state.storage, "application state initialized");

    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
