//! infratrack library root.
//! Exposes the data access façade, the backends, the exporters and the CLI
//! dispatcher used by main.rs.

pub mod backend;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use crate::backend::Backend;
use crate::cli::commands;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::DataService;
use crate::errors::AppResult;

/// Commands that go through the data access façade.
async fn dispatch_data<B: Backend>(
    command: &Commands,
    service: &DataService<B>,
    cfg: &Config,
) -> AppResult<()> {
    match command {
        Commands::Scope { action } => commands::scope::handle(action, service).await,
        Commands::Work { action } => commands::work::handle(action, service).await,
        Commands::Infra { action } => commands::infra::handle(action, service).await,
        Commands::InfraInfo { block } => commands::survey::handle_infra_info(block, service).await,
        Commands::Chambers { block } => commands::survey::handle_chambers(block, service).await,
        Commands::Analytics { period } => commands::analytics::handle(period, service).await,
        Commands::Export { .. } => commands::export::handle(command, service, cfg).await,
        Commands::Upload { file, bucket } => {
            commands::upload::handle(file, bucket, service, cfg).await
        }
        Commands::Status => commands::status::handle(service).await,
        Commands::Init | Commands::Config { .. } => Ok(()),
    }
}

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        other => {
            let backend = cfg.connect().inspect_err(|e| {
                tracing::error!(error = %e, "Failed to initialize backend client");
            })?;
            let service = DataService::new(backend);
            dispatch_data(other, &service, cfg).await
        }
    }
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    logging::init_logging(cli.verbose)?;

    // 2️⃣ carica config UNA sola volta
    let mut cfg = Config::load()?;

    // 3️⃣ applica eventuale override del DB da riga di comando
    if let Some(custom_db) = &cli.db {
        cfg.use_local_database(custom_db);
    }

    // 4️⃣ passa tutto al dispatcher
    dispatch(&cli, &cfg).await
}
