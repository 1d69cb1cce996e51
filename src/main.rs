use clap::Parser;

use courier::cli::{Cli, Commands, load_settings};
use courier::db::run_pending_migrations;
use courier::logger::init_logger;
use courier::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(&cli)?;

    init_logger(&settings.logger)?;

    match cli.command {
        Some(Commands::Migrate { dry_run }) => {
            if dry_run {
                tracing::info!("Dry run: configuration valid, migrations not applied");
                println!("Configuration valid; migrations would run against the configured database");
                return Ok(());
            }
            run_pending_migrations(&settings.database.url)?;
            tracing::info!("Migrations applied");
            Ok(())
        }
        Some(Commands::Serve { dry_run: true, .. }) => {
            tracing::info!("Dry run: configuration valid, server not started");
            println!("Configuration valid");
            Ok(())
        }
        _ => {
            // `serve` is the default when no subcommand is given
            Server::new(settings).run().await
        }
    }
}
