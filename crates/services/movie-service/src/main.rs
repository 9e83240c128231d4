//! Movie Service - REST API for the movie catalog and scores.

use clap::{Parser, Subcommand};
use movie_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "movie-service")]
#[command(about = "Movie catalog and rating service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "MOVIE_SERVICE_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "MOVIE_SERVICE_PORT", default_value = "8080")]
        port: u16,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    movie_service_lib::telemetry::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            movie_service_lib::run_embedded(&host, port).await?;
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            movie_service_lib::run_migrations(migrate_action).await?;
        }
    }

    Ok(())
}
