//! sportbook CLI - booking backend for users, facilities and reservations
//!
//! Entry point for the `sportbook` binary:
//! - `serve`: run the REST API
//! - `menu`: interactive terminal menu over the same repositories
//! - `init-db`: create any missing tables

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sportbook_server::{Database, Mode, Settings};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "sportbook",
    author,
    version,
    about = "Sports facility booking backend",
    long_about = "Manage users, facilities and reservations stored in PostgreSQL, \
                  either over a JSON REST API or from an interactive menu."
)]
struct Cli {
    /// Config file (default: $SPORTBOOK_CONFIG or ~/.sportbook/config.toml)
    #[arg(long, global = true, env = "SPORTBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Use the [test_database] section; the name must contain "test"
    #[arg(long, global = true)]
    testing: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Interactive menu (list, add, delete, change status...)
    Menu,
    /// Create any missing tables and exit
    InitDb,
}

impl Cli {
    fn mode(&self) -> Mode {
        if self.testing {
            Mode::Testing
        } else {
            Mode::Production
        }
    }
}

/// Load settings and build the connection provider for the selected mode.
fn open_database(cli: &Cli) -> Result<(Settings, Database)> {
    let path = cli.config.clone().unwrap_or_else(Settings::default_path);
    let settings = Settings::load(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    let db = Database::new(settings.database_for(cli.mode()), cli.mode())
        .context("Invalid database configuration")?;
    Ok((settings, db))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Optional .env next to the working directory
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        quiet: matches!(cli.command, Commands::Menu),
    })
    .ok();

    let (settings, db) = open_database(&cli)?;
    tracing::debug!(database = %db.name(), mode = ?cli.mode(), "configuration loaded");

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, &settings, db).await?,
        Commands::Menu => commands::run_menu(db).await?,
        Commands::InitDb => commands::run_init_db(&db).await?,
    }
    Ok(())
}
