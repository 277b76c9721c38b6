//! CLI probe for the fridge inventory core.
//!
//! # Responsibility
//! - Verify `fridge_core` linkage without the Flutter/FFI runtime.
//! - Print the share/mail summary for an existing inventory database.

use clap::{Parser, Subcommand};
use fridge_core::db::open_db;
use fridge_core::{
    init_logging, now_epoch_ms, ItemFilter, ItemService, SqliteFridgeRepository,
    SqliteItemRepository, SqliteSettingsRepository,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// FridgeManager inventory probe
#[derive(Parser, Debug)]
#[command(name = "fridge_cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Absolute directory for rolling log files
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Log level used with --log-dir
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print core ping and version
    Ping,
    /// Print the inventory summary text
    Summary {
        /// Inventory database file
        #[arg(long)]
        db: PathBuf,

        /// Only items expiring within two days
        #[arg(long)]
        urgent: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = init_logging(cli.log_level.as_str(), log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match cli.command {
        Command::Ping => {
            println!("fridge_core ping={}", fridge_core::ping());
            println!("fridge_core version={}", fridge_core::core_version());
            ExitCode::SUCCESS
        }
        Command::Summary { db, urgent } => match summary(&db, urgent) {
            Ok(text) => {
                print!("{text}");
                if !text.ends_with('\n') {
                    println!();
                }
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("summary failed: {err}");
                ExitCode::FAILURE
            }
        },
    }
}

fn summary(db: &Path, urgent_only: bool) -> Result<String, String> {
    let conn = open_db(db).map_err(|err| err.to_string())?;
    let service = ItemService::new(
        SqliteItemRepository::try_new(&conn).map_err(|err| err.to_string())?,
        SqliteFridgeRepository::try_new(&conn).map_err(|err| err.to_string())?,
        SqliteSettingsRepository::try_new(&conn).map_err(|err| err.to_string())?,
    );
    let snapshot = service.load_snapshot().map_err(|err| err.to_string())?;
    Ok(snapshot.compose_summary(ItemFilter {
        urgent_only,
        now: now_epoch_ms(),
    }))
}
