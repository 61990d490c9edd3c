//! Command line front end: the add form, list screen and export trigger.

use crate::config;
use crate::export::{export_to_directory, ExportMode};
use crate::host::{request_reload, FileDirectory};
use crate::open_registry;
use crate::output::{format_preview, prefix_csv};
use crate::store::JsonFileStore;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "prefix-blocklist", version, about = "Block calls by NANP number prefix")]
pub struct Cli {
    /// Store file holding the prefix list.
    #[arg(long, env = config::ENV_STORE_FILE, default_value = config::DEFAULT_STORE_FILE)]
    pub store: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Block a prefix (3-6 digits, first digit 2-9).
    Add { prefix: String },
    /// Unblock a prefix.
    Remove { prefix: String },
    /// List blocked prefixes as CSV.
    List,
    /// Show what adding a prefix would do, without changing anything.
    Check { prefix: String },
    /// Write every blocked number, ascending, to a directory file.
    Export {
        /// Clear the file before writing instead of appending.
        #[arg(long)]
        incremental: bool,
        #[arg(long, default_value = config::DEFAULT_EXPORT_FILE)]
        output: PathBuf,
    },
    /// Ask the host to reload its blocking directory.
    Reload {
        /// Host command to run; defaults to BLOCKLIST_RELOAD_CMD.
        #[arg(long)]
        command: Option<String>,
    },
}

/// Execute one parsed command.
pub async fn run_cli(cli: Cli) -> Result<(), Box<dyn Error>> {
    log::debug!("Using store file {}", cli.store.display());

    match cli.command {
        Commands::Add { prefix } => {
            let prefix = prefix.trim();
            let mut registry = open_registry(&cli.store)?;
            let added = registry.add(prefix)?;
            println!(
                "{} {added}: {} entries, total {}",
                "Blocked".green(),
                added.entry_count(),
                registry.current_total_entries()
            );
        }
        Commands::Remove { prefix } => {
            let prefix = prefix.trim();
            let mut registry = open_registry(&cli.store)?;
            if registry.remove(prefix)? {
                println!("{} {prefix}", "Unblocked".green());
            } else {
                println!("{prefix} was not blocked");
            }
        }
        Commands::List => {
            let registry = open_registry(&cli.store)?;
            println!("{}", prefix_csv(&registry));
        }
        Commands::Check { prefix } => {
            let registry = open_registry(&cli.store)?;
            println!("{}", format_preview(&registry.preview(prefix.trim())));
        }
        Commands::Export {
            incremental,
            output,
        } => {
            let mode = if incremental {
                ExportMode::Incremental
            } else {
                ExportMode::Full
            };
            let mut directory = FileDirectory::new(&output);
            let store = JsonFileStore::new(&cli.store);
            let report = export_to_directory(store, &mut directory, mode)?;
            println!(
                "Exported {} entries from {} prefixes to {} ({mode})",
                report.entries,
                report.prefixes,
                output.display()
            );
        }
        Commands::Reload { command } => {
            let outcome = request_reload(command.or_else(config::reload_command_from_env)).await;
            if !outcome.is_success() {
                return Err(outcome.to_string().into());
            }
            println!("{outcome}");
        }
    }
    Ok(())
}
