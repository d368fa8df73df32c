mod host;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use host::{ConsoleUi, DocumentFile, FileStorage, LibraryFile};
use std::path::PathBuf;
use std::sync::Arc;
use switcher_core::Mode;
use switcher_plugin::{Command, PluginConfig, ThemeSwitcherPlugin, UiMessage};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "theme-switcher")]
#[command(about = "Switch the color styles of a design document between light and dark variants", long_about = None)]
#[command(version)]
struct Cli {
    /// Document JSON with `localStyles` and `selection`
    #[arg(short, long)]
    document: PathBuf,

    /// Client storage file shared between documents
    #[arg(short, long, default_value = "theme-switcher-storage.json")]
    storage: PathBuf,

    /// Published team library (JSON array of paint styles)
    #[arg(short, long)]
    library: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a menu command (openSwitcher, saveFromTeamLibrary, loadFromTeamLibrary)
    Run { command: Command },

    /// Send a panel message (dark, light, save, load)
    Message { message: UiMessage },

    /// Switch the selection to any mode (dark, light, elevated)
    Switch { mode: Mode },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = PluginConfig::from_env()?;
    let document = DocumentFile::load(&cli.document)?;
    let storage = Arc::new(FileStorage::open(&cli.storage).await?);
    let library = match &cli.library {
        Some(path) => LibraryFile::load(path)?,
        None => LibraryFile::default(),
    };

    let mut plugin = ThemeSwitcherPlugin::new(
        document,
        storage,
        Arc::new(library),
        Arc::new(ConsoleUi),
        config,
    );

    let mutated = match cli.command {
        Commands::Run { command } => {
            plugin.run_command(command).await?;
            false
        }
        Commands::Message { message } => {
            plugin.handle_message(message).await?;
            matches!(message, UiMessage::Dark | UiMessage::Light)
        }
        Commands::Switch { mode } => {
            let report = plugin.replace_all_styles(mode).await?;
            println!(
                "{} {} bindings switched to {} ({} unresolved, {}/{} nodes failed)",
                "✓".green(),
                report.stats.bindings_rewritten,
                mode.to_string().bold(),
                report.stats.bindings_unresolved,
                report.failed_nodes,
                report.top_level_nodes
            );
            true
        }
    };

    if mutated {
        plugin.into_document().save(&cli.document)?;
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
