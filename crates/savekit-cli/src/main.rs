//! Command-line access to a savekit store.
//!
//! Every command goes through the typed service API, so it sees exactly what
//! an embedding application would: the configured backend, obfuscation and
//! key registry.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Clear, Delete, Get, Keys, LastSave, Pack, Unpack};
use savekit::{SerializationService, SerializerSettings};

/// Inspect and move save data
#[derive(Parser)]
#[command(name = "savekit")]
#[command(about = "Inspect, bundle and restore save data", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (TOML). Defaults plus SAVEKIT_* overrides when omitted
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Override the storage root directory
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// List stored keys
    Keys(Keys),

    /// Print the value stored under a key
    Get(Get),

    /// Bundle entries into one blob
    Pack(Pack),

    /// Restore entries from a bundle
    Unpack(Unpack),

    /// Delete one entry
    Delete(Delete),

    /// Delete every entry
    Clear(Clear),

    /// Show when data was last saved
    LastSave(LastSave),
}

impl Cli {
    fn service(&self) -> Result<SerializationService> {
        let mut settings = match &self.settings {
            Some(path) => SerializerSettings::load(path)
                .with_context(|| format!("Failed to load settings: {}", path.display()))?,
            None => SerializerSettings::from_env(),
        };

        if let Some(root) = &self.root {
            settings.storage_root = Some(root.clone());
        }

        let service = SerializationService::new(settings).context("Invalid settings")?;
        service.init().context("Failed to open storage")?;
        Ok(service)
    }
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SAVEKIT_* overrides)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let service = cli.service()?;

    match cli.command {
        Command::Keys(cmd) => cmd.execute(&service),
        Command::Get(cmd) => cmd.execute(&service),
        Command::Pack(cmd) => cmd.execute(&service),
        Command::Unpack(cmd) => cmd.execute(&service),
        Command::Delete(cmd) => cmd.execute(&service),
        Command::Clear(cmd) => cmd.execute(&service),
        Command::LastSave(cmd) => cmd.execute(&service),
    }
}
