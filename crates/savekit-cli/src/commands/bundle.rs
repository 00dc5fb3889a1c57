//! Pack entries into a bundle and restore them elsewhere.
//!
//! Bundles hold entries exactly as stored, so they only restore correctly
//! under the same obfuscation settings they were packed with.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use savekit::SerializationService;
use std::path::PathBuf;

/// Bundle entries into one blob
#[derive(Parser, Debug)]
pub struct Pack {
    /// Keys to include
    #[arg(value_name = "KEYS", required_unless_present = "all")]
    pub keys: Vec<String>,

    /// Include every stored key
    #[arg(long, conflicts_with = "keys")]
    pub all: bool,

    /// Write the bundle to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl Pack {
    pub fn execute(self, service: &SerializationService) -> Result<()> {
        let bundle = if self.all {
            service.pack_all()
        } else {
            service.pack(&self.keys)
        }
        .context("Failed to pack entries")?;

        match self.output {
            Some(path) => {
                std::fs::write(&path, &bundle)
                    .with_context(|| format!("Failed to write bundle: {}", path.display()))?;
                println!(
                    "{} Bundle written to {}",
                    style("✓").green(),
                    style(path.display()).cyan()
                );
            }
            None => println!("{}", bundle),
        }

        Ok(())
    }
}

/// Restore entries from a bundle
#[derive(Parser, Debug)]
pub struct Unpack {
    /// Bundle file produced by `pack`
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Leave entries that already exist untouched
    #[arg(long)]
    pub keep_existing: bool,
}

impl Unpack {
    pub fn execute(self, service: &SerializationService) -> Result<()> {
        let blob = std::fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read bundle: {}", self.input.display()))?;

        let written = service
            .unpack(&blob, !self.keep_existing)
            .context("Failed to restore entries")?;

        println!(
            "{} Restored {} entries",
            style("✓").green(),
            style(written).bold()
        );

        Ok(())
    }
}
