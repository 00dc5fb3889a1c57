//! Destructive commands.
//!
//! Safety: `clear` prompts for confirmation unless `-y` is given.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use savekit::SerializationService;
use std::io::{self, Write};

/// Delete one entry
#[derive(Parser, Debug)]
pub struct Delete {
    /// Key to delete
    #[arg(value_name = "KEY")]
    pub key: String,
}

impl Delete {
    pub fn execute(self, service: &SerializationService) -> Result<()> {
        if !service.exists(&self.key) {
            println!(
                "{} No entry stored under {}",
                style("✗").red().bold(),
                style(&self.key).cyan()
            );
            return Ok(());
        }

        service
            .delete(&self.key)
            .with_context(|| format!("Failed to delete '{}'", self.key))?;

        println!("{} Deleted {}", style("✓").green(), style(&self.key).cyan());
        Ok(())
    }
}

/// Delete every entry
#[derive(Parser, Debug)]
pub struct Clear {
    /// Skip confirmation prompt (dangerous!)
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl Clear {
    pub fn execute(self, service: &SerializationService) -> Result<()> {
        let keys = service.keys().context("Failed to list keys")?;
        if keys.is_empty() {
            println!("{}", style("Nothing to clear").dim());
            return Ok(());
        }

        println!(
            "{} entries will be deleted from {:?} storage",
            style(keys.len()).bold(),
            service.settings()?.storage
        );

        if !self.yes && !confirm()? {
            println!("{}", style("Cancelled").dim());
            return Ok(());
        }

        service.delete_all().context("Failed to clear storage")?;

        println!("{}", style("✓ Storage cleared").green().bold());
        Ok(())
    }
}

/// Prompt user for confirmation
fn confirm() -> Result<bool> {
    print!("{} ", style("Proceed? [y/N]").yellow().bold());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}
