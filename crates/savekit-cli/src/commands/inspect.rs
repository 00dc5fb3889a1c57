//! Read-only commands: list keys, print one value, show the last save time.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use savekit::SerializationService;

/// List stored keys
#[derive(Parser, Debug)]
pub struct Keys {
    /// Print keys in sorted order instead of storage order
    #[arg(long)]
    pub sort: bool,
}

impl Keys {
    pub fn execute(self, service: &SerializationService) -> Result<()> {
        let mut keys = service.keys().context("Failed to list keys")?;
        if self.sort {
            keys.sort();
        }

        if keys.is_empty() {
            println!("{}", style("No entries stored").dim());
            return Ok(());
        }

        for key in &keys {
            println!("{}", key);
        }
        eprintln!("{}", style(format!("{} keys", keys.len())).dim());

        Ok(())
    }
}

/// Print the value stored under a key
#[derive(Parser, Debug)]
pub struct Get {
    /// Key to read
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Print compact JSON on one line
    #[arg(long)]
    pub compact: bool,
}

impl Get {
    pub fn execute(self, service: &SerializationService) -> Result<()> {
        let value: serde_json::Value = service
            .try_load(&self.key)
            .with_context(|| format!("Failed to decode entry '{}'", self.key))?
            .with_context(|| format!("No entry stored under '{}'", self.key))?;

        let text = if self.compact {
            serde_json::to_string(&value)?
        } else {
            serde_json::to_string_pretty(&value)?
        };
        println!("{}", text);

        Ok(())
    }
}

/// Show when data was last saved
#[derive(Parser, Debug)]
pub struct LastSave {
    /// Print the UTC timestamp instead of local time
    #[arg(long)]
    pub utc: bool,
}

impl LastSave {
    pub fn execute(self, service: &SerializationService) -> Result<()> {
        let formatted = if self.utc {
            service.last_save_time_utc().map(|t| t.to_rfc3339())
        } else {
            service.last_save_time_local().map(|t| t.to_rfc3339())
        };

        match formatted {
            Some(time) => println!("{}", time),
            None => println!("{}", style("Never saved").dim()),
        }

        Ok(())
    }
}
