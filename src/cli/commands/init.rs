//! Implementation of the `paramlayer init` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::config::loader::SETTINGS_FILE;
use crate::infrastructure::setup::write_default_settings;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing settings file
    #[arg(long, short)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub written: bool,
    pub message: String,
    pub settings_path: PathBuf,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: &InitArgs, json_mode: bool) -> Result<()> {
    let target_dir = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(&args.path)
    };
    let settings_path = target_dir.join(SETTINGS_FILE);

    let written = write_default_settings(&settings_path, args.force)?;
    let message = if written {
        format!("Wrote default settings to {}", settings_path.display())
    } else {
        format!(
            "Settings already exist at {} (use --force to overwrite)",
            settings_path.display()
        )
    };

    output(
        &InitOutput {
            written,
            message,
            settings_path,
        },
        json_mode,
    );
    Ok(())
}
