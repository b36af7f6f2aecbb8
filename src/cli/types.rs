//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::{init::InitArgs, serve::ServeArgs, show::ShowArgs};

#[derive(Parser)]
#[command(name = "paramlayer")]
#[command(about = "Paramlayer - parameter store configuration layer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (defaults to paramlayer.yaml + paramlayer.local.yaml)
    #[arg(short, long, global = true, env = "PARAMLAYER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default settings file
    Init(InitArgs),

    /// Serve the merged parameter layer over HTTP
    Serve(ServeArgs),

    /// Load the parameter layer once and print it
    Show(ShowArgs),
}
