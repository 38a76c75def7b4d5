//! Command-line interface wiring for dataset-scout.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod corpus;
pub mod decode;
pub mod prepare;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Dataset mention extraction toolkit", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Corpus(args) => corpus::run(args, settings).await,
            Commands::Prepare(args) => prepare::run(args, settings).await,
            Commands::Decode(args) => decode::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build a BIO-tagged training corpus from papers and metadata.
    Corpus(corpus::Args),
    /// Build inference rows and the per-paper row manifest.
    Prepare(prepare::Args),
    /// Turn model predictions into deduplicated per-paper labels.
    Decode(decode::Args),
}
