//! CLI argument definitions using clap
//!
//! Commands:
//! - sdkmodel models [--config <path>]
//! - sdkmodel describe --model <name> [--config <path>]
//! - sdkmodel resolve --model <name> [--config <path>]
//! - sdkmodel decode --model <name> [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sdkmodel - decode, validate and project cloud SDK model payloads
#[derive(Parser, Debug)]
#[command(name = "sdkmodel")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered model names
    Models {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print a model descriptor
    Describe {
        /// Model name
        #[arg(long)]
        model: String,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Read a payload from stdin and print its concrete model name
    Resolve {
        /// Base model name
        #[arg(long)]
        model: String,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Read a payload from stdin, hydrate it and print its projection
    Decode {
        /// Base model name
        #[arg(long)]
        model: String,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
