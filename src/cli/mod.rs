//! CLI module for sdkmodel
//!
//! Provides command-line interface for:
//! - models: List registered models
//! - describe: Print a descriptor
//! - resolve: Resolve the concrete subtype of a payload
//! - decode: Hydrate a payload and print its projection

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{build_registry, decode, describe, models, resolve, run, run_command, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
