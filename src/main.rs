//! sdkmodel CLI entry point
//!
//! Parses arguments, dispatches to the CLI module and reports failures as an
//! error response line with a non-zero exit status.

use sdkmodel::cli;

fn main() {
    if let Err(e) = cli::run() {
        if cli::write_error(e.code_str(), e.message()).is_err() {
            eprintln!("{}", e);
        }
        std::process::exit(1);
    }
}
