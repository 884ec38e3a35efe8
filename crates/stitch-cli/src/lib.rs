//! Command-line shell for the `stitch` wrapper.
//!
//! `stitch` stands in for the real `rustc` binary (for example via
//! `RUSTC_WRAPPER`). It scans its own flags from the leading argument run,
//! routes the remaining invocation through the instrumentation pipeline when
//! the command is recognized, and forwards the final argument list to the
//! real toolchain, propagating its exit code.

pub mod commands;
pub mod config;
pub mod flags;
pub mod invoke;
pub mod router;

// CLI-specific error handling
pub mod error {
    use std::path::PathBuf;
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum CliError {
        #[error("invalid command line: {0}")]
        Command(String),

        #[error("configuration error: {0}")]
        Config(String),

        #[error("failed to execute `{binary}`: {source}")]
        Spawn {
            binary: PathBuf,
            #[source]
            source: std::io::Error,
        },
    }

    pub type Result<T> = std::result::Result<T, CliError>;
}

pub use error::{CliError, Result};

/// Exit code for a malformed wrapper command line or configuration.
pub const EXIT_USAGE: i32 = 2;

/// Exit code when the real toolchain binary cannot be located or executed.
/// Matches the shell convention for "command not found".
pub const EXIT_SPAWN: i32 = 127;
