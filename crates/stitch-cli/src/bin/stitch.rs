//! `stitch` binary: a transparent rustc wrapper that injects diagnostic
//! probe statements into configured functions while a build runs.
//!
//! # Usage
//!
//! ```bash
//! # Probe `handle_request` in crate `server` while cargo builds it
//! RUSTC_WRAPPER="stitch" STITCH_LOG=debug cargo build
//!
//! # Explicit invocation: wrapper flags first, then the real toolchain
//! stitch --package server --probe handle_request \
//!     /usr/bin/rustc --crate-name server -o target/server.o src/lib.rs
//! ```
//!
//! Everything after the toolchain path is forwarded unexamined; the child's
//! stdio and exit code become the wrapper's own.

use std::process;

use stitch_cli::config::StitchConfig;
use stitch_cli::flags::scan_leading_flags;
use stitch_cli::router::Router;
use stitch_cli::{invoke, EXIT_SPAWN, EXIT_USAGE};
use tracing::error;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let (flags, command_pos) = match scan_leading_flags(&args) {
        Ok(scanned) => scanned,
        Err(error) => {
            eprintln!("stitch: {error}");
            process::exit(EXIT_USAGE);
        }
    };

    setup_logging(flags.verbose);

    let config = match StitchConfig::load(flags.config.as_deref()) {
        Ok(config) => config.apply_flags(&flags),
        Err(error) => {
            eprintln!("stitch: {error}");
            process::exit(EXIT_USAGE);
        }
    };

    // Wrapper flags are hidden from the forwarded command line.
    let cmd_args = &args[command_pos..];
    let final_args = Router::default().route(&config, cmd_args);

    match invoke::forward(&final_args) {
        Ok(code) => process::exit(code),
        Err(err) => {
            error!(%err, "failed to run toolchain");
            eprintln!("stitch: {err}");
            process::exit(EXIT_SPAWN);
        }
    }
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    // Default to warnings only: the wrapper sits inside other tools' builds
    // and must not pollute their output.
    let filter = EnvFilter::try_from_env("STITCH_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    let formatter = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_level(true);

    tracing_subscriber::registry().with(formatter).with(filter).init();
}
