//! Subcommand recognition and dispatch.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::commands;
use crate::config::StitchConfig;

/// A registered handler. `cmd_args[0]` is the subcommand token; a handler
/// may return a rewritten argument list, `None` meaning forward the original
/// unchanged.
pub type Handler = fn(&StitchConfig, &[String]) -> Option<Vec<String>>;

/// Strips any path and extension from the subcommand token, so
/// `/usr/local/bin/rustc.exe` dispatches as `rustc`.
pub fn canonical_command(token: &str) -> String {
    Path::new(token)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(token)
        .to_string()
}

/// The wrapper's command registry. Commands without a registered handler —
/// and handlers that find nothing to do — leave the invocation untouched;
/// the router never consumes or reorders arguments.
pub struct Router {
    handlers: HashMap<&'static str, Handler>,
}

impl Default for Router {
    fn default() -> Self {
        let mut handlers: HashMap<&'static str, Handler> = HashMap::new();
        handlers.insert("rustc", commands::compile::handle);
        Self { handlers }
    }
}

impl Router {
    /// Dispatches one invocation and returns the argument list to forward.
    pub fn route(&self, config: &StitchConfig, cmd_args: &[String]) -> Vec<String> {
        let Some(token) = cmd_args.first() else {
            return cmd_args.to_vec();
        };
        let command = canonical_command(token);
        match self.handlers.get(command.as_str()) {
            Some(handler) => handler(config, cmd_args).unwrap_or_else(|| cmd_args.to_vec()),
            None => {
                debug!(%command, "no handler registered, passing through");
                cmd_args.to_vec()
            }
        }
    }
}
