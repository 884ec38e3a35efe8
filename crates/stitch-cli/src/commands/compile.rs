//! The `rustc` compile handler.

use stitch_core::{Pipeline, ProbeSpec};
use tracing::debug;

use crate::config::StitchConfig;
use crate::flags::CompileFlags;

/// Intercepts one compile invocation. `cmd_args[0]` is the toolchain path;
/// the rest is rustc's own argument list. Returns the rewritten invocation,
/// or `None` when instrumentation does not apply — the caller forwards the
/// original unchanged. This handler never errors: required configuration
/// being absent or invalid means passthrough, not failure.
pub fn handle(config: &StitchConfig, cmd_args: &[String]) -> Option<Vec<String>> {
    let rustc_args = cmd_args.get(1..)?;

    if config.probes.is_empty() {
        debug!("no probe targets configured");
        return None;
    }

    let flags = CompileFlags::parse(rustc_args);
    if !flags.is_valid() {
        debug!(%flags, "nothing to do");
        return None;
    }
    let crate_name = flags.crate_name.as_deref()?;
    if let Some(package) = config.package.as_deref() {
        if package != crate_name {
            debug!(crate_name, "crate does not match the configured package");
            return None;
        }
    }
    let build_dir = flags.build_dir()?;

    let spec = ProbeSpec::new(config.probes.iter().cloned(), config.statement.clone());
    let rewritten_tail = Pipeline::new(spec, build_dir).run(rustc_args);
    if rewritten_tail == rustc_args {
        return None;
    }

    let mut rewritten = Vec::with_capacity(cmd_args.len());
    rewritten.push(cmd_args[0].clone());
    rewritten.extend(rewritten_tail);
    Some(rewritten)
}
