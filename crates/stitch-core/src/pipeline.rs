//! Per-invocation instrumentation pipeline.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::classify::classify_sources;
use crate::emit::{self, Emitter};
use crate::error::Result;
use crate::instrument::Instrumenter;
use crate::probe::ProbeSpec;
use crate::rewrite::rewrite_args;
use crate::session::ParseSession;

/// One compile invocation's instrumentation run.
///
/// Owns everything the stages need, so concurrently running wrapper
/// processes share no state. [`Pipeline::run`] never fails: any stage error
/// collapses to the original argument list, keeping the wrapped build
/// intact.
pub struct Pipeline {
    spec: ProbeSpec,
    build_dir: PathBuf,
}

impl Pipeline {
    pub fn new(spec: ProbeSpec, build_dir: impl Into<PathBuf>) -> Self {
        Self {
            spec,
            build_dir: build_dir.into(),
        }
    }

    /// Runs classify → load → instrument → emit → rewrite over one argument
    /// list. Returns the rewritten list, or a copy of the original when
    /// nothing applies or any stage fails.
    pub fn run(&self, args: &[String]) -> Vec<String> {
        match self.try_run(args) {
            Ok(Some(rewritten)) => rewritten,
            Ok(None) => args.to_vec(),
            Err(error) => {
                warn!(%error, "instrumentation abandoned, forwarding original arguments");
                args.to_vec()
            }
        }
    }

    fn try_run(&self, args: &[String]) -> Result<Option<Vec<String>>> {
        if self.spec.is_empty() {
            debug!("no probe targets configured");
            return Ok(None);
        }

        let sources = classify_sources(args);
        if sources.is_empty() {
            debug!("no source files in argument list");
            return Ok(None);
        }

        // Validate the probe templates before any file is parsed or mutated.
        let instrumenter = Instrumenter::new(&self.spec)?;
        let mut session = ParseSession::load(&sources)?;
        debug!(files = session.len(), "parse session loaded");

        let emitter = Emitter::new(&self.build_dir);
        let mut substitutions = BTreeMap::new();
        for (seq, unit) in session.units_mut().iter_mut().enumerate() {
            if instrumenter.instrument_unit(unit) == 0 {
                continue;
            }
            if emit::is_test_only(&unit.path) {
                debug!(path = %unit.path.display(), "skipping test-only source");
                continue;
            }
            // The emitted copy lives under the build dir; a file whose `mod`
            // or `include!` items resolve relative to its own location would
            // not compile from there, and a partially instrumented package
            // is worse than none.
            if !emit::is_relocatable(&unit.file) {
                warn!(
                    path = %unit.path.display(),
                    "file declares path-anchored items, forwarding original arguments"
                );
                return Ok(None);
            }
            let written = emitter.write_unit(unit, seq)?;
            substitutions.insert(unit.arg_index, written);
        }

        if substitutions.is_empty() {
            debug!("no targets matched, nothing to rewrite");
            return Ok(None);
        }
        Ok(Some(rewrite_args(args, &substitutions)))
    }
}
