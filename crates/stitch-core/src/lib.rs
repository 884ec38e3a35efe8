//! Core interception-and-instrumentation pipeline for the `stitch` wrapper.
//!
//! One compile invocation's argument list goes through five stages: classify
//! which arguments are Rust source files, parse the whole set into a single
//! session, inject probe statements into configured function bodies, emit the
//! mutated trees under the build directory, and substitute the rewritten
//! paths back into the argument list at their original positions.
//!
//! Instrumentation is strictly best-effort: every error inside the pipeline
//! collapses to forwarding the original arguments unchanged, so a wrapped
//! build can never be broken by a failed injection.

pub mod classify;
pub mod emit;
pub mod error;
pub mod instrument;
pub mod pipeline;
pub mod probe;
pub mod rewrite;
pub mod session;

pub use error::{Error, Result};
pub use pipeline::Pipeline;
pub use probe::ProbeSpec;
pub use session::{ParseSession, SourceUnit};
