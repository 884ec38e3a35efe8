//! Identifies which compile arguments are Rust source files.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// File suffix that marks an argument as a Rust source file.
pub const SOURCE_SUFFIX: &str = ".rs";

/// Returns every argument ending in [`SOURCE_SUFFIX`], keyed by its position
/// in the argument list so the rewriter can substitute it later.
///
/// Classification is purely suffix-based and never interprets flag semantics:
/// a flag value that happens to end in `.rs` is classified as a source file
/// too. That is an accepted limitation, not something to detect here.
pub fn classify_sources(args: &[String]) -> BTreeMap<usize, PathBuf> {
    args.iter()
        .enumerate()
        .filter(|(_, arg)| arg.ends_with(SOURCE_SUFFIX))
        .map(|(index, arg)| (index, PathBuf::from(arg)))
        .collect()
}
