//! Argument-list rewriting.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Returns a copy of `args` where only the indices present in
/// `substitutions` change value. Length and order are preserved; every other
/// argument, flags included, is copied verbatim. An out-of-range index is
/// ignored rather than panicking.
pub fn rewrite_args(args: &[String], substitutions: &BTreeMap<usize, PathBuf>) -> Vec<String> {
    let mut rewritten: Vec<String> = args.to_vec();
    for (&index, path) in substitutions {
        if let Some(slot) = rewritten.get_mut(index) {
            *slot = path.display().to_string();
        }
    }
    rewritten
}
