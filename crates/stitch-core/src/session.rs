//! Whole-package parse session.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::error::{Error, Result};

/// One classified source file: its path, its position in the compile
/// argument list, and its parsed tree.
#[derive(Debug)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub arg_index: usize,
    pub file: syn::File,
    /// Set once the instrumenter has visited this unit. Guards against a
    /// second injection pass over the same tree within one run.
    pub probed: bool,
}

/// All source files of one compile invocation, parsed together.
///
/// Mutation only ever targets specific files, but traversal wants the whole
/// package's declarations in view, so the set loads as a unit and a read or
/// parse failure anywhere poisons the entire session. The session is owned
/// by the pipeline run that created it and dies with the process.
#[derive(Debug, Default)]
pub struct ParseSession {
    units: Vec<SourceUnit>,
}

impl ParseSession {
    /// Parses every classified file. Any failure aborts the whole load; the
    /// caller falls back to the original, unmodified argument list.
    pub fn load(sources: &BTreeMap<usize, PathBuf>) -> Result<Self> {
        let units = sources
            .iter()
            .map(|(&arg_index, path)| Self::load_unit(arg_index, path))
            .try_collect()?;
        Ok(Self { units })
    }

    fn load_unit(arg_index: usize, path: &Path) -> Result<SourceUnit> {
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file = syn::parse_file(&text).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(SourceUnit {
            path: path.to_path_buf(),
            arg_index,
            file,
            probed: false,
        })
    }

    pub fn units(&self) -> &[SourceUnit] {
        &self.units
    }

    pub fn units_mut(&mut self) -> &mut [SourceUnit] {
        &mut self.units
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_every_classified_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.rs");
        let b = dir.path().join("b.rs");
        fs::write(&a, "fn a() {}\n").unwrap();
        fs::write(&b, "fn b() { a(); }\n").unwrap();

        let sources = BTreeMap::from([(3, a), (4, b.clone())]);
        let session = ParseSession::load(&sources).unwrap();
        assert_eq!(session.len(), 2);
        assert_eq!(session.units()[1].arg_index, 4);
        assert_eq!(session.units()[1].path, b);
        assert!(!session.units()[0].probed);
    }

    #[test]
    fn one_bad_file_poisons_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.rs");
        let bad = dir.path().join("bad.rs");
        fs::write(&good, "fn fine() {}\n").unwrap();
        fs::write(&bad, "fn broken( {\n").unwrap();

        let sources = BTreeMap::from([(0, good), (1, bad)]);
        let err = ParseSession::load(&sources).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let sources = BTreeMap::from([(0, PathBuf::from("/nonexistent/nope.rs"))]);
        let err = ParseSession::load(&sources).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
