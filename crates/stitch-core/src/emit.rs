//! Serializes instrumented trees back to source text under the build dir.
//!
//! Serialization is `prettyplease::unparse`, i.e. standard formatting rules:
//! the tree's structure, declaration order and statement order are preserved
//! exactly, and doc comments survive as attributes, but plain `//` comments
//! are dropped and spacing is normalized. Emitted files live at a different
//! path than the originals, so files whose meaning depends on their own
//! location — non-inline `mod` declarations, `include!`-family macros — must
//! not be emitted at all; [`is_relocatable`] is the gate.

use std::fs;
use std::path::{Component, Path, PathBuf};

use syn::visit::Visit;
use tracing::debug;

use crate::error::{Error, Result};
use crate::session::SourceUnit;

/// Subdirectory of the build directory receiving instrumented copies.
const EMIT_SUBDIR: &str = "stitch";

/// True for sources that only exist for tests: anything inside a `tests`
/// directory or with a file stem ending in `_test`. Such files never appear
/// in a compile argument list, so writing them would be wasted work.
pub fn is_test_only(path: &Path) -> bool {
    let in_tests_dir = path
        .components()
        .any(|c| matches!(c, Component::Normal(name) if name == "tests"));
    let test_stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with("_test"));
    in_tests_dir || test_stem
}

/// True when the file compiles identically from a different directory.
///
/// rustc resolves `mod child;` (and `#[path]` variants) and the `include!`
/// macro family relative to the containing file, so relocating a file that
/// declares any of them would orphan those items and fail the build. Such
/// files are reported as non-relocatable and the caller forwards the
/// invocation untouched.
pub fn is_relocatable(file: &syn::File) -> bool {
    let mut scan = RelocationScan { anchored: false };
    scan.visit_file(file);
    !scan.anchored
}

struct RelocationScan {
    anchored: bool,
}

impl<'ast> Visit<'ast> for RelocationScan {
    fn visit_item_mod(&mut self, node: &'ast syn::ItemMod) {
        // A module without inline content loads from a sibling file.
        if node.content.is_none() {
            self.anchored = true;
            return;
        }
        syn::visit::visit_item_mod(self, node);
    }

    fn visit_macro(&mut self, node: &'ast syn::Macro) {
        if let Some(segment) = node.path.segments.last() {
            let name = segment.ident.to_string();
            if matches!(name.as_str(), "include" | "include_str" | "include_bytes") {
                self.anchored = true;
            }
        }
        syn::visit::visit_macro(self, node);
    }
}

/// Writes instrumented source text to paths distinct from the originals, so
/// the canonical source tree is never modified as a side effect.
pub struct Emitter {
    out_dir: PathBuf,
}

impl Emitter {
    pub fn new(build_dir: &Path) -> Self {
        Self {
            out_dir: build_dir.join(EMIT_SUBDIR),
        }
    }

    /// Unparses the unit with standard formatting and writes it as
    /// `NN-<original name>` under the emit directory. The sequence number
    /// keeps same-named files from different source directories apart.
    pub fn write_unit(&self, unit: &SourceUnit, seq: usize) -> Result<PathBuf> {
        let text = prettyplease::unparse(&unit.file);
        let name = unit
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed.rs");
        let target = self.out_dir.join(format!("{seq:02}-{name}"));

        fs::create_dir_all(&self.out_dir).map_err(|source| Error::Emit {
            path: self.out_dir.clone(),
            source,
        })?;
        fs::write(&target, text).map_err(|source| Error::Emit {
            path: target.clone(),
            source,
        })?;
        debug!(
            original = %unit.path.display(),
            emitted = %target.display(),
            "wrote instrumented source"
        );
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn unit(path: &str, source: &str) -> SourceUnit {
        SourceUnit {
            path: PathBuf::from(path),
            arg_index: 0,
            file: syn::parse_file(source).unwrap(),
            probed: false,
        }
    }

    #[test]
    fn recognizes_test_only_sources() {
        assert!(is_test_only(Path::new("tests/integration.rs")));
        assert!(is_test_only(Path::new("crate/tests/deep/case.rs")));
        assert!(is_test_only(Path::new("src/alloc_test.rs")));
        assert!(!is_test_only(Path::new("src/lib.rs")));
        assert!(!is_test_only(Path::new("src/testsuite.rs")));
    }

    #[test]
    fn files_with_path_anchored_items_are_not_relocatable() {
        let anchored = [
            "mod helper;\nfn target() { helper::x(); }\n",
            "#[path = \"other.rs\"]\nmod helper;\n",
            "mod outer { mod inner; }\n",
            "fn data() -> &'static str { include_str!(\"blob.txt\") }\n",
            "include!(\"generated.rs\");\n",
        ];
        for source in anchored {
            let file = syn::parse_file(source).unwrap();
            assert!(!is_relocatable(&file), "expected anchored: {source:?}");
        }
    }

    #[test]
    fn self_contained_files_are_relocatable() {
        let source = "mod inline {\n    pub fn x() {}\n}\nfn target() { inline::x(); }\n";
        let file = syn::parse_file(source).unwrap();
        assert!(is_relocatable(&file));
    }

    #[test]
    fn emitted_path_is_distinct_from_original() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("lib.rs");
        std::fs::write(&original, "fn a() {}\n").unwrap();

        let unit = unit(original.to_str().unwrap(), "fn a() {}\n");
        let emitter = Emitter::new(dir.path());
        let written = emitter.write_unit(&unit, 0).unwrap();

        assert_ne!(written, original);
        assert_eq!(written, dir.path().join("stitch").join("00-lib.rs"));
        assert!(written.exists());
    }

    #[test]
    fn sequence_number_disambiguates_same_names() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(dir.path());
        let a = emitter.write_unit(&unit("x/mod.rs", "fn a() {}\n"), 0).unwrap();
        let b = emitter.write_unit(&unit("y/mod.rs", "fn b() {}\n"), 1).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn emitted_text_reparses_to_the_same_shape() {
        let source = "/// Doc comment survives.\nfn a() {\n    x();\n    y();\n}\n";
        let unit = unit("src/a.rs", source);
        let text = prettyplease::unparse(&unit.file);
        let reparsed = syn::parse_file(&text).unwrap();
        assert_eq!(unit.file.items.len(), reparsed.items.len());
        assert_eq!(unit.file, reparsed);
    }
}
