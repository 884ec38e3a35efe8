//! Instrumentation targets: which functions to probe and what to inject.

use std::collections::{BTreeSet, HashMap};

use syn::Stmt;

use crate::error::{Error, Result};

/// Statement injected when no template is configured.
pub const DEFAULT_TEMPLATE: &str = r#"::std::eprintln!("stitch: enter {fn}");"#;

/// Placeholder in a statement template replaced by the matched function name.
pub const NAME_PLACEHOLDER: &str = "{fn}";

/// A declarative instrumentation rule: the set of function names to match
/// (exact, case-sensitive) and the statement template to prepend to their
/// bodies. Constant for the duration of one wrapper run.
#[derive(Debug, Clone)]
pub struct ProbeSpec {
    pub functions: BTreeSet<String>,
    pub template: String,
}

impl ProbeSpec {
    pub fn new(functions: impl IntoIterator<Item = String>, template: impl Into<String>) -> Self {
        Self {
            functions: functions.into_iter().collect(),
            template: template.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Renders the template for one function name and parses it as a Rust
    /// statement.
    pub fn statement_for(&self, name: &str) -> Result<Stmt> {
        let rendered = self.template.replace(NAME_PLACEHOLDER, name);
        syn::parse_str(&rendered).map_err(|source| Error::Template {
            template: self.template.clone(),
            source,
        })
    }

    /// Renders every configured target up front, so a malformed template is
    /// caught before any tree has been mutated.
    pub fn render_all(&self) -> Result<HashMap<String, Stmt>> {
        self.functions
            .iter()
            .map(|name| Ok((name.clone(), self.statement_for(name)?)))
            .collect()
    }
}
