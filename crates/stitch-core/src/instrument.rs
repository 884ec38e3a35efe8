//! Probe injection over parsed source trees.

use std::collections::HashMap;

use syn::visit_mut::{self, VisitMut};
use syn::{Block, Stmt};
use tracing::debug;

use crate::error::Result;
use crate::probe::ProbeSpec;
use crate::session::SourceUnit;

/// Injects probe statements into matching function bodies.
///
/// Traversal is pre-order over the declaration kinds that carry a body: free
/// functions, impl methods, and trait methods with a default body. A matched
/// body gets the probe prepended ahead of all existing statements and is not
/// descended into, so nested functions and closures inside it stay untouched.
/// Non-matching declarations are traversed but never mutated.
pub struct Instrumenter {
    statements: HashMap<String, Stmt>,
}

impl Instrumenter {
    /// Renders the probe statement for every configured target. Fails before
    /// any tree is touched if the template does not parse as a statement.
    pub fn new(spec: &ProbeSpec) -> Result<Self> {
        Ok(Self {
            statements: spec.render_all()?,
        })
    }

    /// Visits one unit, prepending probes into matching bodies, and returns
    /// the number of injections. A unit already probed in this run is left
    /// alone: a source unit transitions to instrumented at most once.
    pub fn instrument_unit(&self, unit: &mut SourceUnit) -> usize {
        if unit.probed {
            return 0;
        }
        unit.probed = true;

        let mut visitor = ProbeVisitor {
            statements: &self.statements,
            injected: 0,
        };
        visitor.visit_file_mut(&mut unit.file);
        if visitor.injected > 0 {
            debug!(
                path = %unit.path.display(),
                count = visitor.injected,
                "injected probe statements"
            );
        }
        visitor.injected
    }
}

struct ProbeVisitor<'a> {
    statements: &'a HashMap<String, Stmt>,
    injected: usize,
}

impl ProbeVisitor<'_> {
    /// Prepends the probe if `name` is a target. Returns whether an
    /// injection happened, in which case the body must not be descended
    /// into.
    fn inject(&mut self, name: &str, block: &mut Block) -> bool {
        let Some(stmt) = self.statements.get(name) else {
            return false;
        };
        block.stmts.insert(0, stmt.clone());
        self.injected += 1;
        true
    }
}

impl VisitMut for ProbeVisitor<'_> {
    fn visit_item_fn_mut(&mut self, node: &mut syn::ItemFn) {
        if !self.inject(&node.sig.ident.to_string(), &mut node.block) {
            visit_mut::visit_item_fn_mut(self, node);
        }
    }

    fn visit_impl_item_fn_mut(&mut self, node: &mut syn::ImplItemFn) {
        if !self.inject(&node.sig.ident.to_string(), &mut node.block) {
            visit_mut::visit_impl_item_fn_mut(self, node);
        }
    }

    fn visit_trait_item_fn_mut(&mut self, node: &mut syn::TraitItemFn) {
        let name = node.sig.ident.to_string();
        let matched = match &mut node.default {
            Some(block) => self.inject(&name, block),
            None => false,
        };
        if !matched {
            visit_mut::visit_trait_item_fn_mut(self, node);
        }
    }
}
