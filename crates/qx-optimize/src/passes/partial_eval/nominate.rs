use crate::error::check_depth;
use qx_core::ast::{Expr, ExprKind};
use qx_core::error::Result;
use qx_core::id::ExprId;
use std::collections::HashSet;

/// Maximal closed sub-trees of one tree, by node identity.
///
/// No member is an ancestor of another: a closed node is only recorded by a
/// parent that is itself not closed, or as the root.
#[derive(Debug, Default, Clone)]
pub struct CandidateSet {
    ids: HashSet<ExprId>,
}

impl CandidateSet {
    pub fn contains(&self, expr: &Expr) -> bool {
        self.ids.contains(&expr.id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Bottom-up pass that finds the collapse points of a tree.
pub struct Nominator<'a> {
    predicate: &'a dyn Fn(&Expr) -> bool,
    max_depth: usize,
    candidates: CandidateSet,
}

impl<'a> Nominator<'a> {
    pub fn new(predicate: &'a dyn Fn(&Expr) -> bool, max_depth: usize) -> Self {
        Self {
            predicate,
            max_depth,
            candidates: CandidateSet::default(),
        }
    }

    pub fn nominate(mut self, root: &Expr) -> Result<CandidateSet> {
        if self.visit(root, 0)? {
            self.insert(root);
        }
        Ok(self.candidates)
    }

    /// Returns whether `expr` is closed.
    fn visit(&mut self, expr: &Expr, depth: usize) -> Result<bool> {
        check_depth(depth, self.max_depth)?;
        // object construction with bindings is left to the query provider
        if let ExprKind::MemberInit(_) = expr.kind {
            return Ok(false);
        }
        let children = expr.children();
        let mut closed = Vec::with_capacity(children.len());
        for child in &children {
            closed.push(self.visit(child, depth + 1)?);
        }
        if closed.iter().all(|c| *c) && (self.predicate)(expr) {
            return Ok(true);
        }
        for (child, closed) in children.into_iter().zip(closed) {
            if closed {
                self.insert(child);
            }
        }
        Ok(false)
    }

    fn insert(&mut self, expr: &Expr) {
        qx_core::trace!("nominated {} {}: {}", expr.kind.name(), expr.id, expr);
        self.candidates.ids.insert(expr.id);
    }
}
