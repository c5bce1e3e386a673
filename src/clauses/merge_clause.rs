use crate::ast::node::{
    add_next_clause, adopt, compile_fragment, compile_next, AsAstNode, AstNode, DynNode, NodeCore,
};
use crate::clauses::set_clause::{collect_set_items, render_set_items, SetItem};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use crate::patterns::Pattern;
use std::cell::RefCell;
use std::rc::Rc;

struct MergeInner {
    core: NodeCore,
    pattern: DynNode,
    on_create: RefCell<Vec<SetItem>>,
    on_match: RefCell<Vec<SetItem>>,
}

impl AstNode for MergeInner {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let mut out = format!("MERGE {}", compile_fragment(&self.pattern, env)?);

        let on_create = self.on_create.borrow();
        if !on_create.is_empty() {
            out.push_str(&format!(
                "\nON CREATE SET {}",
                render_set_items(&on_create, env)?
            ));
        }
        drop(on_create);

        let on_match = self.on_match.borrow();
        if !on_match.is_empty() {
            out.push_str(&format!(
                "\nON MATCH SET {}",
                render_set_items(&on_match, env)?
            ));
        }
        drop(on_match);

        out.push_str(&compile_next(&self.core, env)?);
        Ok(out)
    }
}

/// `MERGE` writing clause with optional `ON CREATE SET` / `ON MATCH SET`.
#[derive(Clone)]
pub struct Merge {
    inner: Rc<MergeInner>,
}

impl Merge {
    pub fn new(pattern: Pattern) -> Self {
        let pattern = pattern.as_dyn_node();
        let clause = Merge {
            inner: Rc::new(MergeInner {
                core: NodeCore::default(),
                pattern: Rc::clone(&pattern),
                on_create: RefCell::new(Vec::new()),
                on_match: RefCell::new(Vec::new()),
            }),
        };
        adopt(&clause.as_dyn_node(), &pattern);
        clause
    }

    pub(crate) fn chained(prev: &DynNode, pattern: Pattern) -> Self {
        let clause = Self::new(pattern);
        add_next_clause(prev, &clause.as_dyn_node());
        clause
    }

    /// Property assignment applied only when MERGE creates the pattern.
    pub fn on_create_set(self, target: impl Into<Expr>, value: impl Into<Expr>) -> Self {
        collect_set_items(
            &self.as_dyn_node(),
            target.into(),
            value.into(),
            &self.inner.on_create,
        );
        self
    }

    /// Property assignment applied only when MERGE matched an existing
    /// pattern.
    pub fn on_match_set(self, target: impl Into<Expr>, value: impl Into<Expr>) -> Self {
        collect_set_items(
            &self.as_dyn_node(),
            target.into(),
            value.into(),
            &self.inner.on_match,
        );
        self
    }
}

impl AsAstNode for Merge {
    fn as_dyn_node(&self) -> DynNode {
        self.inner.clone()
    }
}
