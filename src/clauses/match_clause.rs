use crate::ast::node::{
    add_next_clause, adopt, compile_fragment, compile_next, AsAstNode, AstNode, DynNode, NodeCore,
};
use crate::clauses::where_clause::WhereNode;
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use crate::patterns::Pattern;
use std::cell::RefCell;
use std::rc::Rc;

struct MatchInner {
    core: NodeCore,
    optional: bool,
    patterns: RefCell<Vec<DynNode>>,
    where_clause: RefCell<Option<Rc<WhereNode>>>,
}

impl AstNode for MatchInner {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let keyword = if self.optional {
            "OPTIONAL MATCH "
        } else {
            "MATCH "
        };
        let patterns = self.patterns.borrow().clone();
        let mut rendered = Vec::with_capacity(patterns.len());
        for pattern in &patterns {
            rendered.push(compile_fragment(pattern, env)?);
        }
        let mut out = format!("{}{}", keyword, rendered.join(", "));

        let where_clause = self.where_clause.borrow().clone();
        if let Some(where_clause) = where_clause {
            let node: DynNode = where_clause;
            let text = compile_fragment(&node, env)?;
            if !text.is_empty() {
                out.push('\n');
                out.push_str(&text);
            }
        }
        out.push_str(&compile_next(&self.core, env)?);
        Ok(out)
    }
}

/// `MATCH` / `OPTIONAL MATCH` reading clause.
#[derive(Clone)]
pub struct Match {
    inner: Rc<MatchInner>,
}

impl Match {
    pub fn new(pattern: Pattern) -> Self {
        Self::with_flags(pattern, false)
    }

    pub fn optional(pattern: Pattern) -> Self {
        Self::with_flags(pattern, true)
    }

    fn with_flags(pattern: Pattern, optional: bool) -> Self {
        let clause = Match {
            inner: Rc::new(MatchInner {
                core: NodeCore::default(),
                optional,
                patterns: RefCell::new(Vec::new()),
                where_clause: RefCell::new(None),
            }),
        };
        clause.push_pattern(pattern);
        clause
    }

    pub(crate) fn chained(prev: &DynNode, pattern: Pattern, optional: bool) -> Self {
        let clause = Self::with_flags(pattern, optional);
        add_next_clause(prev, &clause.as_dyn_node());
        clause
    }

    /// Additional comma-joined pattern in the same MATCH.
    pub fn pattern(self, pattern: Pattern) -> Self {
        self.push_pattern(pattern);
        self
    }

    fn push_pattern(&self, pattern: Pattern) {
        let node = pattern.as_dyn_node();
        adopt(&self.as_dyn_node(), &node);
        self.inner.patterns.borrow_mut().push(node);
    }

    /// Filter condition; repeated calls are AND-joined.
    pub fn where_(self, condition: impl Into<Expr>) -> Self {
        let condition = condition.into().as_dyn_node();
        let where_clause = {
            let mut slot = self.inner.where_clause.borrow_mut();
            match slot.as_ref() {
                Some(existing) => existing.clone(),
                None => {
                    let created = WhereNode::new();
                    *slot = Some(created.clone());
                    created
                }
            }
        };
        let node: DynNode = where_clause.clone();
        adopt(&self.as_dyn_node(), &node);
        WhereNode::push(&where_clause, &condition);
        self
    }
}

impl AsAstNode for Match {
    fn as_dyn_node(&self) -> DynNode {
        self.inner.clone()
    }
}
