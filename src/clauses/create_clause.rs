use crate::ast::node::{
    add_next_clause, adopt, compile_fragment, compile_next, AsAstNode, AstNode, DynNode, NodeCore,
};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::patterns::Pattern;
use std::cell::RefCell;
use std::rc::Rc;

struct CreateInner {
    core: NodeCore,
    patterns: RefCell<Vec<DynNode>>,
}

impl AstNode for CreateInner {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let patterns = self.patterns.borrow().clone();
        let mut rendered = Vec::with_capacity(patterns.len());
        for pattern in &patterns {
            rendered.push(compile_fragment(pattern, env)?);
        }
        Ok(format!(
            "CREATE {}{}",
            rendered.join(", "),
            compile_next(&self.core, env)?
        ))
    }
}

/// `CREATE` writing clause.
#[derive(Clone)]
pub struct Create {
    inner: Rc<CreateInner>,
}

impl Create {
    pub fn new(pattern: Pattern) -> Self {
        let clause = Create {
            inner: Rc::new(CreateInner {
                core: NodeCore::default(),
                patterns: RefCell::new(Vec::new()),
            }),
        };
        clause.push_pattern(pattern);
        clause
    }

    pub(crate) fn chained(prev: &DynNode, pattern: Pattern) -> Self {
        let clause = Self::new(pattern);
        add_next_clause(prev, &clause.as_dyn_node());
        clause
    }

    /// Additional comma-joined pattern in the same CREATE.
    pub fn pattern(self, pattern: Pattern) -> Self {
        self.push_pattern(pattern);
        self
    }

    fn push_pattern(&self, pattern: Pattern) {
        let node = pattern.as_dyn_node();
        adopt(&self.as_dyn_node(), &node);
        self.inner.patterns.borrow_mut().push(node);
    }
}

impl AsAstNode for Create {
    fn as_dyn_node(&self) -> DynNode {
        self.inner.clone()
    }
}
