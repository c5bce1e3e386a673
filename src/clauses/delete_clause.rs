use crate::ast::node::{
    add_next_clause, adopt, compile_fragment, compile_next, AsAstNode, AstNode, DynNode, NodeCore,
};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use std::cell::RefCell;
use std::rc::Rc;

struct DeleteInner {
    core: NodeCore,
    detach: bool,
    items: RefCell<Vec<DynNode>>,
}

impl AstNode for DeleteInner {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let keyword = if self.detach {
            "DETACH DELETE "
        } else {
            "DELETE "
        };
        let items = self.items.borrow().clone();
        let mut rendered = Vec::with_capacity(items.len());
        for item in &items {
            rendered.push(compile_fragment(item, env)?);
        }
        Ok(format!(
            "{}{}{}",
            keyword,
            rendered.join(", "),
            compile_next(&self.core, env)?
        ))
    }
}

/// `DELETE` / `DETACH DELETE` clause.
#[derive(Clone)]
pub struct Delete {
    inner: Rc<DeleteInner>,
}

impl Delete {
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self::with_flags(items, false)
    }

    pub fn detach<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self::with_flags(items, true)
    }

    fn with_flags<I>(items: I, detach: bool) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        let clause = Delete {
            inner: Rc::new(DeleteInner {
                core: NodeCore::default(),
                detach,
                items: RefCell::new(Vec::new()),
            }),
        };
        for item in items {
            let node = item.into().as_dyn_node();
            adopt(&clause.as_dyn_node(), &node);
            clause.inner.items.borrow_mut().push(node);
        }
        clause
    }

    pub(crate) fn chained<I>(prev: &DynNode, items: I, detach: bool) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        let clause = Self::with_flags(items, detach);
        add_next_clause(prev, &clause.as_dyn_node());
        clause
    }
}

impl AsAstNode for Delete {
    fn as_dyn_node(&self) -> DynNode {
        self.inner.clone()
    }
}
