use crate::ast::node::{adopt, compile_fragment, AsAstNode, AstNode, DynNode, NodeCore};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use std::cell::RefCell;
use std::rc::Rc;

/// Type of UNION operation
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum UnionType {
    /// UNION - removes duplicates
    Distinct,
    /// UNION ALL - keeps duplicates
    All,
}

impl UnionType {
    fn joiner(self) -> &'static str {
        match self {
            UnionType::Distinct => "\nUNION\n",
            UnionType::All => "\nUNION ALL\n",
        }
    }
}

struct UnionInner {
    core: NodeCore,
    union_type: UnionType,
    parts: RefCell<Vec<DynNode>>,
}

impl AstNode for UnionInner {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let parts = self.parts.borrow().clone();
        if parts.len() < 2 {
            return Err(CompileError::UnionTooFewQueries(parts.len()));
        }
        let mut rendered = Vec::with_capacity(parts.len());
        for part in &parts {
            rendered.push(compile_fragment(part, env)?);
        }
        Ok(rendered.join(self.union_type.joiner()))
    }
}

/// `UNION` / `UNION ALL` combination of whole queries. All sides share one
/// environment, so references shared across them keep one name.
#[derive(Clone)]
pub struct Union {
    inner: Rc<UnionInner>,
}

impl Union {
    /// Deduplicating union.
    pub fn new(parts: &[&dyn AsAstNode]) -> Self {
        Self::of_type(parts, UnionType::Distinct)
    }

    /// `UNION ALL`, keeping duplicates.
    pub fn all(parts: &[&dyn AsAstNode]) -> Self {
        Self::of_type(parts, UnionType::All)
    }

    pub fn of_type(parts: &[&dyn AsAstNode], union_type: UnionType) -> Self {
        let clause = Union {
            inner: Rc::new(UnionInner {
                core: NodeCore::default(),
                union_type,
                parts: RefCell::new(Vec::new()),
            }),
        };
        for part in parts {
            let node = part.as_dyn_node();
            adopt(&clause.as_dyn_node(), &node);
            clause.inner.parts.borrow_mut().push(node);
        }
        clause
    }
}

impl AsAstNode for Union {
    fn as_dyn_node(&self) -> DynNode {
        self.inner.clone()
    }
}
