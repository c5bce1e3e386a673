use crate::ast::node::{
    add_next_clause, adopt, compile_fragment, compile_next, AsAstNode, AstNode, DynNode, NodeCore,
};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use crate::references::Variable;
use std::rc::Rc;

struct UnwindInner {
    core: NodeCore,
    list: DynNode,
    alias: Variable,
}

impl AstNode for UnwindInner {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let list = compile_fragment(&self.list, env)?;
        let alias = env.name_for(&self.alias);
        Ok(format!(
            "UNWIND {} AS {}{}",
            list,
            alias,
            compile_next(&self.core, env)?
        ))
    }
}

/// `UNWIND list AS x` clause. The alias is a shared [`Variable`], so later
/// clauses referring to it resolve to the same name.
#[derive(Clone)]
pub struct Unwind {
    inner: Rc<UnwindInner>,
}

impl Unwind {
    pub fn new(list: impl Into<Expr>, alias: &Variable) -> Self {
        let list = list.into().as_dyn_node();
        let clause = Unwind {
            inner: Rc::new(UnwindInner {
                core: NodeCore::default(),
                list: Rc::clone(&list),
                alias: alias.clone(),
            }),
        };
        adopt(&clause.as_dyn_node(), &list);
        clause
    }

    pub(crate) fn chained(prev: &DynNode, list: Expr, alias: &Variable) -> Self {
        let clause = Self::new(list, alias);
        add_next_clause(prev, &clause.as_dyn_node());
        clause
    }
}

impl AsAstNode for Unwind {
    fn as_dyn_node(&self) -> DynNode {
        self.inner.clone()
    }
}
