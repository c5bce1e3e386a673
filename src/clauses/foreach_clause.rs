use crate::ast::node::{
    add_next_clause, adopt, compile_fragment, compile_next, AsAstNode, AstNode, DynNode, NodeCore,
};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use crate::references::Variable;
use std::cell::RefCell;
use std::rc::Rc;

struct ForeachInner {
    core: NodeCore,
    variable: Variable,
    list: DynNode,
    body: RefCell<Vec<DynNode>>,
}

impl AstNode for ForeachInner {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let body = self.body.borrow().clone();
        if body.is_empty() {
            return Err(CompileError::EmptyForeachBody);
        }
        let variable = env.name_for(&self.variable);
        let list = compile_fragment(&self.list, env)?;
        let mut rendered = Vec::with_capacity(body.len());
        for clause in &body {
            rendered.push(compile_fragment(clause, env)?);
        }
        Ok(format!(
            "FOREACH ({} IN {} | {}){}",
            variable,
            list,
            rendered.join(" "),
            compile_next(&self.core, env)?
        ))
    }
}

/// `FOREACH (x IN list | update-clauses)`.
///
/// Building a FOREACH without at least one update clause is a caller error
/// surfaced at build time.
#[derive(Clone)]
pub struct Foreach {
    inner: Rc<ForeachInner>,
}

impl Foreach {
    pub fn new(variable: &Variable, list: impl Into<Expr>) -> Self {
        let list = list.into().as_dyn_node();
        let clause = Foreach {
            inner: Rc::new(ForeachInner {
                core: NodeCore::default(),
                variable: variable.clone(),
                list: Rc::clone(&list),
                body: RefCell::new(Vec::new()),
            }),
        };
        adopt(&clause.as_dyn_node(), &list);
        clause
    }

    pub(crate) fn chained(prev: &DynNode, variable: &Variable, list: Expr) -> Self {
        let clause = Self::new(variable, list);
        add_next_clause(prev, &clause.as_dyn_node());
        clause
    }

    /// Update clause in the FOREACH body (SET, REMOVE, CREATE, MERGE or
    /// DELETE).
    pub fn mutate(self, clause: &dyn AsAstNode) -> Self {
        let node = clause.as_dyn_node();
        adopt(&self.as_dyn_node(), &node);
        self.inner.body.borrow_mut().push(node);
        self
    }
}

impl AsAstNode for Foreach {
    fn as_dyn_node(&self) -> DynNode {
        self.inner.clone()
    }
}
