use crate::ast::node::{adopt, compile_fragment, AstNode, DynNode, NodeCore};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use std::cell::RefCell;
use std::rc::Rc;

/// `WHERE` sub-clause shared by MATCH and WITH. Conditions added separately
/// are AND-joined.
pub(crate) struct WhereNode {
    core: NodeCore,
    conditions: RefCell<Vec<DynNode>>,
}

impl WhereNode {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(WhereNode {
            core: NodeCore::default(),
            conditions: RefCell::new(Vec::new()),
        })
    }

    pub(crate) fn push(this: &Rc<Self>, condition: &DynNode) {
        let me: DynNode = this.clone();
        adopt(&me, condition);
        this.conditions.borrow_mut().push(Rc::clone(condition));
    }
}

impl AstNode for WhereNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let conditions = self.conditions.borrow().clone();
        if conditions.is_empty() {
            return Ok(String::new());
        }
        let mut rendered = Vec::with_capacity(conditions.len());
        for condition in &conditions {
            rendered.push(compile_fragment(condition, env)?);
        }
        Ok(format!("WHERE {}", rendered.join(" AND ")))
    }
}
