use crate::ast::node::{adopt, compile_fragment, AsAstNode, AstNode, DynNode, NodeCore};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use crate::patterns::Pattern;
use std::rc::Rc;

struct ExistsNode {
    core: NodeCore,
    pattern: DynNode,
}

impl AstNode for ExistsNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let pattern = compile_fragment(&self.pattern, env)?;
        Ok(format!("EXISTS {{ {} }}", pattern))
    }
}

/// Existential predicate over a pattern, `EXISTS { (a)-[r]->(b) }`.
pub fn exists(pattern: Pattern) -> Expr {
    let pattern = pattern.as_dyn_node();
    let node = Rc::new(ExistsNode {
        core: NodeCore::default(),
        pattern: Rc::clone(&pattern),
    });
    let parent: DynNode = node;
    adopt(&parent, &pattern);
    Expr::from_node(parent)
}
