use crate::ast::node::{adopt, compile_fragment, AsAstNode, AstNode, DynNode, NodeCore};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use crate::utils::escape_identifier;
use std::rc::Rc;

struct PropertyAccessNode {
    core: NodeCore,
    subject: DynNode,
    key: String,
}

impl AstNode for PropertyAccessNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let subject = compile_fragment(&self.subject, env)?;
        Ok(format!("{}.{}", subject, escape_identifier(&self.key)))
    }
}

pub(crate) fn access(subject: Expr, key: impl Into<String>) -> Expr {
    let subject = subject.as_dyn_node();
    let node = Rc::new(PropertyAccessNode {
        core: NodeCore::default(),
        subject: Rc::clone(&subject),
        key: key.into(),
    });
    let parent: DynNode = node;
    adopt(&parent, &subject);
    Expr::from_node(parent)
}
