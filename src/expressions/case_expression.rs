use crate::ast::node::{adopt, compile_fragment, AsAstNode, AstNode, DynNode, NodeCore};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use std::cell::RefCell;
use std::rc::Rc;

struct CaseInner {
    core: NodeCore,
    subject: RefCell<Option<DynNode>>,
    branches: RefCell<Vec<(DynNode, DynNode)>>,
    otherwise: RefCell<Option<DynNode>>,
}

impl AstNode for CaseInner {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let mut out = String::from("CASE");
        let subject = self.subject.borrow().clone();
        if let Some(subject) = subject {
            out.push(' ');
            out.push_str(&compile_fragment(&subject, env)?);
        }
        let branches = self.branches.borrow().clone();
        for (condition, result) in branches {
            out.push_str(&format!(
                " WHEN {} THEN {}",
                compile_fragment(&condition, env)?,
                compile_fragment(&result, env)?
            ));
        }
        let otherwise = self.otherwise.borrow().clone();
        if let Some(otherwise) = otherwise {
            out.push_str(&format!(" ELSE {}", compile_fragment(&otherwise, env)?));
        }
        out.push_str(" END");
        Ok(out)
    }
}

/// `CASE` expression, in both the searched form (`Case::new`) and the simple
/// form over a subject (`Case::on`).
#[derive(Clone)]
pub struct Case {
    inner: Rc<CaseInner>,
}

impl Case {
    /// Searched form: each `when` carries its own predicate.
    pub fn new() -> Self {
        Case {
            inner: Rc::new(CaseInner {
                core: NodeCore::default(),
                subject: RefCell::new(None),
                branches: RefCell::new(Vec::new()),
                otherwise: RefCell::new(None),
            }),
        }
    }

    /// Simple form: `when` values are compared against the subject.
    pub fn on(subject: impl Into<Expr>) -> Self {
        let case = Case::new();
        let subject = subject.into().as_dyn_node();
        adopt(&case.as_dyn_node(), &subject);
        *case.inner.subject.borrow_mut() = Some(subject);
        case
    }

    pub fn when(self, condition: impl Into<Expr>, result: impl Into<Expr>) -> Self {
        let condition = condition.into().as_dyn_node();
        let result = result.into().as_dyn_node();
        adopt(&self.as_dyn_node(), &condition);
        adopt(&self.as_dyn_node(), &result);
        self.inner.branches.borrow_mut().push((condition, result));
        self
    }

    pub fn otherwise(self, result: impl Into<Expr>) -> Self {
        let result = result.into().as_dyn_node();
        adopt(&self.as_dyn_node(), &result);
        *self.inner.otherwise.borrow_mut() = Some(result);
        self
    }
}

impl Default for Case {
    fn default() -> Self {
        Self::new()
    }
}

impl AsAstNode for Case {
    fn as_dyn_node(&self) -> DynNode {
        self.inner.clone()
    }
}

impl From<Case> for Expr {
    fn from(case: Case) -> Self {
        Expr::from_node(case.as_dyn_node())
    }
}
