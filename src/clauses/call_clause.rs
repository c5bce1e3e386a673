use crate::ast::node::{
    add_next_clause, adopt, compile_fragment, compile_next, AsAstNode, AstNode, DynNode, NodeCore,
};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use crate::utils::escape_identifier;
use std::cell::RefCell;
use std::rc::Rc;

enum CallKind {
    /// `CALL name(args) [YIELD items]`. The dotted procedure name comes from
    /// the caller's catalogue and is emitted as given.
    Procedure {
        name: String,
        args: RefCell<Vec<DynNode>>,
        yields: RefCell<Vec<String>>,
    },
    /// `CALL { inner }`, compiled against the same environment so names and
    /// parameters stay consistent with the outer query.
    Subquery(DynNode),
}

struct CallInner {
    core: NodeCore,
    kind: CallKind,
}

impl AstNode for CallInner {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let mut out = match &self.kind {
            CallKind::Procedure { name, args, yields } => {
                let args = args.borrow().clone();
                let mut rendered = Vec::with_capacity(args.len());
                for arg in &args {
                    rendered.push(compile_fragment(arg, env)?);
                }
                let mut text = format!("CALL {}({})", name, rendered.join(", "));
                let yields = yields.borrow();
                if !yields.is_empty() {
                    let items: Vec<String> = yields
                        .iter()
                        .map(|item| escape_identifier(item).into_owned())
                        .collect();
                    text.push_str(&format!(" YIELD {}", items.join(", ")));
                }
                text
            }
            CallKind::Subquery(inner) => {
                format!("CALL {{\n{}\n}}", compile_fragment(inner, env)?)
            }
        };
        out.push_str(&compile_next(&self.core, env)?);
        Ok(out)
    }
}

/// `CALL` clause: procedure invocation or subquery.
#[derive(Clone)]
pub struct Call {
    inner: Rc<CallInner>,
}

impl Call {
    pub fn procedure(name: impl Into<String>) -> Self {
        Call {
            inner: Rc::new(CallInner {
                core: NodeCore::default(),
                kind: CallKind::Procedure {
                    name: name.into(),
                    args: RefCell::new(Vec::new()),
                    yields: RefCell::new(Vec::new()),
                },
            }),
        }
    }

    pub fn subquery(inner_clause: &dyn AsAstNode) -> Self {
        let inner_node = inner_clause.as_dyn_node();
        let clause = Call {
            inner: Rc::new(CallInner {
                core: NodeCore::default(),
                kind: CallKind::Subquery(Rc::clone(&inner_node)),
            }),
        };
        adopt(&clause.as_dyn_node(), &inner_node);
        clause
    }

    pub(crate) fn chained_subquery(prev: &DynNode, inner_clause: &dyn AsAstNode) -> Self {
        let clause = Self::subquery(inner_clause);
        add_next_clause(prev, &clause.as_dyn_node());
        clause
    }

    /// Procedure argument, in call order.
    pub fn argument(self, arg: impl Into<Expr>) -> Self {
        if let CallKind::Procedure { args, .. } = &self.inner.kind {
            let node = arg.into().as_dyn_node();
            adopt(&self.as_dyn_node(), &node);
            args.borrow_mut().push(node);
        }
        self
    }

    /// Names selected from the procedure's result, `YIELD a, b`.
    pub fn yielding<I>(self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        if let CallKind::Procedure { yields, .. } = &self.inner.kind {
            yields
                .borrow_mut()
                .extend(items.into_iter().map(Into::into));
        }
        self
    }
}

impl AsAstNode for Call {
    fn as_dyn_node(&self) -> DynNode {
        self.inner.clone()
    }
}
