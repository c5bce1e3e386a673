use crate::ast::node::{
    add_next_clause, adopt, compile_fragment, compile_next, AsAstNode, AstNode, DynNode, NodeCore,
};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use crate::references::NodeRef;
use std::cell::RefCell;
use std::rc::Rc;

enum RemoveItem {
    Property(DynNode),
    Labels { target: DynNode, labels: Vec<String> },
}

struct RemoveInner {
    core: NodeCore,
    items: RefCell<Vec<RemoveItem>>,
}

impl AstNode for RemoveInner {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let items = self.items.borrow();
        let mut rendered = Vec::with_capacity(items.len());
        for item in items.iter() {
            match item {
                RemoveItem::Property(target) => {
                    rendered.push(compile_fragment(target, env)?);
                }
                RemoveItem::Labels { target, labels } => {
                    let escaped: Vec<String> =
                        labels.iter().map(|label| env.escape_label(label)).collect();
                    rendered.push(format!(
                        "{}:{}",
                        compile_fragment(target, env)?,
                        escaped.join(":")
                    ));
                }
            }
        }
        drop(items);
        Ok(format!(
            "REMOVE {}{}",
            rendered.join(", "),
            compile_next(&self.core, env)?
        ))
    }
}

/// `REMOVE` update clause for properties and labels.
#[derive(Clone)]
pub struct Remove {
    inner: Rc<RemoveInner>,
}

impl Remove {
    /// Property removal, `REMOVE target`.
    pub fn new(target: impl Into<Expr>) -> Self {
        Self::empty().and_remove(target)
    }

    /// Label removal, `REMOVE n:Label`.
    pub fn label<I>(node: &NodeRef, labels: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::empty().and_label(node, labels)
    }

    fn empty() -> Self {
        Remove {
            inner: Rc::new(RemoveInner {
                core: NodeCore::default(),
                items: RefCell::new(Vec::new()),
            }),
        }
    }

    pub(crate) fn chained(prev: &DynNode, target: Expr) -> Self {
        let clause = Self::new(target);
        add_next_clause(prev, &clause.as_dyn_node());
        clause
    }

    pub fn and_remove(self, target: impl Into<Expr>) -> Self {
        let target = target.into().as_dyn_node();
        adopt(&self.as_dyn_node(), &target);
        self.inner
            .items
            .borrow_mut()
            .push(RemoveItem::Property(target));
        self
    }

    pub fn and_label<I>(self, node: &NodeRef, labels: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let target = Expr::from(node).as_dyn_node();
        adopt(&self.as_dyn_node(), &target);
        self.inner.items.borrow_mut().push(RemoveItem::Labels {
            target,
            labels: labels.into_iter().map(Into::into).collect(),
        });
        self
    }
}

impl AsAstNode for Remove {
    fn as_dyn_node(&self) -> DynNode {
        self.inner.clone()
    }
}
