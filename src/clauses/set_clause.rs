use crate::ast::node::{
    add_next_clause, adopt, compile_fragment, compile_next, AsAstNode, AstNode, DynNode, NodeCore,
};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use crate::references::NodeRef;
use std::cell::RefCell;
use std::rc::Rc;

/// One SET mutation: a property assignment or a label addition.
pub(crate) enum SetItem {
    Property { target: DynNode, value: DynNode },
    Labels { target: DynNode, labels: Vec<String> },
}

pub(crate) fn render_set_items(
    items: &[SetItem],
    env: &mut CompileEnv,
) -> Result<String, CompileError> {
    let mut rendered = Vec::with_capacity(items.len());
    for item in items {
        match item {
            SetItem::Property { target, value } => {
                rendered.push(format!(
                    "{} = {}",
                    compile_fragment(target, env)?,
                    compile_fragment(value, env)?
                ));
            }
            SetItem::Labels { target, labels } => {
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
    Ok(rendered.join(", "))
}

struct SetInner {
    core: NodeCore,
    items: RefCell<Vec<SetItem>>,
}

impl AstNode for SetInner {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let items = self.items.borrow();
        let rendered = render_set_items(&items, env)?;
        drop(items);
        Ok(format!("SET {}{}", rendered, compile_next(&self.core, env)?))
    }
}

/// `SET` update clause.
#[derive(Clone)]
pub struct Set {
    inner: Rc<SetInner>,
}

impl Set {
    /// Property assignment, `target = value`.
    pub fn new(target: impl Into<Expr>, value: impl Into<Expr>) -> Self {
        Self::empty().and_set(target, value)
    }

    /// Label addition, `n:Label`.
    pub fn label<I>(node: &NodeRef, labels: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::empty().and_label(node, labels)
    }

    fn empty() -> Self {
        Set {
            inner: Rc::new(SetInner {
                core: NodeCore::default(),
                items: RefCell::new(Vec::new()),
            }),
        }
    }

    pub(crate) fn chained(prev: &DynNode, target: Expr, value: Expr) -> Self {
        let clause = Self::new(target, value);
        add_next_clause(prev, &clause.as_dyn_node());
        clause
    }

    pub fn and_set(self, target: impl Into<Expr>, value: impl Into<Expr>) -> Self {
        let target = target.into().as_dyn_node();
        let value = value.into().as_dyn_node();
        adopt(&self.as_dyn_node(), &target);
        adopt(&self.as_dyn_node(), &value);
        self.inner
            .items
            .borrow_mut()
            .push(SetItem::Property { target, value });
        self
    }

    pub fn and_label<I>(self, node: &NodeRef, labels: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let target = Expr::from(node).as_dyn_node();
        adopt(&self.as_dyn_node(), &target);
        self.inner.items.borrow_mut().push(SetItem::Labels {
            target,
            labels: labels.into_iter().map(Into::into).collect(),
        });
        self
    }
}

impl AsAstNode for Set {
    fn as_dyn_node(&self) -> DynNode {
        self.inner.clone()
    }
}

/// Builder for the SET item lists carried by `MERGE … ON CREATE / ON MATCH`.
pub(crate) fn collect_set_items(
    owner: &DynNode,
    target: Expr,
    value: Expr,
    items: &RefCell<Vec<SetItem>>,
) {
    let target = target.as_dyn_node();
    let value = value.as_dyn_node();
    adopt(owner, &target);
    adopt(owner, &value);
    items.borrow_mut().push(SetItem::Property { target, value });
}
