//! List and map constructors whose members are expressions, for collections
//! that mix references, parameters and literals.

use crate::ast::node::{adopt, compile_fragment, AsAstNode, AstNode, DynNode, NodeCore};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use crate::utils::escape_identifier;
use std::rc::Rc;

struct ListNode {
    core: NodeCore,
    items: Vec<DynNode>,
}

impl AstNode for ListNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let mut rendered = Vec::with_capacity(self.items.len());
        for item in &self.items {
            rendered.push(compile_fragment(item, env)?);
        }
        Ok(format!("[{}]", rendered.join(", ")))
    }
}

/// List expression, `[a, b, …]`.
pub fn list_of<I>(items: I) -> Expr
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    let items: Vec<DynNode> = items
        .into_iter()
        .map(|item| item.into().as_dyn_node())
        .collect();
    let node = Rc::new(ListNode {
        core: NodeCore::default(),
        items: items.clone(),
    });
    let parent: DynNode = node;
    for item in &items {
        adopt(&parent, item);
    }
    Expr::from_node(parent)
}

struct MapNode {
    core: NodeCore,
    entries: Vec<(String, DynNode)>,
}

impl AstNode for MapNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let mut rendered = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            rendered.push(format!(
                "{}: {}",
                escape_identifier(key),
                compile_fragment(value, env)?
            ));
        }
        Ok(format!("{{{}}}", rendered.join(", ")))
    }
}

/// Map expression, `{key: value, …}`, with keys escaped.
pub fn map_of<I, K>(entries: I) -> Expr
where
    I: IntoIterator<Item = (K, Expr)>,
    K: Into<String>,
{
    let entries: Vec<(String, DynNode)> = entries
        .into_iter()
        .map(|(key, value)| (key.into(), value.as_dyn_node()))
        .collect();
    let node = Rc::new(MapNode {
        core: NodeCore::default(),
        entries: entries.clone(),
    });
    let parent: DynNode = node;
    for (_, value) in &entries {
        adopt(&parent, value);
    }
    Expr::from_node(parent)
}
