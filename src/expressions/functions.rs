//! Function invocations.
//!
//! `function` covers any Cypher function by name; the named helpers wrap the
//! ones that show up in almost every query. Function names come from the
//! caller's own catalogue and are emitted as given, not escaped.

use crate::ast::node::{adopt, compile_fragment, AsAstNode, AstNode, DynNode, NodeCore};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use std::rc::Rc;

struct FunctionCallNode {
    core: NodeCore,
    name: String,
    args: Vec<DynNode>,
    star: bool,
    distinct: bool,
}

impl AstNode for FunctionCallNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        if self.star {
            return Ok(format!("{}(*)", self.name));
        }
        let mut rendered = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            rendered.push(compile_fragment(arg, env)?);
        }
        let distinct = if self.distinct { "DISTINCT " } else { "" };
        Ok(format!("{}({}{})", self.name, distinct, rendered.join(", ")))
    }
}

fn call(name: impl Into<String>, args: Vec<Expr>, star: bool, distinct: bool) -> Expr {
    let args: Vec<DynNode> = args.into_iter().map(|a| a.as_dyn_node()).collect();
    let node = Rc::new(FunctionCallNode {
        core: NodeCore::default(),
        name: name.into(),
        args: args.clone(),
        star,
        distinct,
    });
    let parent: DynNode = node;
    for arg in &args {
        adopt(&parent, arg);
    }
    Expr::from_node(parent)
}

/// Invocation of an arbitrary function by name.
pub fn function<I>(name: impl Into<String>, args: I) -> Expr
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    call(name, args.into_iter().map(Into::into).collect(), false, false)
}

pub fn count(arg: impl Into<Expr>) -> Expr {
    call("count", vec![arg.into()], false, false)
}

/// `count(*)`.
pub fn count_star() -> Expr {
    call("count", Vec::new(), true, false)
}

/// `count(DISTINCT x)`.
pub fn count_distinct(arg: impl Into<Expr>) -> Expr {
    call("count", vec![arg.into()], false, true)
}

pub fn collect(arg: impl Into<Expr>) -> Expr {
    call("collect", vec![arg.into()], false, false)
}

pub fn coalesce<I>(args: I) -> Expr
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    function("coalesce", args)
}

pub fn size(arg: impl Into<Expr>) -> Expr {
    call("size", vec![arg.into()], false, false)
}

pub fn labels(arg: impl Into<Expr>) -> Expr {
    call("labels", vec![arg.into()], false, false)
}

pub fn element_id(arg: impl Into<Expr>) -> Expr {
    call("elementId", vec![arg.into()], false, false)
}

/// Relationship type, `type(r)`.
pub fn rel_type(arg: impl Into<Expr>) -> Expr {
    call("type", vec![arg.into()], false, false)
}

pub fn to_upper(arg: impl Into<Expr>) -> Expr {
    call("toUpper", vec![arg.into()], false, false)
}

pub fn to_lower(arg: impl Into<Expr>) -> Expr {
    call("toLower", vec![arg.into()], false, false)
}

pub fn head(arg: impl Into<Expr>) -> Expr {
    call("head", vec![arg.into()], false, false)
}

pub fn last(arg: impl Into<Expr>) -> Expr {
    call("last", vec![arg.into()], false, false)
}

pub fn keys(arg: impl Into<Expr>) -> Expr {
    call("keys", vec![arg.into()], false, false)
}

pub fn properties(arg: impl Into<Expr>) -> Expr {
    call("properties", vec![arg.into()], false, false)
}

pub fn avg(arg: impl Into<Expr>) -> Expr {
    call("avg", vec![arg.into()], false, false)
}

pub fn sum(arg: impl Into<Expr>) -> Expr {
    call("sum", vec![arg.into()], false, false)
}

pub fn min(arg: impl Into<Expr>) -> Expr {
    call("min", vec![arg.into()], false, false)
}

pub fn max(arg: impl Into<Expr>) -> Expr {
    call("max", vec![arg.into()], false, false)
}
