//! Projection items shared by RETURN and WITH.

use crate::ast::node::{compile_fragment, AsAstNode, DynNode};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use crate::references::{NodeRef, PathVariable, RelationshipRef, Variable};
use crate::utils::escape_identifier;

/// One projected column: an expression plus an optional alias.
pub struct ProjectionItem {
    pub(crate) node: DynNode,
    pub(crate) alias: Option<String>,
}

impl From<Expr> for ProjectionItem {
    fn from(expr: Expr) -> Self {
        ProjectionItem {
            node: expr.as_dyn_node(),
            alias: None,
        }
    }
}

impl From<(Expr, &str)> for ProjectionItem {
    fn from((expr, alias): (Expr, &str)) -> Self {
        ProjectionItem {
            node: expr.as_dyn_node(),
            alias: Some(alias.to_string()),
        }
    }
}

impl From<(Expr, String)> for ProjectionItem {
    fn from((expr, alias): (Expr, String)) -> Self {
        ProjectionItem {
            node: expr.as_dyn_node(),
            alias: Some(alias),
        }
    }
}

macro_rules! reference_projection {
    ($($ty:ty),*) => {
        $(
            impl From<&$ty> for ProjectionItem {
                fn from(reference: &$ty) -> Self {
                    ProjectionItem::from(Expr::from(reference))
                }
            }

            impl From<(&$ty, &str)> for ProjectionItem {
                fn from((reference, alias): (&$ty, &str)) -> Self {
                    ProjectionItem::from((Expr::from(reference), alias))
                }
            }
        )*
    };
}

reference_projection!(Variable, NodeRef, RelationshipRef, PathVariable);

/// Render `a, b.x AS alias` or `*`.
pub(crate) fn render_items(
    items: &[(DynNode, Option<String>)],
    star: bool,
    env: &mut CompileEnv,
) -> Result<String, CompileError> {
    if star {
        return Ok("*".to_string());
    }
    let mut rendered = Vec::with_capacity(items.len());
    for (node, alias) in items {
        let text = compile_fragment(node, env)?;
        match alias {
            Some(alias) => rendered.push(format!("{} AS {}", text, escape_identifier(alias))),
            None => rendered.push(text),
        }
    }
    Ok(rendered.join(", "))
}
