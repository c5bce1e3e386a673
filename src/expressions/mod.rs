//! Expression surface: literals, operators, functions and the escape hatch.
//!
//! Every expression is an AST node behind a cheap-clone [`Expr`] handle.
//! Handles are single-use in the tree: building the same `Expr` into two
//! places is a structural error, while the underlying references it mentions
//! stay shared and keep their identity.

mod case_expression;
mod collections;
mod exists;
mod functions;
mod literal;
mod operators;
mod property;
mod raw;

pub use case_expression::Case;
pub use collections::{list_of, map_of};
pub use exists::exists;
pub use functions::{
    avg, coalesce, collect, count, count_distinct, count_star, element_id, function, head, keys,
    labels, last, max, min, properties, rel_type, size, sum, to_lower, to_upper,
};
pub use literal::lit;
pub use operators::{
    and, contains, divide, ends_with, eq, gt, gte, in_list, is_not_null, is_null, lt, lte, minus,
    modulo, neq, not, or, plus, pow, regex_matches, starts_with, times, xor,
};
pub use raw::{raw, raw_with};

use crate::ast::node::{AsAstNode, AstNode, DynNode, NodeCore};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::references::{AnyRef, NodeRef, Param, PathVariable, RelationshipRef, Variable};
use crate::utils::escape_identifier;
use std::rc::Rc;

/// Handle over an expression node.
#[derive(Clone)]
pub struct Expr {
    node: DynNode,
}

impl Expr {
    pub(crate) fn from_node(node: DynNode) -> Self {
        Expr { node }
    }

    /// Property access, `subject.key`, with the key escaped.
    pub fn property(&self, key: impl Into<String>) -> Expr {
        property::access(self.clone(), key)
    }
}

impl AsAstNode for Expr {
    fn as_dyn_node(&self) -> DynNode {
        Rc::clone(&self.node)
    }
}

/// Leaf node rendering a reference by its environment-assigned name.
struct RefExprNode {
    core: NodeCore,
    reference: AnyRef,
}

impl AstNode for RefExprNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        Ok(env.name_for(&self.reference))
    }
}

fn ref_expr(reference: AnyRef) -> Expr {
    Expr::from_node(Rc::new(RefExprNode {
        core: NodeCore::default(),
        reference,
    }))
}

/// Leaf node rendering a parameter as `$key` and recording its value.
struct ParamExprNode {
    core: NodeCore,
    param: Param,
}

impl AstNode for ParamExprNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let key = env.key_for(&self.param);
        Ok(format!("${}", escape_identifier(&key)))
    }
}

impl From<&Param> for Expr {
    fn from(param: &Param) -> Self {
        Expr::from_node(Rc::new(ParamExprNode {
            core: NodeCore::default(),
            param: param.clone(),
        }))
    }
}

impl From<Param> for Expr {
    fn from(param: Param) -> Self {
        Expr::from(&param)
    }
}

macro_rules! ref_into_expr {
    ($ty:ty) => {
        impl From<&$ty> for Expr {
            fn from(reference: &$ty) -> Self {
                ref_expr(AnyRef::from(reference))
            }
        }

        impl From<$ty> for Expr {
            fn from(reference: $ty) -> Self {
                Expr::from(&reference)
            }
        }
    };
}

ref_into_expr!(Variable);
ref_into_expr!(NodeRef);
ref_into_expr!(RelationshipRef);
ref_into_expr!(PathVariable);

macro_rules! value_into_expr {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Expr {
                fn from(value: $ty) -> Self {
                    literal::lit(value)
                }
            }
        )*
    };
}

value_into_expr!(i64, i32, u32, f64, bool, &str, String, serde_json::Value);

/// Property access on references without an intermediate `Expr` binding.
macro_rules! ref_property {
    ($($ty:ty),*) => {
        $(
            impl $ty {
                /// Property access, `name.key`, with the key escaped.
                pub fn property(&self, key: impl Into<String>) -> Expr {
                    Expr::from(self).property(key)
                }
            }
        )*
    };
}

ref_property!(Variable, NodeRef, RelationshipRef);
