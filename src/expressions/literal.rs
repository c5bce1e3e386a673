//! Inline literal rendering.
//!
//! Literals embed their value directly in the query text. Data that should
//! travel out-of-band belongs in a [`crate::references::Param`] instead; the
//! builder itself never turns a literal into a parameter.

use crate::ast::node::{AstNode, NodeCore};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use crate::utils::escape_identifier;
use serde_json::Value;
use std::rc::Rc;

struct LiteralNode {
    core: NodeCore,
    value: Value,
}

impl AstNode for LiteralNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, _env: &mut CompileEnv) -> Result<String, CompileError> {
        Ok(render_value(&self.value))
    }
}

/// Literal expression from any JSON-representable value.
pub fn lit(value: impl Into<Value>) -> Expr {
    Expr::from_node(Rc::new(LiteralNode {
        core: NodeCore::default(),
        value: value.into(),
    }))
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => render_string(s),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Object(entries) => {
            let rendered: Vec<String> = entries
                .iter()
                .map(|(key, value)| format!("{}: {}", escape_identifier(key), render_value(value)))
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
    }
}

fn render_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
