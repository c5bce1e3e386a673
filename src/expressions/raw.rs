//! Escape hatch for fragments the catalogue does not cover.
//!
//! A raw fragment is either fixed text or a callback handed the live
//! environment, so hand-written text can still resolve reference names and
//! register parameters through the normal machinery.

use crate::ast::node::{AstNode, NodeCore};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use std::rc::Rc;

type RawCallback = Box<dyn Fn(&mut CompileEnv) -> Result<String, CompileError>>;

enum RawProducer {
    Text(String),
    Callback(RawCallback),
}

struct RawNode {
    core: NodeCore,
    producer: RawProducer,
}

impl AstNode for RawNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        match &self.producer {
            RawProducer::Text(text) => Ok(text.clone()),
            RawProducer::Callback(callback) => callback(env),
        }
    }
}

/// Fixed raw text in expression position.
pub fn raw(text: impl Into<String>) -> Expr {
    Expr::from_node(Rc::new(RawNode {
        core: NodeCore::default(),
        producer: RawProducer::Text(text.into()),
    }))
}

/// Raw fragment produced by a callback at compile time. An `Err` from the
/// callback aborts the build; the debug-rendering path replaces the fragment
/// with an inline error marker instead.
pub fn raw_with(
    callback: impl Fn(&mut CompileEnv) -> Result<String, CompileError> + 'static,
) -> Expr {
    Expr::from_node(Rc::new(RawNode {
        core: NodeCore::default(),
        producer: RawProducer::Callback(Box::new(callback)),
    }))
}
