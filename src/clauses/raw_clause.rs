//! Clause-position escape hatch, the clause-level counterpart of
//! [`crate::expressions::raw_with`].

use crate::ast::node::{add_next_clause, compile_next, AsAstNode, AstNode, DynNode, NodeCore};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use std::rc::Rc;

type RawCallback = Box<dyn Fn(&mut CompileEnv) -> Result<String, CompileError>>;

enum RawProducer {
    Text(String),
    Callback(RawCallback),
}

struct RawClauseInner {
    core: NodeCore,
    producer: RawProducer,
}

impl AstNode for RawClauseInner {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let text = match &self.producer {
            RawProducer::Text(text) => text.clone(),
            RawProducer::Callback(callback) => callback(env)?,
        };
        Ok(format!("{}{}", text, compile_next(&self.core, env)?))
    }
}

/// Hand-written clause text, chainable like any catalogue clause.
#[derive(Clone)]
pub struct RawClause {
    inner: Rc<RawClauseInner>,
}

impl RawClause {
    pub fn new(text: impl Into<String>) -> Self {
        RawClause {
            inner: Rc::new(RawClauseInner {
                core: NodeCore::default(),
                producer: RawProducer::Text(text.into()),
            }),
        }
    }

    /// Clause text produced by a callback at compile time; the callback may
    /// resolve names and register parameters through the environment.
    pub fn with(
        callback: impl Fn(&mut CompileEnv) -> Result<String, CompileError> + 'static,
    ) -> Self {
        RawClause {
            inner: Rc::new(RawClauseInner {
                core: NodeCore::default(),
                producer: RawProducer::Callback(Box::new(callback)),
            }),
        }
    }

    pub(crate) fn chained(prev: &DynNode, text: String) -> Self {
        let clause = Self::new(text);
        add_next_clause(prev, &clause.as_dyn_node());
        clause
    }
}

impl AsAstNode for RawClause {
    fn as_dyn_node(&self) -> DynNode {
        self.inner.clone()
    }
}
