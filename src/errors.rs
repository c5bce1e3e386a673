use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CompileError {
    #[error("cycle detected while resolving the tree root (parent links must form a tree)")]
    CyclicParentChain,
    #[error("FOREACH has no update clauses (supply at least one SET, REMOVE, CREATE, MERGE or DELETE)")]
    EmptyForeachBody,
    #[error("UNION requires at least two queries (got {0})")]
    UnionTooFewQueries(usize),
    #[error("custom fragment failed: {0}")]
    CustomFragment(String),
}

impl CompileError {
    /// Wrap a caller-side failure raised inside an escape-hatch fragment.
    pub fn custom(message: impl Into<String>) -> Self {
        CompileError::CustomFragment(message.into())
    }
}
