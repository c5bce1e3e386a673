pub mod composite;
pub mod node;

pub use composite::{concat, concat_optional, CompositeClause};
pub use node::{root_of, AsAstNode, AstNode, DynNode, NodeCore};
