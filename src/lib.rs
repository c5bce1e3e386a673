//! cyphergen - programmatic Cypher query builder
//!
//! This crate turns an object graph of clauses, patterns and expressions
//! into a Cypher query string plus an extracted map of bind parameters:
//! - identity-based naming: every anonymous reference gets a deterministic
//!   name on first encounter, stable across one build
//! - parameter extraction: literal values travel out-of-band, the text only
//!   carries `$key` references
//! - identifier escaping that round-trips arbitrary names through the Cypher
//!   lexer
//! - clause chaining and composite flattening for assembling statements from
//!   independently-built fragments
//!
//! The builder only ever produces text and parameters; it never parses,
//! validates against a schema, or talks to a database.
//!
//! ```
//! use cyphergen::{eq, BuildConfig, ChainedClause, Clause, Match, NodeRef, Param, Pattern};
//!
//! let movie = NodeRef::new();
//! let clause = Match::new(Pattern::node(&movie).labeled("Movie"))
//!     .where_(eq(movie.property("title"), Param::new("The Matrix")))
//!     .returning([&movie]);
//! let built = clause.build(&BuildConfig::default()).unwrap();
//! assert_eq!(
//!     built.query,
//!     "MATCH (n0:Movie)\nWHERE (n0.title = $param0)\nRETURN n0"
//! );
//! ```

pub mod ast;
pub mod build;
pub mod clauses;
pub mod environment;
pub mod errors;
pub mod expressions;
pub mod patterns;
pub mod references;
pub mod utils;

pub use ast::{concat, concat_optional, CompositeClause};
pub use build::{build, debug_render, BuildConfig, BuildResult, LabelConjunction};
pub use clauses::{
    Call, ChainedClause, Clause, Create, Delete, Foreach, Match, Merge, ProjectionItem, RawClause,
    Remove, Return, Set, Union, UnionType, Unwind, With,
};
pub use environment::CompileEnv;
pub use errors::CompileError;
pub use expressions::*;
pub use patterns::{Direction, Pattern};
pub use references::{NodeRef, Param, PathVariable, RelationshipRef, Variable};
