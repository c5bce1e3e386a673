//! Clause catalogue and the chaining surface.
//!
//! Every clause is a cheap-clone handle over its AST node. Clauses chain
//! forward: `match.returning(…)` creates the RETURN, links it after the
//! MATCH, and hands back the RETURN handle; building from any handle in the
//! chain compiles the whole statement from its root.

mod call_clause;
mod create_clause;
mod delete_clause;
mod foreach_clause;
mod match_clause;
mod merge_clause;
mod order_by_and_page_clause;
mod projection;
mod raw_clause;
mod remove_clause;
mod return_clause;
mod set_clause;
mod union_clause;
mod unwind_clause;
mod where_clause;
mod with_clause;

pub use call_clause::Call;
pub use create_clause::Create;
pub use delete_clause::Delete;
pub use foreach_clause::Foreach;
pub use match_clause::Match;
pub use merge_clause::Merge;
pub use projection::ProjectionItem;
pub use raw_clause::RawClause;
pub use remove_clause::Remove;
pub use return_clause::Return;
pub use set_clause::Set;
pub use union_clause::{Union, UnionType};
pub use unwind_clause::Unwind;
pub use with_clause::With;

use crate::ast::composite::CompositeClause;
use crate::ast::node::AsAstNode;
use crate::build::{BuildConfig, BuildResult};
use crate::errors::CompileError;
use crate::expressions::Expr;
use crate::patterns::Pattern;
use crate::references::Variable;

/// A buildable clause. `build` resolves the chain's root, compiles the whole
/// statement with one fresh environment, and returns text plus parameters;
/// `debug_render` is the best-effort inspection path.
pub trait Clause: AsAstNode {
    fn build(&self, config: &BuildConfig) -> Result<BuildResult, CompileError> {
        crate::build::build_node(self.as_dyn_node(), config)
    }

    fn debug_render(&self) -> String {
        crate::build::debug_render_node(self.as_dyn_node())
    }
}

impl Clause for Call {}
impl Clause for CompositeClause {}
impl Clause for Create {}
impl Clause for Delete {}
impl Clause for Foreach {}
impl Clause for Match {}
impl Clause for Merge {}
impl Clause for RawClause {}
impl Clause for Remove {}
impl Clause for Return {}
impl Clause for Set {}
impl Clause for Union {}
impl Clause for Unwind {}
impl Clause for With {}

/// Forward-chaining constructors shared by the clauses a statement can
/// continue from.
pub trait ChainedClause: AsAstNode {
    fn match_(&self, pattern: Pattern) -> Match {
        Match::chained(&self.as_dyn_node(), pattern, false)
    }

    fn optional_match(&self, pattern: Pattern) -> Match {
        Match::chained(&self.as_dyn_node(), pattern, true)
    }

    fn create(&self, pattern: Pattern) -> Create {
        Create::chained(&self.as_dyn_node(), pattern)
    }

    fn merge(&self, pattern: Pattern) -> Merge {
        Merge::chained(&self.as_dyn_node(), pattern)
    }

    fn unwind(&self, list: impl Into<Expr>, alias: &Variable) -> Unwind {
        Unwind::chained(&self.as_dyn_node(), list.into(), alias)
    }

    fn with_<I>(&self, items: I) -> With
    where
        I: IntoIterator,
        I::Item: Into<ProjectionItem>,
    {
        With::chained(&self.as_dyn_node(), items, false)
    }

    fn with_star(&self) -> With {
        With::chained(&self.as_dyn_node(), Vec::<ProjectionItem>::new(), true)
    }

    fn returning<I>(&self, items: I) -> Return
    where
        I: IntoIterator,
        I::Item: Into<ProjectionItem>,
    {
        Return::chained(&self.as_dyn_node(), items, false)
    }

    fn returning_star(&self) -> Return {
        Return::chained(&self.as_dyn_node(), Vec::<ProjectionItem>::new(), true)
    }

    fn delete<I>(&self, items: I) -> Delete
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Delete::chained(&self.as_dyn_node(), items, false)
    }

    fn detach_delete<I>(&self, items: I) -> Delete
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Delete::chained(&self.as_dyn_node(), items, true)
    }

    fn set(&self, target: impl Into<Expr>, value: impl Into<Expr>) -> Set {
        Set::chained(&self.as_dyn_node(), target.into(), value.into())
    }

    fn remove(&self, target: impl Into<Expr>) -> Remove {
        Remove::chained(&self.as_dyn_node(), target.into())
    }

    fn foreach(&self, variable: &Variable, list: impl Into<Expr>) -> Foreach {
        Foreach::chained(&self.as_dyn_node(), variable, list.into())
    }

    fn call_subquery(&self, inner: &dyn AsAstNode) -> Call {
        Call::chained_subquery(&self.as_dyn_node(), inner)
    }

    fn raw_clause(&self, text: impl Into<String>) -> RawClause {
        RawClause::chained(&self.as_dyn_node(), text.into())
    }
}

impl ChainedClause for Call {}
impl ChainedClause for Create {}
impl ChainedClause for Delete {}
impl ChainedClause for Foreach {}
impl ChainedClause for Match {}
impl ChainedClause for Merge {}
impl ChainedClause for RawClause {}
impl ChainedClause for Remove {}
impl ChainedClause for Return {}
impl ChainedClause for Set {}
impl ChainedClause for Unwind {}
impl ChainedClause for With {}
