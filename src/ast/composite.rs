//! Composite groups: the associative glue for combining independently-built
//! clause fragments.
//!
//! `concat` flattens as it goes, so repeated concatenation never produces
//! deepening nesting: nested composites are dissolved into their children,
//! empty composites vanish, and a concat that leaves exactly one real
//! fragment hands back that fragment's root instead of a wrapper.

use crate::ast::node::{
    adopt, compile_fragment, root_of, AsAstNode, AstNode, DynNode, NodeCore,
};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use std::rc::Rc;

/// Pass-through container holding ordered fragments and the separator used
/// to join their compiled texts.
pub struct CompositeInner {
    core: NodeCore,
    separator: &'static str,
}

impl CompositeInner {
    fn new(separator: &'static str) -> Rc<Self> {
        Rc::new(CompositeInner {
            core: NodeCore::default(),
            separator,
        })
    }

    pub(crate) fn fragments(&self) -> Vec<DynNode> {
        self.core.children()
    }
}

impl AstNode for CompositeInner {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let mut parts = Vec::new();
        for fragment in self.core.children() {
            let text = compile_fragment(&fragment, env)?;
            if !text.is_empty() {
                parts.push(text);
            }
        }
        Ok(parts.join(self.separator))
    }

    fn as_composite(&self) -> Option<&CompositeInner> {
        Some(self)
    }
}

/// Handle returned by [`concat`]. Wraps either a composite container or, in
/// the single-fragment case, that fragment's root directly.
#[derive(Clone)]
pub struct CompositeClause {
    node: DynNode,
}

impl CompositeClause {
    /// Number of directly concatenated fragments after flattening.
    pub fn fragment_count(&self) -> usize {
        match self.node.as_composite() {
            Some(inner) => inner.fragments().len(),
            None => 1,
        }
    }

    /// True when the concatenation collapsed to nothing.
    pub fn is_empty(&self) -> bool {
        match self.node.as_composite() {
            Some(inner) => inner.fragments().is_empty(),
            None => false,
        }
    }
}

impl AsAstNode for CompositeClause {
    fn as_dyn_node(&self) -> DynNode {
        Rc::clone(&self.node)
    }
}

/// Concatenate clause fragments, newline-joined on compile.
pub fn concat(fragments: &[&dyn AsAstNode]) -> CompositeClause {
    let nodes: Vec<DynNode> = fragments.iter().map(|f| f.as_dyn_node()).collect();
    concat_nodes(nodes)
}

/// [`concat`] over optional fragments; absent entries are filtered out.
pub fn concat_optional(fragments: &[Option<&dyn AsAstNode>]) -> CompositeClause {
    let nodes: Vec<DynNode> = fragments
        .iter()
        .filter_map(|f| f.map(|f| f.as_dyn_node()))
        .collect();
    concat_nodes(nodes)
}

fn concat_nodes(nodes: Vec<DynNode>) -> CompositeClause {
    let mut flattened = Vec::new();
    for node in &nodes {
        flatten_into(node, &mut flattened);
    }

    if flattened.len() == 1 {
        let only = flattened.remove(0);
        // Root resolution is best-effort here: a cyclic tree surfaces as an
        // error at build time, not during concatenation.
        let node = root_of(&only).unwrap_or(only);
        return CompositeClause { node };
    }

    let inner = CompositeInner::new("\n");
    let parent: DynNode = inner;
    for fragment in &flattened {
        adopt(&parent, fragment);
    }
    CompositeClause { node: parent }
}

/// Dissolve nested composites one level at a time; non-composite fragments
/// are kept as-is.
fn flatten_into(node: &DynNode, out: &mut Vec<DynNode>) {
    match node.as_composite() {
        Some(inner) => {
            for child in inner.fragments() {
                child.core().clear_parent();
                flatten_into(&child, out);
            }
        }
        None => out.push(Rc::clone(node)),
    }
}
