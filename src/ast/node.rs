//! Base tree abstraction every compilable element extends.
//!
//! Nodes form a single-parent tree: attaching a node registers a dependency
//! edge on the parent and a back-pointer on the child. The back-pointers
//! exist only so a build started on any chain member can discover the tree
//! root; the compilation core reads them and never mutates a tree.

use crate::environment::CompileEnv;
use crate::errors::CompileError;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Compile contract. An empty string means the node contributes nothing to
/// the output, which is not an error.
pub trait AstNode {
    fn core(&self) -> &NodeCore;

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError>;

    /// Pass-through hook for concat flattening. Only composite containers
    /// return their inner state here.
    fn as_composite(&self) -> Option<&crate::ast::composite::CompositeInner> {
        None
    }
}

pub type DynNode = Rc<dyn AstNode>;

/// Anything that hands out its underlying AST node: clause handles, patterns,
/// expressions.
pub trait AsAstNode {
    fn as_dyn_node(&self) -> DynNode;
}

/// Per-node links: parent back-pointer, ordered children, optional forward
/// link to the next clause in a chain.
#[derive(Default)]
pub struct NodeCore {
    parent: RefCell<Option<Weak<dyn AstNode>>>,
    children: RefCell<Vec<DynNode>>,
    next_clause: RefCell<Option<DynNode>>,
}

impl NodeCore {
    pub(crate) fn children(&self) -> Vec<DynNode> {
        self.children.borrow().clone()
    }

    pub(crate) fn next_clause(&self) -> Option<DynNode> {
        self.next_clause.borrow().clone()
    }

    /// Detach from the current parent. Used when a composite container is
    /// dissolved by flattening and its children move to the new container.
    pub(crate) fn clear_parent(&self) {
        *self.parent.borrow_mut() = None;
    }
}

fn node_addr(node: &DynNode) -> usize {
    Rc::as_ptr(node).cast::<()>() as usize
}

pub(crate) fn same_node(a: &DynNode, b: &DynNode) -> bool {
    node_addr(a) == node_addr(b)
}

pub(crate) const REATTACH_MSG: &str =
    "fragment is already attached to a different parent; a fragment can belong to only one tree \
     (build a fresh fragment, or share the underlying reference instead)";

/// Register `child` under `parent`.
///
/// # Panics
/// Panics if `child` already belongs to a different parent. Attaching the
/// same child to the same parent again is allowed.
pub(crate) fn adopt(parent: &DynNode, child: &DynNode) {
    {
        let mut slot = child.core().parent.borrow_mut();
        match slot.as_ref().and_then(|weak| weak.upgrade()) {
            Some(existing) if !same_node(&existing, parent) => panic!("{}", REATTACH_MSG),
            Some(_) => {}
            None => *slot = Some(Rc::downgrade(parent)),
        }
    }
    parent.core().children.borrow_mut().push(Rc::clone(child));
}

/// Append `next` at the tail of `clause`'s forward chain. The chained clause
/// is also adopted as a child so root discovery works from any chain member.
pub(crate) fn add_next_clause(clause: &DynNode, next: &DynNode) {
    let mut tail = Rc::clone(clause);
    loop {
        let forward = tail.core().next_clause.borrow().clone();
        match forward {
            Some(n) => tail = n,
            None => break,
        }
    }
    adopt(&tail, next);
    *tail.core().next_clause.borrow_mut() = Some(Rc::clone(next));
}

/// Walk parent pointers to the top of the tree. Well-formed trees are acyclic
/// by construction; the visited set turns an accidental cycle into an error
/// instead of an infinite loop.
pub fn root_of(node: &DynNode) -> Result<DynNode, CompileError> {
    let mut current = Rc::clone(node);
    let mut visited = vec![node_addr(&current)];
    loop {
        let parent = current
            .core()
            .parent
            .borrow()
            .as_ref()
            .and_then(|weak| weak.upgrade());
        match parent {
            Some(p) => {
                let addr = node_addr(&p);
                if visited.contains(&addr) {
                    return Err(CompileError::CyclicParentChain);
                }
                visited.push(addr);
                current = p;
            }
            None => return Ok(current),
        }
    }
}

/// Compile one fragment. On the strict build path errors propagate; on the
/// lenient debug path the fragment's text is replaced with an inline marker
/// so inspection of a malformed tree never itself fails.
pub(crate) fn compile_fragment(
    node: &DynNode,
    env: &mut CompileEnv,
) -> Result<String, CompileError> {
    match node.compile(env) {
        Ok(text) => Ok(text),
        Err(err) if env.is_lenient() => Ok(format!("<compile error: {}>", err)),
        Err(err) => Err(err),
    }
}

/// Compile the forward chain, newline-joined after the owner's own text.
pub(crate) fn compile_next(core: &NodeCore, env: &mut CompileEnv) -> Result<String, CompileError> {
    match core.next_clause() {
        Some(next) => {
            let text = compile_fragment(&next, env)?;
            if text.is_empty() {
                Ok(String::new())
            } else {
                Ok(format!("\n{}", text))
            }
        }
        None => Ok(String::new()),
    }
}
