//! Graph patterns: alternating node and relationship elements, optionally
//! bound to a path variable.
//!
//! A pattern is built fluently left to right. Node methods (`labeled`) apply
//! to the most recent node element, relationship methods (`of_type`,
//! `any_length`) to the most recent relationship element, and `with_property`
//! to whichever element was added last.

use crate::ast::node::{adopt, compile_fragment, AsAstNode, AstNode, DynNode, NodeCore};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use crate::references::{NodeRef, PathVariable, RelationshipRef};
use crate::utils::escape_identifier;
use std::cell::RefCell;
use std::rc::Rc;

/// Relationship direction as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outgoing,
    Incoming,
    Undirected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VarLength {
    Any,
    Exact(u64),
    Range {
        min: Option<u64>,
        max: Option<u64>,
    },
}

impl VarLength {
    fn render(self) -> String {
        match self {
            VarLength::Any | VarLength::Range { min: None, max: None } => "*".to_string(),
            VarLength::Exact(n) => format!("*{}", n),
            VarLength::Range { min, max } => format!(
                "*{}..{}",
                min.map(|n| n.to_string()).unwrap_or_default(),
                max.map(|n| n.to_string()).unwrap_or_default()
            ),
        }
    }
}

#[derive(Clone)]
struct NodeElement {
    reference: NodeRef,
    labels: Vec<String>,
    properties: Vec<(String, DynNode)>,
}

#[derive(Clone)]
struct RelElement {
    reference: RelationshipRef,
    direction: Direction,
    types: Vec<String>,
    properties: Vec<(String, DynNode)>,
    length: Option<VarLength>,
}

#[derive(Clone)]
enum PatternElement {
    Node(NodeElement),
    Rel(RelElement),
}

struct PatternInner {
    core: NodeCore,
    elements: RefCell<Vec<PatternElement>>,
    path: RefCell<Option<PathVariable>>,
}

impl AstNode for PatternInner {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let mut out = String::new();
        let path = self.path.borrow().clone();
        if let Some(path) = path {
            out.push_str(&env.name_for(&path));
            out.push_str(" = ");
        }
        let elements = self.elements.borrow().clone();
        for element in &elements {
            match element {
                PatternElement::Node(node) => {
                    out.push('(');
                    out.push_str(&env.name_for(&node.reference));
                    out.push_str(&render_labels(
                        &node.labels,
                        env.label_conjunction_token(),
                        |label| env.escape_label(label),
                    ));
                    out.push_str(&render_properties(&node.properties, env)?);
                    out.push(')');
                }
                PatternElement::Rel(rel) => {
                    let mut inner = String::from("[");
                    inner.push_str(&env.name_for(&rel.reference));
                    inner.push_str(&render_labels(&rel.types, "|", |t| {
                        env.escape_relationship_type(t)
                    }));
                    if let Some(length) = rel.length {
                        inner.push_str(&length.render());
                    }
                    inner.push_str(&render_properties(&rel.properties, env)?);
                    inner.push(']');
                    out.push_str(match rel.direction {
                        Direction::Outgoing => "-",
                        Direction::Incoming => "<-",
                        Direction::Undirected => "-",
                    });
                    out.push_str(&inner);
                    out.push_str(match rel.direction {
                        Direction::Outgoing => "->",
                        Direction::Incoming => "-",
                        Direction::Undirected => "-",
                    });
                }
            }
        }
        Ok(out)
    }
}

fn render_labels(
    labels: &[String],
    join_token: &str,
    mut escape: impl FnMut(&str) -> String,
) -> String {
    if labels.is_empty() {
        return String::new();
    }
    let escaped: Vec<String> = labels.iter().map(|l| escape(l)).collect();
    format!(":{}", escaped.join(join_token))
}

fn render_properties(
    properties: &[(String, DynNode)],
    env: &mut CompileEnv,
) -> Result<String, CompileError> {
    if properties.is_empty() {
        return Ok(String::new());
    }
    let mut rendered = Vec::with_capacity(properties.len());
    for (key, value) in properties {
        rendered.push(format!(
            "{}: {}",
            escape_identifier(key),
            compile_fragment(value, env)?
        ));
    }
    Ok(format!(" {{{}}}", rendered.join(", ")))
}

/// Handle over a pattern under construction.
#[derive(Clone)]
pub struct Pattern {
    inner: Rc<PatternInner>,
}

impl Pattern {
    /// Start a pattern at a node.
    pub fn node(reference: &NodeRef) -> Self {
        let pattern = Pattern {
            inner: Rc::new(PatternInner {
                core: NodeCore::default(),
                elements: RefCell::new(Vec::new()),
                path: RefCell::new(None),
            }),
        };
        pattern.push_node(reference);
        pattern
    }

    fn push_node(&self, reference: &NodeRef) {
        self.inner
            .elements
            .borrow_mut()
            .push(PatternElement::Node(NodeElement {
                reference: reference.clone(),
                labels: Vec::new(),
                properties: Vec::new(),
            }));
    }

    /// Continue the pattern at another node (after a relationship element).
    pub fn to_node(self, reference: &NodeRef) -> Self {
        self.push_node(reference);
        self
    }

    /// Label on the most recent node element.
    pub fn labeled(self, label: impl Into<String>) -> Self {
        {
            let mut elements = self.inner.elements.borrow_mut();
            if let Some(PatternElement::Node(node)) = elements
                .iter_mut()
                .rev()
                .find(|e| matches!(e, PatternElement::Node(_)))
            {
                node.labels.push(label.into());
            }
        }
        self
    }

    pub fn with_labels<I>(self, labels: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut pattern = self;
        for label in labels {
            pattern = pattern.labeled(label);
        }
        pattern
    }

    /// Property on whichever element was added last.
    pub fn with_property(self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        let value = value.into().as_dyn_node();
        adopt(&self.as_dyn_node(), &value);
        {
            let mut elements = self.inner.elements.borrow_mut();
            match elements.last_mut() {
                Some(PatternElement::Node(node)) => {
                    node.properties.push((key.into(), value));
                }
                Some(PatternElement::Rel(rel)) => {
                    rel.properties.push((key.into(), value));
                }
                None => {}
            }
        }
        self
    }

    /// Outgoing relationship, `-[r]->`.
    pub fn related_to(self, reference: &RelationshipRef) -> Self {
        self.push_rel(reference, Direction::Outgoing)
    }

    /// Incoming relationship, `<-[r]-`.
    pub fn related_from(self, reference: &RelationshipRef) -> Self {
        self.push_rel(reference, Direction::Incoming)
    }

    /// Undirected relationship, `-[r]-`.
    pub fn related(self, reference: &RelationshipRef) -> Self {
        self.push_rel(reference, Direction::Undirected)
    }

    /// Relationship with the direction picked at runtime.
    pub fn related_via(self, reference: &RelationshipRef, direction: Direction) -> Self {
        self.push_rel(reference, direction)
    }

    fn push_rel(self, reference: &RelationshipRef, direction: Direction) -> Self {
        self.inner
            .elements
            .borrow_mut()
            .push(PatternElement::Rel(RelElement {
                reference: reference.clone(),
                direction,
                types: Vec::new(),
                properties: Vec::new(),
                length: None,
            }));
        self
    }

    /// Type on the most recent relationship element; repeated calls build a
    /// `TYPE_A|TYPE_B` alternation.
    pub fn of_type(self, rel_type: impl Into<String>) -> Self {
        {
            let mut elements = self.inner.elements.borrow_mut();
            if let Some(PatternElement::Rel(rel)) = elements
                .iter_mut()
                .rev()
                .find(|e| matches!(e, PatternElement::Rel(_)))
            {
                rel.types.push(rel_type.into());
            }
        }
        self
    }

    /// Unbounded variable length, `*`.
    pub fn any_length(self) -> Self {
        self.set_length(VarLength::Any)
    }

    /// Exact hop count, `*n`.
    pub fn length(self, hops: u64) -> Self {
        self.set_length(VarLength::Exact(hops))
    }

    /// Bounded variable length, `*min..max` with either bound optional.
    pub fn length_between(self, min: Option<u64>, max: Option<u64>) -> Self {
        self.set_length(VarLength::Range { min, max })
    }

    fn set_length(self, length: VarLength) -> Self {
        {
            let mut elements = self.inner.elements.borrow_mut();
            if let Some(PatternElement::Rel(rel)) = elements
                .iter_mut()
                .rev()
                .find(|e| matches!(e, PatternElement::Rel(_)))
            {
                rel.length = Some(length);
            }
        }
        self
    }

    /// Bind the whole pattern to a path variable, `p = (…)`.
    pub fn assign_to(self, path: &PathVariable) -> Self {
        *self.inner.path.borrow_mut() = Some(path.clone());
        self
    }
}

impl AsAstNode for Pattern {
    fn as_dyn_node(&self) -> DynNode {
        self.inner.clone()
    }
}
