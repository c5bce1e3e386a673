//! Reference handles: the identity-bearing objects that receive stable names
//! during a build.
//!
//! A reference is a cheap-clone handle over a shared identity. Two clones of
//! one handle are the same reference and always compile to the same name
//! within a build; two separately constructed handles are always distinct,
//! even when they carry equal display names.

use serde_json::Value;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REF_ID: AtomicU64 = AtomicU64::new(0);

/// Opaque identity handle. Allocated once per constructed reference and never
/// rendered into query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefId(u64);

fn next_ref_id() -> RefId {
    RefId(NEXT_REF_ID.fetch_add(1, Ordering::Relaxed))
}

/// The four disjoint naming categories for non-parameter references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefCategory {
    Variable,
    Node,
    Relationship,
    Path,
}

impl RefCategory {
    /// Textual prefix for auto-generated names in this category. Categories
    /// with distinct prefixes count independently; categories that shared a
    /// prefix would share one counter and therefore never collide.
    pub(crate) fn prefix(self) -> &'static str {
        match self {
            RefCategory::Variable => "var",
            RefCategory::Node => "n",
            RefCategory::Relationship => "r",
            RefCategory::Path => "p",
        }
    }
}

/// Contract every nameable reference satisfies: identity, category and an
/// optional caller-supplied display name.
pub trait Reference {
    fn ref_id(&self) -> RefId;
    fn category(&self) -> RefCategory;
    fn explicit_name(&self) -> Option<&str>;
}

#[derive(Debug)]
struct RefInner {
    id: RefId,
    category: RefCategory,
    name: Option<String>,
}

impl RefInner {
    fn new(category: RefCategory, name: Option<String>) -> Rc<Self> {
        Rc::new(RefInner {
            id: next_ref_id(),
            category,
            name,
        })
    }
}

macro_rules! reference_handle {
    ($(#[$doc:meta])* $name:ident, $category:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            inner: Rc<RefInner>,
        }

        impl $name {
            /// Anonymous reference; named by the environment at first use.
            pub fn new() -> Self {
                $name {
                    inner: RefInner::new($category, None),
                }
            }

            /// Reference with a caller-supplied name, used verbatim (escaped
            /// at render time).
            pub fn named(name: impl Into<String>) -> Self {
                $name {
                    inner: RefInner::new($category, Some(name.into())),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Reference for $name {
            fn ref_id(&self) -> RefId {
                self.inner.id
            }

            fn category(&self) -> RefCategory {
                self.inner.category
            }

            fn explicit_name(&self) -> Option<&str> {
                self.inner.name.as_deref()
            }
        }

        impl PartialEq for $name {
            /// Identity comparison: clones of one handle are equal, separate
            /// constructions are not.
            fn eq(&self, other: &Self) -> bool {
                self.inner.id == other.inner.id
            }
        }

        impl Eq for $name {}
    };
}

reference_handle!(
    /// General-purpose variable (`var0`, `var1`, …).
    Variable,
    RefCategory::Variable
);
reference_handle!(
    /// Node placeholder used in patterns (`n0`, `n1`, …).
    NodeRef,
    RefCategory::Node
);
reference_handle!(
    /// Relationship placeholder used in patterns (`r0`, `r1`, …).
    RelationshipRef,
    RefCategory::Relationship
);
reference_handle!(
    /// Path placeholder bound with `p = (…)-[…]-(…)` assignments.
    PathVariable,
    RefCategory::Path
);

/// Type-erased reference handle, used where pattern elements and expression
/// leaves store any of the four categories.
#[derive(Debug, Clone)]
pub enum AnyRef {
    Variable(Variable),
    Node(NodeRef),
    Relationship(RelationshipRef),
    Path(PathVariable),
}

impl Reference for AnyRef {
    fn ref_id(&self) -> RefId {
        match self {
            AnyRef::Variable(r) => r.ref_id(),
            AnyRef::Node(r) => r.ref_id(),
            AnyRef::Relationship(r) => r.ref_id(),
            AnyRef::Path(r) => r.ref_id(),
        }
    }

    fn category(&self) -> RefCategory {
        match self {
            AnyRef::Variable(r) => r.category(),
            AnyRef::Node(r) => r.category(),
            AnyRef::Relationship(r) => r.category(),
            AnyRef::Path(r) => r.category(),
        }
    }

    fn explicit_name(&self) -> Option<&str> {
        match self {
            AnyRef::Variable(r) => r.explicit_name(),
            AnyRef::Node(r) => r.explicit_name(),
            AnyRef::Relationship(r) => r.explicit_name(),
            AnyRef::Path(r) => r.explicit_name(),
        }
    }
}

impl From<&Variable> for AnyRef {
    fn from(r: &Variable) -> Self {
        AnyRef::Variable(r.clone())
    }
}

impl From<&NodeRef> for AnyRef {
    fn from(r: &NodeRef) -> Self {
        AnyRef::Node(r.clone())
    }
}

impl From<&RelationshipRef> for AnyRef {
    fn from(r: &RelationshipRef) -> Self {
        AnyRef::Relationship(r.clone())
    }
}

impl From<&PathVariable> for AnyRef {
    fn from(r: &PathVariable) -> Self {
        AnyRef::Path(r.clone())
    }
}

#[derive(Debug)]
struct ParamInner {
    id: RefId,
    key: Option<String>,
    value: Value,
}

/// A bound value. The literal never reaches the query text; the parameter
/// compiles to `$key` and the value is collected into the build's parameter
/// map under that key.
#[derive(Debug, Clone)]
pub struct Param {
    inner: Rc<ParamInner>,
}

impl Param {
    /// Anonymous parameter; keyed `param0`, `param1`, … at first use.
    pub fn new(value: impl Into<Value>) -> Self {
        Param {
            inner: Rc::new(ParamInner {
                id: next_ref_id(),
                key: None,
                value: value.into(),
            }),
        }
    }

    /// Parameter with a caller-supplied key, kept verbatim in the output map.
    pub fn named(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Param {
            inner: Rc::new(ParamInner {
                id: next_ref_id(),
                key: Some(key.into()),
                value: value.into(),
            }),
        }
    }

    pub fn ref_id(&self) -> RefId {
        self.inner.id
    }

    pub fn explicit_key(&self) -> Option<&str> {
        self.inner.key.as_deref()
    }

    pub fn value(&self) -> &Value {
        &self.inner.value
    }
}

impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Param {}
