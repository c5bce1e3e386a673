use crate::ast::node::{
    add_next_clause, adopt, compile_fragment, compile_next, AsAstNode, AstNode, DynNode, NodeCore,
};
use crate::clauses::order_by_and_page_clause::OrderByAndPage;
use crate::clauses::projection::{render_items, ProjectionItem};
use crate::clauses::where_clause::WhereNode;
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct WithInner {
    core: NodeCore,
    distinct: Cell<bool>,
    star: bool,
    items: RefCell<Vec<(DynNode, Option<String>)>>,
    page: Rc<OrderByAndPage>,
    where_clause: RefCell<Option<Rc<WhereNode>>>,
}

impl AstNode for WithInner {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let items = self.items.borrow().clone();
        let rendered = render_items(&items, self.star, env)?;
        let distinct = if self.distinct.get() { "DISTINCT " } else { "" };
        let mut out = format!("WITH {}{}", distinct, rendered);

        let page: DynNode = self.page.clone();
        let page_text = compile_fragment(&page, env)?;
        if !page_text.is_empty() {
            out.push('\n');
            out.push_str(&page_text);
        }

        let where_clause = self.where_clause.borrow().clone();
        if let Some(where_clause) = where_clause {
            let node: DynNode = where_clause;
            let text = compile_fragment(&node, env)?;
            if !text.is_empty() {
                out.push('\n');
                out.push_str(&text);
            }
        }
        out.push_str(&compile_next(&self.core, env)?);
        Ok(out)
    }
}

/// `WITH` projection clause carrying scope into the next part of the query.
#[derive(Clone)]
pub struct With {
    inner: Rc<WithInner>,
}

impl With {
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ProjectionItem>,
    {
        Self::make(items, false)
    }

    /// `WITH *`.
    pub fn star() -> Self {
        Self::make(Vec::<ProjectionItem>::new(), true)
    }

    fn make<I>(items: I, star: bool) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ProjectionItem>,
    {
        let clause = With {
            inner: Rc::new(WithInner {
                core: NodeCore::default(),
                distinct: Cell::new(false),
                star,
                items: RefCell::new(Vec::new()),
                page: OrderByAndPage::new(),
                where_clause: RefCell::new(None),
            }),
        };
        {
            let page: DynNode = clause.inner.page.clone();
            adopt(&clause.as_dyn_node(), &page);
        }
        for item in items {
            clause.push_item(item.into());
        }
        clause
    }

    pub(crate) fn chained<I>(prev: &DynNode, items: I, star: bool) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ProjectionItem>,
    {
        let clause = Self::make(items, star);
        add_next_clause(prev, &clause.as_dyn_node());
        clause
    }

    fn push_item(&self, item: ProjectionItem) {
        adopt(&self.as_dyn_node(), &item.node);
        self.inner.items.borrow_mut().push((item.node, item.alias));
    }

    /// Additional projected column.
    pub fn item(self, item: impl Into<ProjectionItem>) -> Self {
        self.push_item(item.into());
        self
    }

    pub fn distinct(self) -> Self {
        self.inner.distinct.set(true);
        self
    }

    pub fn order_by(self, expr: impl Into<Expr>) -> Self {
        OrderByAndPage::push_order(&self.inner.page, &expr.into().as_dyn_node(), false);
        self
    }

    pub fn order_by_desc(self, expr: impl Into<Expr>) -> Self {
        OrderByAndPage::push_order(&self.inner.page, &expr.into().as_dyn_node(), true);
        self
    }

    pub fn skip(self, expr: impl Into<Expr>) -> Self {
        OrderByAndPage::set_skip(&self.inner.page, &expr.into().as_dyn_node());
        self
    }

    pub fn limit(self, expr: impl Into<Expr>) -> Self {
        OrderByAndPage::set_limit(&self.inner.page, &expr.into().as_dyn_node());
        self
    }

    /// Filter condition after the projection; repeated calls are AND-joined.
    pub fn where_(self, condition: impl Into<Expr>) -> Self {
        let condition = condition.into().as_dyn_node();
        let where_clause = {
            let mut slot = self.inner.where_clause.borrow_mut();
            match slot.as_ref() {
                Some(existing) => existing.clone(),
                None => {
                    let created = WhereNode::new();
                    *slot = Some(created.clone());
                    created
                }
            }
        };
        let node: DynNode = where_clause.clone();
        adopt(&self.as_dyn_node(), &node);
        WhereNode::push(&where_clause, &condition);
        self
    }
}

impl AsAstNode for With {
    fn as_dyn_node(&self) -> DynNode {
        self.inner.clone()
    }
}
