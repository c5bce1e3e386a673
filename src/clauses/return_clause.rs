use crate::ast::node::{
    add_next_clause, adopt, compile_fragment, compile_next, AsAstNode, AstNode, DynNode, NodeCore,
};
use crate::clauses::order_by_and_page_clause::OrderByAndPage;
use crate::clauses::projection::{render_items, ProjectionItem};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct ReturnInner {
    core: NodeCore,
    distinct: Cell<bool>,
    star: bool,
    items: RefCell<Vec<(DynNode, Option<String>)>>,
    page: Rc<OrderByAndPage>,
}

impl AstNode for ReturnInner {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let items = self.items.borrow().clone();
        let rendered = render_items(&items, self.star, env)?;
        let distinct = if self.distinct.get() { "DISTINCT " } else { "" };
        let mut out = format!("RETURN {}{}", distinct, rendered);

        let page: DynNode = self.page.clone();
        let page_text = compile_fragment(&page, env)?;
        if !page_text.is_empty() {
            out.push('\n');
            out.push_str(&page_text);
        }
        out.push_str(&compile_next(&self.core, env)?);
        Ok(out)
    }
}

/// `RETURN` projection clause.
#[derive(Clone)]
pub struct Return {
    inner: Rc<ReturnInner>,
}

impl Return {
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ProjectionItem>,
    {
        Self::make(items, false)
    }

    /// `RETURN *`.
    pub fn star() -> Self {
        Self::make(Vec::<ProjectionItem>::new(), true)
    }

    fn make<I>(items: I, star: bool) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ProjectionItem>,
    {
        let clause = Return {
            inner: Rc::new(ReturnInner {
                core: NodeCore::default(),
                distinct: Cell::new(false),
                star,
                items: RefCell::new(Vec::new()),
                page: OrderByAndPage::new(),
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
}

impl AsAstNode for Return {
    fn as_dyn_node(&self) -> DynNode {
        self.inner.clone()
    }
}
