//! ORDER BY / SKIP / LIMIT sub-clause attached to RETURN and WITH.

use crate::ast::node::{adopt, compile_fragment, AstNode, DynNode, NodeCore};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use std::cell::RefCell;
use std::rc::Rc;

pub(crate) struct OrderByAndPage {
    core: NodeCore,
    items: RefCell<Vec<(DynNode, bool)>>,
    skip: RefCell<Option<DynNode>>,
    limit: RefCell<Option<DynNode>>,
}

impl OrderByAndPage {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(OrderByAndPage {
            core: NodeCore::default(),
            items: RefCell::new(Vec::new()),
            skip: RefCell::new(None),
            limit: RefCell::new(None),
        })
    }

    pub(crate) fn push_order(this: &Rc<Self>, expr: &DynNode, descending: bool) {
        let me: DynNode = this.clone();
        adopt(&me, expr);
        this.items.borrow_mut().push((Rc::clone(expr), descending));
    }

    pub(crate) fn set_skip(this: &Rc<Self>, expr: &DynNode) {
        let me: DynNode = this.clone();
        adopt(&me, expr);
        *this.skip.borrow_mut() = Some(Rc::clone(expr));
    }

    pub(crate) fn set_limit(this: &Rc<Self>, expr: &DynNode) {
        let me: DynNode = this.clone();
        adopt(&me, expr);
        *this.limit.borrow_mut() = Some(Rc::clone(expr));
    }
}

impl AstNode for OrderByAndPage {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let mut lines = Vec::new();

        let items = self.items.borrow().clone();
        if !items.is_empty() {
            let mut rendered = Vec::with_capacity(items.len());
            for (expr, descending) in &items {
                let text = compile_fragment(expr, env)?;
                if *descending {
                    rendered.push(format!("{} DESC", text));
                } else {
                    rendered.push(text);
                }
            }
            lines.push(format!("ORDER BY {}", rendered.join(", ")));
        }

        let skip = self.skip.borrow().clone();
        if let Some(skip) = skip {
            lines.push(format!("SKIP {}", compile_fragment(&skip, env)?));
        }

        let limit = self.limit.borrow().clone();
        if let Some(limit) = limit {
            lines.push(format!("LIMIT {}", compile_fragment(&limit, env)?));
        }

        Ok(lines.join("\n"))
    }
}
