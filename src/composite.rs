//! # Composite Tree
//!
//! Leaves and composites share the [`Component`] trait, so client code can
//! run an operation over a whole tree without checking node types. Calling
//! [`Component::operation`] on a composite reports the composite first and
//! then each child in insertion order (pre-order, depth first).
//!
//! Children are held as [`ComponentRef`] (`Rc<dyn Component>`); keep a clone
//! of a child's handle if you want to [`remove`](Component::remove) it later.
//! A composite's child list sits behind a `RefCell`, so nodes can be attached
//! and detached after the tree has been assembled.
//!
//! Trees must stay acyclic. Adding a node beneath itself makes
//! [`Component::operation`] recurse without end; nothing here checks for it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::diagnostics::{Diagnostics, Source};
use crate::error::{PatternError, Result};

pub type ComponentRef = Rc<dyn Component>;

pub trait Component: fmt::Debug {
    fn name(&self) -> &str;

    /// Runs this node's action, then its descendants' in pre-order.
    fn operation(&self);

    fn add(&self, _child: ComponentRef) -> Result<()> {
        Err(PatternError::unsupported("Add", self.describe()))
    }

    fn remove(&self, _child: &ComponentRef) -> Result<()> {
        Err(PatternError::unsupported("Remove", self.describe()))
    }

    fn child(&self, _index: usize) -> Result<ComponentRef> {
        Err(PatternError::unsupported("Get child", self.describe()))
    }

    fn children_len(&self) -> usize {
        0
    }

    fn is_composite(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        format!("leaf '{}'", self.name())
    }
}

// Compare data pointers only; vtable pointers are not guaranteed unique.
fn same_node(a: &ComponentRef, b: &ComponentRef) -> bool {
    std::ptr::eq(
        Rc::as_ptr(a) as *const (),
        Rc::as_ptr(b) as *const (),
    )
}

#[derive(Debug)]
pub struct Leaf {
    name: String,
    diagnostics: Diagnostics,
}

impl Leaf {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_diagnostics(name, Diagnostics::default())
    }

    pub fn with_diagnostics(name: impl Into<String>, diagnostics: Diagnostics) -> Self {
        Leaf {
            name: name.into(),
            diagnostics,
        }
    }

    pub fn into_ref(self) -> ComponentRef {
        Rc::new(self)
    }
}

impl Component for Leaf {
    fn name(&self) -> &str {
        &self.name
    }

    fn operation(&self) {
        self.diagnostics
            .info(Source::Composite, format!("Leaf {} operation.", self.name));
    }
}

#[derive(Debug)]
pub struct Composite {
    name: String,
    children: RefCell<Vec<ComponentRef>>,
    diagnostics: Diagnostics,
}

impl Composite {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_diagnostics(name, Diagnostics::default())
    }

    pub fn with_diagnostics(name: impl Into<String>, diagnostics: Diagnostics) -> Self {
        Composite {
            name: name.into(),
            children: RefCell::new(Vec::new()),
            diagnostics,
        }
    }

    /// Builder-style add for assembling trees bottom-up.
    pub fn with_child(mut self, child: ComponentRef) -> Self {
        self.children.get_mut().push(child);
        self
    }

    /// Snapshot of the current children, in insertion order.
    pub fn children(&self) -> Vec<ComponentRef> {
        self.children.borrow().clone()
    }

    pub fn into_ref(self) -> ComponentRef {
        Rc::new(self)
    }
}

impl Component for Composite {
    fn name(&self) -> &str {
        &self.name
    }

    fn operation(&self) {
        self.diagnostics
            .info(Source::Composite, format!("Composite {} operation.", self.name));
        for child in self.children.borrow().iter() {
            child.operation();
        }
    }

    fn add(&self, child: ComponentRef) -> Result<()> {
        self.children.borrow_mut().push(child);
        Ok(())
    }

    /// Drops the first child that is the very same node. Missing is a no-op.
    fn remove(&self, child: &ComponentRef) -> Result<()> {
        let mut children = self.children.borrow_mut();
        if let Some(pos) = children.iter().position(|c| same_node(c, child)) {
            children.remove(pos);
        }
        Ok(())
    }

    fn child(&self, index: usize) -> Result<ComponentRef> {
        let children = self.children.borrow();
        children
            .get(index)
            .cloned()
            .ok_or(PatternError::ChildIndexOutOfRange {
                index,
                len: children.len(),
            })
    }

    fn children_len(&self) -> usize {
        self.children.borrow().len()
    }

    fn is_composite(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        format!("composite '{}'", self.name)
    }
}
