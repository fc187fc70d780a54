//! Generic tree traversal
//!
//! Any frozen element or resource can be walked without knowing its concrete
//! type. Each node describes its owned children through [`Visitable::children`];
//! [`walk`] drives a [`Visitor`] through them depth-first, pre-order, in
//! declaration order (ancestor-declared fields first).
//!
//! Per node the visitor sees:
//! 1. `pre_visit` - returning false skips the node and its subtree entirely
//! 2. `visit_start` - entry, with the field name and list index (if repeating)
//! 3. `visit` - returning false skips the children, but not the end callbacks
//! 4. `visit_end` - mirrors `visit_start`
//! 5. `post_visit` - always last
//!
//! Repeating fields are bracketed by `visit_list_start` / `visit_list_end`, and
//! raw scalar payloads (element ids, primitive values) arrive via `visit_value`.

mod collect;
mod iter;

pub use collect::{collect, CollectingVisitor};
pub use iter::{nodes, NodeIter};

use std::any::Any;

use crate::primitive::ValueRef;
use crate::schema::{ModelType, TypeInfo, TypeKind};

/// A node of a frozen model tree
pub trait Visitable: Any + Send + Sync + 'static {
    fn type_info(&self) -> &'static TypeInfo;

    /// Describe the owned children, in declaration order
    fn children<'a>(&'a self, children: &mut Children<'a>);

    fn as_any(&self) -> &dyn Any;

    fn type_name(&self) -> &'static str {
        self.type_info().name
    }

    fn is_resource(&self) -> bool {
        self.type_info().kind == TypeKind::Resource
    }
}

impl dyn Visitable {
    pub fn downcast_ref<T: Visitable>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Visitable>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// One named child slot of a node
#[derive(Clone)]
pub enum Child<'a> {
    /// A singular element or resource
    Node(&'a dyn Visitable),
    /// A non-empty repeating field
    List {
        item_type: &'static str,
        items: Vec<&'a dyn Visitable>,
    },
    /// A raw scalar (element id, primitive value)
    Value(ValueRef<'a>),
}

/// Ordered child slots collected from a node; absent and empty fields are skipped
#[derive(Clone, Default)]
pub struct Children<'a> {
    entries: Vec<(&'static str, Child<'a>)>,
}

impl<'a> Children<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&mut self, name: &'static str, value: Option<ValueRef<'a>>) -> &mut Self {
        if let Some(value) = value {
            self.entries.push((name, Child::Value(value)));
        }
        self
    }

    pub fn element<T: Visitable>(&mut self, name: &'static str, value: Option<&'a T>) -> &mut Self {
        if let Some(value) = value {
            self.entries.push((name, Child::Node(value)));
        }
        self
    }

    pub fn node(&mut self, name: &'static str, node: Option<&'a dyn Visitable>) -> &mut Self {
        if let Some(node) = node {
            self.entries.push((name, Child::Node(node)));
        }
        self
    }

    pub fn list<T: Visitable + ModelType>(&mut self, name: &'static str, items: &'a [T]) -> &mut Self {
        let items = items.iter().map(|item| item as &dyn Visitable).collect();
        self.list_of(name, T::schema().name, items)
    }

    pub fn list_of(
        &mut self,
        name: &'static str,
        item_type: &'static str,
        items: Vec<&'a dyn Visitable>,
    ) -> &mut Self {
        if !items.is_empty() {
            self.entries.push((name, Child::List { item_type, items }));
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, Child<'a>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<(&'static str, Child<'a>)> {
        self.entries
    }
}

/// Callbacks invoked by [`walk`]
///
/// Every method has a default, so a visitor overrides only what it needs.
/// `'a` is the lifetime of the tree, which lets visitors keep node references.
pub trait Visitor<'a> {
    /// Return false to skip this node and its subtree
    fn pre_visit(&mut self, _node: &'a dyn Visitable) -> bool {
        true
    }

    fn visit_start(&mut self, _name: &'static str, _index: Option<usize>, _node: &'a dyn Visitable) {}

    /// Return false to skip the children of this node
    fn visit(&mut self, _name: &'static str, _index: Option<usize>, _node: &'a dyn Visitable) -> bool {
        true
    }

    fn visit_value(&mut self, _name: &'static str, _value: ValueRef<'a>) {}

    fn visit_list_start(&mut self, _name: &'static str, _len: usize, _item_type: &'static str) {}

    fn visit_list_end(&mut self, _name: &'static str, _len: usize, _item_type: &'static str) {}

    fn visit_end(&mut self, _name: &'static str, _index: Option<usize>, _node: &'a dyn Visitable) {}

    fn post_visit(&mut self, _node: &'a dyn Visitable) {}
}

/// Walk a tree from its root; the root is announced under its type name
pub fn walk<'a, V>(root: &'a dyn Visitable, visitor: &mut V)
where
    V: Visitor<'a> + ?Sized,
{
    tracing::trace!(root = root.type_name(), "walking model tree");
    accept(root.type_name(), None, root, visitor);
}

/// Visit one node under the given field name and list position
pub fn accept<'a, V>(name: &'static str, index: Option<usize>, node: &'a dyn Visitable, visitor: &mut V)
where
    V: Visitor<'a> + ?Sized,
{
    if !visitor.pre_visit(node) {
        return;
    }
    visitor.visit_start(name, index, node);
    if visitor.visit(name, index, node) {
        let mut children = Children::new();
        node.children(&mut children);
        for (child_name, child) in children.into_entries() {
            match child {
                Child::Value(value) => visitor.visit_value(child_name, value),
                Child::Node(child) => accept(child_name, None, child, visitor),
                Child::List { item_type, items } => {
                    visitor.visit_list_start(child_name, items.len(), item_type);
                    for (i, item) in items.iter().enumerate() {
                        accept(child_name, Some(i), *item, visitor);
                    }
                    visitor.visit_list_end(child_name, items.len(), item_type);
                }
            }
        }
    }
    visitor.visit_end(name, index, node);
    visitor.post_visit(node);
}
