//! In-memory page graph.
//!
//! Every entity of a page lives in a per-type arena owned by [`PageGraph`] and
//! is addressed through a typed [`Handle`]. References between entities are
//! handles, so recursive structures such as nested [`Elements`] never form
//! ownership cycles.
//!
//! One-to-many relations keep two views of the same edge: the parent's
//! collection and the child's back-reference. Both fields are private to this
//! module and can only change through [`PageGraph::assign`],
//! [`PageGraph::add`] and [`PageGraph::remove`], which keep them in step.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::Index;

use crate::model::{Document, Id};

pub mod entity;
pub mod persist;
pub mod relation;

pub use entity::*;
pub use persist::save_graph;
pub use relation::*;

mod sealed {
    use super::{Handle, PageGraph};
    use crate::model::Id;

    /// Arena access and identifier assignment, reserved to the graph.
    pub trait Stored: Sized {
        fn arena(graph: &PageGraph) -> &Vec<Self>;
        fn arena_mut(graph: &mut PageGraph) -> &mut Vec<Self>;
        fn assign_id(&mut self, id: Id);
    }

    /// Raw access to both sides of a one-to-many relation.
    pub trait Link {
        type Parent: super::Entity;
        type Child: super::Entity;

        fn members(parent: &Self::Parent) -> &Vec<Handle<Self::Child>>;
        fn members_mut(parent: &mut Self::Parent) -> &mut Vec<Handle<Self::Child>>;
        fn back_ref(child: &Self::Child) -> Option<Handle<Self::Parent>>;
        fn set_back_ref(child: &mut Self::Child, parent: Option<Handle<Self::Parent>>);
    }
}

use sealed::Stored;

/// Common contract of every node type.
///
/// Equality follows the identifier: two nodes are equal when they are the
/// same node, or when both carry the same identifier. Nodes that were never
/// persisted are only equal to themselves. Hashing ignores the identifier so
/// a node's hash does not change when the store assigns one.
pub trait Entity: Stored + Eq + Hash + fmt::Display + 'static {
    type Document: Document;

    fn id(&self) -> Option<&Id>;

    /// Snapshot of this node as a storable document. References to nodes that
    /// have no identifier yet are left empty.
    fn to_document(&self, graph: &PageGraph) -> Self::Document;
}

/// Typed index of a node inside a [`PageGraph`].
///
/// Handles are only meaningful for the graph that issued them.
pub struct Handle<T> {
    index: usize,
    marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    fn new(index: usize) -> Self {
        Self {
            index,
            marker: PhantomData,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = std::any::type_name::<T>();
        let short = name.rsplit("::").next().unwrap_or(name);
        write!(f, "{}#{}", short, self.index)
    }
}

/// Arena holding every node of one or more pages.
#[derive(Debug, Default)]
pub struct PageGraph {
    attributes: Vec<Attributes>,
    spacings: Vec<Spacing>,
    object_containing_strings: Vec<ObjectContainingString>,
    buttons: Vec<Button>,
    texts: Vec<Text>,
    icons: Vec<Icon>,
    images: Vec<Image>,
    badges: Vec<Badge>,
    badge_types: Vec<BadgeType>,
    display_atts: Vec<DisplayAtt>,
    labels: Vec<Label>,
    heads: Vec<Head>,
    tabel_values: Vec<TabelValues>,
    bodies: Vec<Body>,
    tables: Vec<Table>,
    form_wraps: Vec<FormWrap>,
    flex_boxes: Vec<FlexBox>,
    elements: Vec<Elements>,
    pages: Vec<Page>,
}

impl PageGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move a node into the graph.
    pub fn insert<T: Entity>(&mut self, node: T) -> Handle<T> {
        let arena = T::arena_mut(self);
        arena.push(node);
        Handle::new(arena.len() - 1)
    }

    /// Panics if `handle` was issued by another graph.
    pub fn get<T: Entity>(&self, handle: Handle<T>) -> &T {
        &T::arena(self)[handle.index]
    }

    /// Mutable access to a node. Relation fields stay read-only; change them
    /// through the relation operations.
    pub fn get_mut<T: Entity>(&mut self, handle: Handle<T>) -> &mut T {
        &mut T::arena_mut(self)[handle.index]
    }

    /// Handles of every node of type `T`, in insertion order.
    pub fn handles<T: Entity>(&self) -> impl Iterator<Item = Handle<T>> {
        (0..T::arena(self).len()).map(Handle::new)
    }

    pub fn count<T: Entity>(&self) -> usize {
        T::arena(self).len()
    }

    /// Identifier of the referenced node, if there is one and it has been persisted.
    pub fn id_of<T: Entity>(&self, handle: Option<Handle<T>>) -> Option<Id> {
        handle.and_then(|handle| self.get(handle).id().cloned())
    }

    /// Entity equality between two nodes of the graph.
    pub fn same<T: Entity>(&self, a: Handle<T>, b: Handle<T>) -> bool {
        self.get(a) == self.get(b)
    }
}

impl<T: Entity> Index<Handle<T>> for PageGraph {
    type Output = T;

    fn index(&self, handle: Handle<T>) -> &T {
        self.get(handle)
    }
}
