use std::cmp::Ordering;
use std::fmt;
use std::mem;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, trace, warn};

use crate::domain::builder::OrderedTreeBuilder;
use crate::domain::error::{CapacityError, TreeError, TreeResult};
use crate::domain::node::{Node, Slot};
use crate::domain::traversal::TraversalOrder;

/// Total order over two elements.
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering>;

/// Disposal hook receiving each element the tree lets go of.
pub type Destructor<T> = Box<dyn FnMut(T)>;

pub(crate) const DEFAULT_DEPTH_WARNING: usize = 64;

/// Unbalanced binary search tree ordered by a caller-supplied comparator.
///
/// Nodes live in a generational arena and are linked through
/// `Option<Index>` slots. Elements comparing equal are all kept: insertion
/// sends anything that does not compare greater to the left, so a later
/// duplicate ends up in the left subtree of an earlier one, and lookups
/// return the first match on the search path.
///
/// Every element handed to [`insert`](Self::insert) leaves the tree exactly
/// once: through the destructor on [`delete`](Self::delete) or teardown, or
/// back to the caller through [`take`](Self::take) or a failed insert.
pub struct OrderedTree<T> {
    arena: Arena<Node<T>>,
    root: Option<Index>,
    comparator: Comparator<T>,
    destructor: Option<Destructor<T>>,
    max_nodes: Option<usize>,
    depth_warning: usize,
}

impl<T> OrderedTree<T> {
    /// Creates a tree; fails when no comparator is supplied.
    ///
    /// Without a destructor, removed elements are simply dropped, which
    /// leaves the referent of handle types (`&X`, `Rc<X>`) with the caller.
    pub fn create(
        comparator: Option<Comparator<T>>,
        destructor: Option<Destructor<T>>,
    ) -> TreeResult<Self> {
        let comparator = comparator.ok_or(TreeError::MissingComparator)?;
        Ok(Self::from_parts(comparator, destructor, None, DEFAULT_DEPTH_WARNING))
    }

    pub fn new<C>(comparator: C) -> Self
    where
        C: Fn(&T, &T) -> Ordering + 'static,
    {
        Self::from_parts(Box::new(comparator), None, None, DEFAULT_DEPTH_WARNING)
    }

    pub fn with_destructor<C, D>(comparator: C, destructor: D) -> Self
    where
        C: Fn(&T, &T) -> Ordering + 'static,
        D: FnMut(T) + 'static,
    {
        Self::from_parts(
            Box::new(comparator),
            Some(Box::new(destructor)),
            None,
            DEFAULT_DEPTH_WARNING,
        )
    }

    pub fn builder() -> OrderedTreeBuilder<T> {
        OrderedTreeBuilder::new()
    }

    pub(crate) fn from_parts(
        comparator: Comparator<T>,
        destructor: Option<Destructor<T>>,
        max_nodes: Option<usize>,
        depth_warning: usize,
    ) -> Self {
        // A bounded tree gets all of its storage up front and never grows.
        let arena = match max_nodes {
            Some(capacity) => Arena::with_capacity(capacity),
            None => Arena::new(),
        };
        Self {
            arena,
            root: None,
            comparator,
            destructor,
            max_nodes,
            depth_warning,
        }
    }

    /// Tears the tree down, disposing every element post-order.
    pub fn destroy(self) {
        drop(self);
    }

    /// Disposes every element post-order and leaves an empty tree.
    #[instrument(level = "trace", skip_all, fields(len = self.arena.len()))]
    pub fn clear(&mut self) {
        let doomed: Vec<Index> = self.indices(TraversalOrder::PostOrder).collect();
        self.root = None;
        for idx in doomed {
            if let Some(node) = self.arena.remove(idx) {
                self.dispose(node.element);
            }
        }
        debug!("tree cleared");
    }

    /// Inserts `element` as a new leaf.
    ///
    /// Fails only when a node limit is configured and reached; the element is
    /// returned inside the error.
    #[instrument(level = "trace", skip_all)]
    pub fn insert(&mut self, element: T) -> Result<(), CapacityError<T>> {
        let mut slot = Slot::Root;
        let mut depth = 1;
        while let Some(idx) = self.occupant(slot) {
            let node = &self.arena[idx];
            slot = match (self.comparator)(&element, &node.element) {
                Ordering::Greater => Slot::Right(idx),
                Ordering::Less | Ordering::Equal => Slot::Left(idx),
            };
            depth += 1;
        }

        let idx = self.allocate(Node::leaf(element))?;
        self.set_slot(slot, Some(idx));
        trace!(?slot, depth, "leaf linked");

        if self.depth_warning.checked_add(1) == Some(depth) {
            warn!(
                depth,
                threshold = self.depth_warning,
                "tree depth exceeds warning threshold, insertion order is degenerate"
            );
        }
        Ok(())
    }

    /// Element comparing equal to `key`, first match on the search path.
    pub fn find_value(&self, key: &T) -> Option<&T> {
        let slot = self.find_slot(key)?;
        self.element_at(slot)
    }

    /// Mutable access to the matching element. Changing how it orders breaks
    /// the tree.
    pub fn find_value_mut(&mut self, key: &T) -> Option<&mut T> {
        let slot = self.find_slot(key)?;
        let idx = self.occupant(slot)?;
        self.arena.get_mut(idx).map(|node| &mut node.element)
    }

    /// Location holding the node that matches `key`.
    #[instrument(level = "trace", skip_all)]
    pub fn find_slot(&self, key: &T) -> Option<Slot> {
        let mut slot = Slot::Root;
        while let Some(idx) = self.occupant(slot) {
            let node = &self.arena[idx];
            slot = match (self.comparator)(key, &node.element) {
                Ordering::Equal => return Some(slot),
                Ordering::Greater => Slot::Right(idx),
                Ordering::Less => Slot::Left(idx),
            };
        }
        None
    }

    /// Element held by the node at `slot`, if the slot is occupied.
    pub fn element_at(&self, slot: Slot) -> Option<&T> {
        let idx = self.occupant(slot)?;
        self.arena.get(idx).map(|node| &node.element)
    }

    /// Removes the element matching `key` and hands it to the destructor.
    #[instrument(level = "trace", skip_all)]
    pub fn delete(&mut self, key: &T) -> TreeResult<()> {
        let slot = self.find_slot(key).ok_or(TreeError::NotFound)?;
        let element = self.excise(slot).ok_or(TreeError::NotFound)?;
        self.dispose(element);
        Ok(())
    }

    /// Removes the element matching `key` and returns it; the destructor is
    /// not called.
    #[instrument(level = "trace", skip_all)]
    pub fn take(&mut self, key: &T) -> Option<T> {
        let slot = self.find_slot(key)?;
        self.excise(slot)
    }

    pub fn root(&self) -> Option<&T> {
        self.element_at(Slot::Root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|idx| (idx, 1)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.arena.get(idx) {
                for child in [node.left, node.right].into_iter().flatten() {
                    stack.push((child, depth + 1));
                }
            }
        }

        max_depth
    }

    pub(crate) fn arena(&self) -> &Arena<Node<T>> {
        &self.arena
    }

    pub(crate) fn root_index(&self) -> Option<Index> {
        self.root
    }

    fn allocate(&mut self, node: Node<T>) -> Result<Index, CapacityError<T>> {
        match self.max_nodes {
            None => Ok(self.arena.insert(node)),
            Some(capacity) => {
                if self.arena.len() >= capacity {
                    return Err(CapacityError {
                        element: node.element,
                        capacity,
                    });
                }
                self.arena.try_insert(node).map_err(|node| CapacityError {
                    element: node.element,
                    capacity,
                })
            }
        }
    }

    fn occupant(&self, slot: Slot) -> Option<Index> {
        match slot {
            Slot::Root => self.root,
            Slot::Left(parent) => self.arena.get(parent).and_then(|node| node.left),
            Slot::Right(parent) => self.arena.get(parent).and_then(|node| node.right),
        }
    }

    fn set_slot(&mut self, slot: Slot, occupant: Option<Index>) {
        match slot {
            Slot::Root => self.root = occupant,
            Slot::Left(parent) => {
                if let Some(node) = self.arena.get_mut(parent) {
                    node.left = occupant;
                }
            }
            Slot::Right(parent) => {
                if let Some(node) = self.arena.get_mut(parent) {
                    node.right = occupant;
                }
            }
        }
    }

    /// Detaches the element held at `slot`, splicing the tree back together.
    ///
    /// A node with two children keeps its position and receives the element
    /// of its in-order successor, whose own node is unlinked instead.
    fn excise(&mut self, slot: Slot) -> Option<T> {
        let idx = self.occupant(slot)?;
        if !self.arena.get(idx)?.has_two_children() {
            debug!(?slot, "unlinking node with at most one child");
            return self.unlink(slot);
        }

        let successor = self.leftmost_slot(Slot::Right(idx));
        debug!(?slot, ?successor, "splicing in-order successor");
        let element = self.unlink(successor)?;
        let node = self.arena.get_mut(idx)?;
        Some(mem::replace(&mut node.element, element))
    }

    /// Slot of the leftmost node in the subtree at `slot`.
    fn leftmost_slot(&self, mut slot: Slot) -> Slot {
        while let Some(idx) = self.occupant(slot) {
            match self.arena.get(idx).and_then(|node| node.left) {
                Some(_) => slot = Slot::Left(idx),
                None => break,
            }
        }
        slot
    }

    /// Frees the node at `slot`, which must have at most one child, and
    /// moves that child into the slot.
    fn unlink(&mut self, slot: Slot) -> Option<T> {
        let idx = self.occupant(slot)?;
        let node = self.arena.remove(idx)?;
        self.set_slot(slot, node.sole_child());
        Some(node.element)
    }

    fn dispose(&mut self, element: T) {
        if let Some(destructor) = self.destructor.as_mut() {
            destructor(element);
        }
    }
}

impl<T: Ord + 'static> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new(T::cmp)
    }
}

impl<T> Drop for OrderedTree<T> {
    fn drop(&mut self) {
        if !self.is_empty() {
            self.clear();
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter(TraversalOrder::InOrder))
            .finish()
    }
}
