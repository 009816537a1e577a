use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, instrument};

use crate::domain::error::{TreeError, TreeResult};
use crate::domain::tree::{Comparator, Destructor, OrderedTree, DEFAULT_DEPTH_WARNING};

/// Step-by-step construction of an [`OrderedTree`].
///
/// Building without a comparator fails with [`TreeError::MissingComparator`].
pub struct OrderedTreeBuilder<T> {
    comparator: Option<Comparator<T>>,
    destructor: Option<Destructor<T>>,
    max_nodes: Option<usize>,
    depth_warning: usize,
}

impl<T> Default for OrderedTreeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedTreeBuilder<T> {
    pub fn new() -> Self {
        Self {
            comparator: None,
            destructor: None,
            max_nodes: None,
            depth_warning: DEFAULT_DEPTH_WARNING,
        }
    }

    pub fn comparator<C>(mut self, comparator: C) -> Self
    where
        C: Fn(&T, &T) -> Ordering + 'static,
    {
        self.comparator = Some(Box::new(comparator));
        self
    }

    pub fn destructor<D>(mut self, destructor: D) -> Self
    where
        D: FnMut(T) + 'static,
    {
        self.destructor = Some(Box::new(destructor));
        self
    }

    /// Caps the number of nodes; storage is reserved up front and inserts
    /// beyond the cap fail.
    pub fn max_nodes(mut self, max_nodes: Option<usize>) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Depth past which an insert logs a degenerate-shape warning.
    pub fn depth_warning(mut self, depth: usize) -> Self {
        self.depth_warning = depth;
        self
    }

    #[instrument(level = "debug", skip(self))]
    pub fn build(self) -> TreeResult<OrderedTree<T>> {
        let comparator = self.comparator.ok_or(TreeError::MissingComparator)?;
        debug!(
            max_nodes = ?self.max_nodes,
            depth_warning = self.depth_warning,
            has_destructor = self.destructor.is_some(),
            "building tree"
        );
        Ok(OrderedTree::from_parts(
            comparator,
            self.destructor,
            self.max_nodes,
            self.depth_warning,
        ))
    }
}

impl<T: Ord + 'static> OrderedTreeBuilder<T> {
    /// Uses `T`'s own ordering.
    pub fn natural_order(self) -> Self {
        self.comparator(T::cmp)
    }
}

impl<T> fmt::Debug for OrderedTreeBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedTreeBuilder")
            .field("has_comparator", &self.comparator.is_some())
            .field("has_destructor", &self.destructor.is_some())
            .field("max_nodes", &self.max_nodes)
            .field("depth_warning", &self.depth_warning)
            .finish()
    }
}
