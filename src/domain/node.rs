use generational_arena::Index;

/// Tree node stored in the arena.
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) element: T,
    pub(crate) left: Option<Index>,
    pub(crate) right: Option<Index>,
}

impl<T> Node<T> {
    pub(crate) fn leaf(element: T) -> Self {
        Self {
            element,
            left: None,
            right: None,
        }
    }

    pub(crate) fn has_two_children(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    /// Child that takes this node's place when it is unlinked.
    ///
    /// Only meaningful for nodes with at most one child; the right child wins.
    pub(crate) fn sole_child(&self) -> Option<Index> {
        self.right.or(self.left)
    }
}

/// Location that holds a node: the tree's root link or one of a parent's
/// child links.
///
/// Outside the crate a slot is a read-only handle: it can only be passed back
/// to [`OrderedTree::element_at`](crate::domain::OrderedTree::element_at).
/// Any insert or delete may invalidate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Root,
    Left(Index),
    Right(Index),
}
