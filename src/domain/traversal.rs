//! Depth-first walks over an [`OrderedTree`].
//!
//! All walks share one explicit-stack state machine, so visitation order
//! matches the recursive definitions while depth is limited by the heap
//! rather than the call stack.

use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use generational_arena::{Arena, Index};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use crate::domain::error::TreeError;
use crate::domain::node::Node;
use crate::domain::tree::OrderedTree;

/// Position of a node relative to its subtrees in a depth-first walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalOrder {
    /// Left subtree, node, right subtree.
    #[default]
    #[serde(alias = "in", alias = "in-order")]
    InOrder,
    /// Node, left subtree, right subtree.
    #[serde(alias = "pre", alias = "pre-order")]
    PreOrder,
    /// Left subtree, right subtree, node.
    #[serde(alias = "post", alias = "post-order")]
    PostOrder,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalOrder::InOrder => "inorder",
            TraversalOrder::PreOrder => "preorder",
            TraversalOrder::PostOrder => "postorder",
        };
        f.write_str(name)
    }
}

impl FromStr for TraversalOrder {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" | "inorder" | "in-order" => Ok(TraversalOrder::InOrder),
            "pre" | "preorder" | "pre-order" => Ok(TraversalOrder::PreOrder),
            "post" | "postorder" | "post-order" => Ok(TraversalOrder::PostOrder),
            other => Err(TreeError::UnknownOrder(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Arrived,
    LeftDone,
    RightDone,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    index: Index,
    stage: Stage,
}

impl Frame {
    fn arrive(index: Index) -> Self {
        Self {
            index,
            stage: Stage::Arrived,
        }
    }
}

/// Walks node indices of an arena-backed tree in a given order.
#[derive(Debug, Clone)]
struct Walk {
    order: TraversalOrder,
    stack: Vec<Frame>,
}

impl Walk {
    fn new(root: Option<Index>, order: TraversalOrder) -> Self {
        Self {
            order,
            stack: root.map(Frame::arrive).into_iter().collect(),
        }
    }

    fn next<T>(&mut self, arena: &Arena<Node<T>>) -> Option<Index> {
        while let Some(&Frame { index, stage }) = self.stack.last() {
            let Some(node) = arena.get(index) else {
                self.stack.pop();
                continue;
            };
            match stage {
                Stage::Arrived => {
                    self.advance(Stage::LeftDone);
                    if let Some(left) = node.left {
                        self.stack.push(Frame::arrive(left));
                    }
                    if self.order == TraversalOrder::PreOrder {
                        return Some(index);
                    }
                }
                Stage::LeftDone => {
                    self.advance(Stage::RightDone);
                    if let Some(right) = node.right {
                        self.stack.push(Frame::arrive(right));
                    }
                    if self.order == TraversalOrder::InOrder {
                        return Some(index);
                    }
                }
                Stage::RightDone => {
                    self.stack.pop();
                    if self.order == TraversalOrder::PostOrder {
                        return Some(index);
                    }
                }
            }
        }
        None
    }

    fn advance(&mut self, stage: Stage) {
        if let Some(frame) = self.stack.last_mut() {
            frame.stage = stage;
        }
    }
}

/// Borrowing iterator over the elements of an [`OrderedTree`].
pub struct Traversal<'a, T> {
    arena: &'a Arena<Node<T>>,
    walk: Walk,
}

impl<'a, T> Traversal<'a, T> {
    pub fn order(&self) -> TraversalOrder {
        self.walk.order
    }
}

impl<'a, T> Iterator for Traversal<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        let index = self.walk.next(arena)?;
        arena.get(index).map(|node| &node.element)
    }
}

impl<T> FusedIterator for Traversal<'_, T> {}

pub(crate) struct Indices<'a, T> {
    arena: &'a Arena<Node<T>>,
    walk: Walk,
}

impl<T> Iterator for Indices<'_, T> {
    type Item = Index;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next(self.arena)
    }
}

impl<T> OrderedTree<T> {
    pub fn iter(&self, order: TraversalOrder) -> Traversal<'_, T> {
        Traversal {
            arena: self.arena(),
            walk: Walk::new(self.root_index(), order),
        }
    }

    pub(crate) fn indices(&self, order: TraversalOrder) -> Indices<'_, T> {
        Indices {
            arena: self.arena(),
            walk: Walk::new(self.root_index(), order),
        }
    }

    /// All elements in the given order.
    pub fn to_vec(&self, order: TraversalOrder) -> Vec<&T> {
        self.iter(order).collect()
    }

    /// Writes the walk into `buffer` until the tree or the buffer runs out.
    ///
    /// Returns the number of slots written; slots past that count are left
    /// untouched.
    #[instrument(level = "trace", skip_all, fields(%order, capacity = buffer.len()))]
    pub fn traverse_into<'a>(&'a self, order: TraversalOrder, buffer: &mut [Option<&'a T>]) -> usize {
        let mut written = 0;
        // buffer first: zip stops before pulling an element with no room left
        for (slot, element) in buffer.iter_mut().zip(self.iter(order)) {
            *slot = Some(element);
            written += 1;
        }
        trace!(written, "buffer filled");
        written
    }

    /// Calls `visit` on each element until it returns `true`.
    ///
    /// Returns how many elements were visited, the stopping one included.
    pub fn for_each<F>(&self, order: TraversalOrder, mut visit: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        self.for_each_with(order, |element, _: &mut ()| visit(element), &mut ())
    }

    /// Like [`for_each`](Self::for_each), threading a caller context through
    /// every call.
    #[instrument(level = "trace", skip_all, fields(%order))]
    pub fn for_each_with<C, F>(&self, order: TraversalOrder, mut visit: F, context: &mut C) -> usize
    where
        F: FnMut(&T, &mut C) -> bool,
    {
        let mut visited = 0;
        for element in self.iter(order) {
            visited += 1;
            if visit(element, context) {
                trace!(visited, "visitor stopped the walk");
                break;
            }
        }
        visited
    }
}
