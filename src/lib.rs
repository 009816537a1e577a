//! Generic, unbalanced binary search tree over a caller-supplied order.
//!
//! ```
//! use ordtree::domain::{OrderedTree, TraversalOrder};
//!
//! let mut tree = OrderedTree::default();
//! for v in [50, 30, 70, 20, 40, 60, 80] {
//!     tree.insert(v).unwrap();
//! }
//! tree.delete(&50).unwrap();
//!
//! assert_eq!(tree.root(), Some(&60));
//! assert_eq!(
//!     tree.to_vec(TraversalOrder::InOrder),
//!     vec![&20, &30, &40, &60, &70, &80]
//! );
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod util;

pub use domain::{OrderedTree, OrderedTreeBuilder, Slot, TraversalOrder, TreeError, TreeResult};
