//! Domain layer: the ordered tree and its traversals
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod error;
pub mod node;
pub mod render;
pub mod traversal;
pub mod tree;

pub use builder::OrderedTreeBuilder;
pub use error::{CapacityError, TreeError, TreeResult};
pub use node::Slot;
pub use render::TreeRender;
pub use traversal::{Traversal, TraversalOrder};
pub use tree::{Comparator, Destructor, OrderedTree};
