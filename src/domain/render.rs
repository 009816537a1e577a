use std::fmt::Display;

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::tree::OrderedTree;

pub trait TreeRender {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T: Display> TreeRender for OrderedTree<T> {
    #[instrument(level = "debug", skip_all)]
    fn to_tree_string(&self) -> Tree<String> {
        let Some(root_idx) = self.root_index() else {
            return Tree::new("Empty tree".to_string());
        };

        fn build_tree<T: Display>(tree: &OrderedTree<T>, node_idx: Index, parent_tree: &mut Tree<String>) {
            let Some(node) = tree.arena().get(node_idx) else {
                return;
            };
            let children = [("L", node.left), ("R", node.right)];
            for (side, child_idx) in children.into_iter().filter_map(|(s, c)| c.map(|c| (s, c))) {
                if let Some(child) = tree.arena().get(child_idx) {
                    let mut child_tree = Tree::new(format!("{}: {}", side, child.element));
                    build_tree(tree, child_idx, &mut child_tree);
                    parent_tree.push(child_tree);
                }
            }
        }

        let label = self.root().map(ToString::to_string).unwrap_or_default();
        let mut rendered = Tree::new(label);
        build_tree(self, root_idx, &mut rendered);
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_empty_tree() {
        let tree: OrderedTree<i32> = OrderedTree::default();
        assert_eq!(tree.to_tree_string().to_string().trim_end(), "Empty tree");
    }

    #[test]
    fn renders_sides() {
        let mut tree = OrderedTree::default();
        for v in [2, 1, 3] {
            tree.insert(v).unwrap();
        }
        let rendered = tree.to_tree_string();

        assert_eq!(rendered.root, "2");
        let labels: Vec<&str> = rendered.leaves.iter().map(|leaf| leaf.root.as_str()).collect();
        assert_eq!(labels, vec!["L: 1", "R: 3"]);
    }
}
