/*
Render a snailfish number as an indented tree.

The orphan rule keeps termtree's Tree from getting an inherent constructor for
our type, so conversion goes through a local trait.
 */
use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{Node, SnailfishTree};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for SnailfishTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(tree: &SnailfishTree, node_idx: Index, depth: usize) -> Tree<String> {
            match tree.get_node(node_idx) {
                Some(Node::Leaf { value, .. }) => Tree::new(format!("{value} (depth {depth})")),
                Some(pair) => {
                    let label = match pair {
                        Node::Root { .. } => tree.to_string(),
                        _ => format!("pair (depth {depth})"),
                    };
                    let (left, right) = pair.children();
                    let leaves = [left, right]
                        .into_iter()
                        .map(|child| match child {
                            Some(child) => build_tree(tree, child, depth + 1),
                            None => Tree::new("_".to_string()),
                        })
                        .collect::<Vec<_>>();
                    Tree::new(label).with_leaves(leaves)
                }
                None => Tree::new("_".to_string()),
            }
        }

        build_tree(self, self.root(), 0)
    }
}
