//! In-order neighbour lookup used by the explode rule.

use generational_arena::Index;
use tracing::instrument;

use crate::domain::arena::SnailfishTree;
use crate::domain::node::{Node, Side};

impl SnailfishTree {
    /// Nearest leaf strictly to the left of `idx` in in-order traversal.
    pub fn leaf_to_the_left(&self, idx: Index) -> Option<Index> {
        self.nearest_leaf(idx, Side::Left)
    }

    /// Nearest leaf strictly to the right of `idx` in in-order traversal.
    pub fn leaf_to_the_right(&self, idx: Index) -> Option<Index> {
        self.nearest_leaf(idx, Side::Right)
    }

    /// Walk up until the ascent crosses from a child on the opposite side of
    /// `direction`, then descend into the sibling subtree hugging the near edge.
    ///
    /// Returns None when the root is reached without such a crossing, i.e.
    /// `idx` lies on the tree's outer edge in that direction.
    #[instrument(level = "trace", skip(self))]
    pub fn nearest_leaf(&self, idx: Index, direction: Side) -> Option<Index> {
        let mut current = idx;
        loop {
            let parent = self.parent(current)?;
            if self.side_of(current)? == direction.opposite() {
                let sibling = self.child(parent, direction)?;
                return self.edge_leaf(sibling, direction.opposite());
            }
            current = parent;
        }
    }

    /// Descend from `idx` preferring the `edge` child until a leaf is reached.
    fn edge_leaf(&self, idx: Index, edge: Side) -> Option<Index> {
        let mut current = idx;
        loop {
            match self.get_node(current)? {
                Node::Leaf { .. } => return Some(current),
                pair => {
                    current = pair.child(edge).or_else(|| pair.child(edge.opposite()))?;
                }
            }
        }
    }
}
