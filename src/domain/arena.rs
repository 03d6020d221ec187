use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{Node, Side};

/// Arena-based binary tree holding one snailfish number.
///
/// Nodes are addressed by generational indices; each node stores the index of
/// its parent so upward navigation is O(1). A tree always has a root pair.
#[derive(Debug, Clone)]
pub struct SnailfishTree {
    /// Arena storage for all tree nodes
    arena: Arena<Node>,
    /// Index of the root pair
    root: Index,
}

impl Default for SnailfishTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SnailfishTree {
    /// Create a tree holding an empty root pair.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(Node::Root {
            left: None,
            right: None,
        });
        Self { arena, root }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.get_node(self.root)
            .map(|root| root.children() == (None, None))
            .unwrap_or(true)
    }

    pub fn get_node(&self, idx: Index) -> Option<&Node> {
        self.arena.get(idx)
    }

    pub fn node(&self, idx: Index) -> DomainResult<&Node> {
        self.arena.get(idx).ok_or(DomainError::UnknownNode)
    }

    pub fn parent(&self, idx: Index) -> Option<Index> {
        self.get_node(idx).and_then(Node::parent)
    }

    pub fn child(&self, idx: Index, side: Side) -> Option<Index> {
        self.get_node(idx).and_then(|node| node.child(side))
    }

    /// Slot the node occupies in its parent, None for the root.
    pub fn side_of(&self, idx: Index) -> Option<Side> {
        let parent = self.get_node(self.parent(idx)?)?;
        match parent.children() {
            (Some(left), _) if left == idx => Some(Side::Left),
            (_, Some(right)) if right == idx => Some(Side::Right),
            _ => None,
        }
    }

    /// Distance from the root, derived from the parent chain.
    pub fn depth_of(&self, idx: Index) -> DomainResult<usize> {
        let mut node = self.node(idx)?;
        let mut depth = 0;
        while let Some(parent) = node.parent() {
            node = self.node(parent)?;
            depth += 1;
        }
        Ok(depth)
    }

    /// Attach a new pair as the next free child of `parent`.
    pub fn insert_pair(&mut self, parent: Index) -> DomainResult<Index> {
        self.attach(parent, Node::internal(parent))
    }

    /// Attach a new leaf as the next free child of `parent`.
    pub fn insert_leaf(&mut self, parent: Index, value: u32) -> DomainResult<Index> {
        self.attach(parent, Node::leaf(parent, value))
    }

    #[instrument(level = "trace", skip(self))]
    fn attach(&mut self, parent: Index, node: Node) -> DomainResult<Index> {
        let side = match self.node(parent)? {
            Node::Leaf { .. } => return Err(DomainError::LeafCannotHaveChildren),
            pair => pair.free_slot().ok_or(DomainError::PairFull)?,
        };
        let idx = self.arena.insert(node);
        self.set_slot(parent, side, idx)?;
        Ok(idx)
    }

    fn set_slot(&mut self, parent: Index, side: Side, child: Index) -> DomainResult<()> {
        let slot = self
            .arena
            .get_mut(parent)
            .ok_or(DomainError::UnknownNode)?
            .slot_mut(side)
            .ok_or(DomainError::LeafCannotHaveChildren)?;
        *slot = Some(child);
        Ok(())
    }

    /// Replace the node at `idx` with a freshly built node.
    ///
    /// `build` receives the parent index. The parent's child slot is repointed
    /// to the new node and the old subtree is dropped from the arena.
    #[instrument(level = "trace", skip(self, build))]
    pub fn replace_with(
        &mut self,
        idx: Index,
        build: impl FnOnce(Index) -> Node,
    ) -> DomainResult<Index> {
        let parent = match self.node(idx)?.parent() {
            Some(parent) => parent,
            None => return Err(DomainError::RootReplacement),
        };
        let side = self.side_of(idx).ok_or(DomainError::UnknownNode)?;
        let new_idx = self.arena.insert(build(parent));
        self.set_slot(parent, side, new_idx)?;
        self.remove_subtree(idx);
        Ok(new_idx)
    }

    fn remove_subtree(&mut self, idx: Index) {
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.remove(current) {
                let (left, right) = node.children();
                stack.extend(left);
                stack.extend(right);
            }
        }
    }

    /// Add `amount` to the value of a leaf; fails instead of wrapping.
    pub fn add_to_leaf(&mut self, idx: Index, amount: u32) -> DomainResult<()> {
        match self.arena.get_mut(idx) {
            Some(Node::Leaf { value, .. }) => {
                *value = value
                    .checked_add(amount)
                    .ok_or(DomainError::ValueOverflow)?;
                Ok(())
            }
            Some(_) => Err(DomainError::ExpectedLeaf),
            None => Err(DomainError::UnknownNode),
        }
    }

    /// Pre-order, left-to-right traversal yielding `(index, node, depth)`.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Leaf indices in left-to-right order.
    pub fn leaves(&self) -> Vec<Index> {
        self.iter()
            .filter(|(_, node, _)| node.is_leaf())
            .map(|(idx, _, _)| idx)
            .collect()
    }

    /// Leaf values in left-to-right order.
    pub fn values(&self) -> Vec<u32> {
        self.iter().filter_map(|(_, node, _)| node.value()).collect()
    }

    /// Deepest node depth; a lone root pair has depth 0.
    #[instrument(level = "debug", skip(self))]
    pub fn max_depth(&self) -> usize {
        self.iter().map(|(_, _, depth)| depth).max().unwrap_or(0)
    }

    /// True when every pair holds both children.
    pub fn is_complete(&self) -> bool {
        self.iter().all(|(_, node, _)| match node {
            Node::Leaf { .. } => true,
            pair => matches!(pair.children(), (Some(_), Some(_))),
        })
    }

    fn fmt_node(&self, idx: Option<Index>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match idx.and_then(|idx| self.get_node(idx)) {
            None => write!(f, "_"),
            Some(Node::Leaf { value, .. }) => write!(f, "{}", value),
            Some(pair) => {
                let (left, right) = pair.children();
                write!(f, "[")?;
                self.fmt_node(left, f)?;
                write!(f, ",")?;
                self.fmt_node(right, f)?;
                write!(f, "]")
            }
        }
    }
}

/// Renders the bracketed form, e.g. `[[1,2],3]`.
impl fmt::Display for SnailfishTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(Some(self.root), f)
    }
}

pub struct TreeIterator<'a> {
    tree: &'a SnailfishTree,
    stack: Vec<(Index, usize)>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a SnailfishTree) -> Self {
        Self {
            tree,
            stack: vec![(tree.root(), 0)],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a Node, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, depth)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push right first so the left subtree is visited first
                let (left, right) = node.children();
                self.stack.extend(right.map(|idx| (idx, depth + 1)));
                self.stack.extend(left.map(|idx| (idx, depth + 1)));
                return Some((current_idx, node, depth));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds `[[1,2],3]` by hand.
    fn sample() -> (SnailfishTree, Index, Index) {
        let mut tree = SnailfishTree::new();
        let root = tree.root();
        let pair = tree.insert_pair(root).unwrap();
        tree.insert_leaf(pair, 1).unwrap();
        tree.insert_leaf(pair, 2).unwrap();
        let three = tree.insert_leaf(root, 3).unwrap();
        (tree, pair, three)
    }

    #[test]
    fn given_manual_construction_when_displaying_then_renders_brackets() {
        let (tree, _, _) = sample();
        assert_eq!(tree.to_string(), "[[1,2],3]");
        assert_eq!(tree.len(), 5);
        assert!(tree.is_complete());
    }

    #[test]
    fn given_nodes_when_computing_depth_then_counts_parent_links() {
        let (tree, pair, three) = sample();
        assert_eq!(tree.depth_of(tree.root()).unwrap(), 0);
        assert_eq!(tree.depth_of(pair).unwrap(), 1);
        assert_eq!(tree.depth_of(three).unwrap(), 1);
        let one = tree.child(pair, Side::Left).unwrap();
        assert_eq!(tree.depth_of(one).unwrap(), 2);
        assert_eq!(tree.max_depth(), 2);
    }

    #[test]
    fn given_leaf_when_attaching_child_then_errors() {
        let (mut tree, _, three) = sample();
        assert_eq!(
            tree.insert_leaf(three, 4),
            Err(DomainError::LeafCannotHaveChildren)
        );
    }

    #[test]
    fn given_leaf_near_max_when_adding_then_overflow_error_and_value_kept() {
        let (mut tree, _, three) = sample();
        tree.add_to_leaf(three, 4).unwrap();
        assert_eq!(tree.node(three).unwrap().value(), Some(7));

        assert_eq!(
            tree.add_to_leaf(three, u32::MAX),
            Err(DomainError::ValueOverflow)
        );
        assert_eq!(tree.node(three).unwrap().value(), Some(7));
    }

    #[test]
    fn given_full_pair_when_attaching_child_then_errors() {
        let (mut tree, pair, _) = sample();
        assert_eq!(tree.insert_pair(pair), Err(DomainError::PairFull));
    }

    #[test]
    fn given_pair_when_replacing_then_old_subtree_is_dropped() {
        let (mut tree, pair, _) = sample();
        let zero = tree.replace_with(pair, |parent| Node::leaf(parent, 0)).unwrap();

        assert_eq!(tree.to_string(), "[0,3]");
        assert_eq!(tree.side_of(zero), Some(Side::Left));
        assert!(tree.get_node(pair).is_none());
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn given_root_when_replacing_then_errors() {
        let (mut tree, _, _) = sample();
        let root = tree.root();
        assert_eq!(
            tree.replace_with(root, |parent| Node::leaf(parent, 0)),
            Err(DomainError::RootReplacement)
        );
    }

    #[test]
    fn given_tree_when_iterating_then_visits_pre_order() {
        let (tree, _, _) = sample();
        let depths: Vec<usize> = tree.iter().map(|(_, _, depth)| depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 2, 1]);
        assert_eq!(tree.values(), vec![1, 2, 3]);
        assert_eq!(tree.leaves().len(), 3);
    }

    #[test]
    fn given_incomplete_pair_when_displaying_then_marks_gap() {
        let mut tree = SnailfishTree::new();
        let root = tree.root();
        tree.insert_leaf(root, 1).unwrap();
        assert_eq!(tree.to_string(), "[1,_]");
        assert!(!tree.is_complete());
        assert!(!tree.is_empty());
        assert!(SnailfishTree::new().is_empty());
    }
}
