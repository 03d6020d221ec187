//! Node variants of a snailfish tree.

use generational_arena::Index;

/// Which child slot of a pair a node occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A node stored in the tree arena.
///
/// Root and Internal nodes are pairs; a Leaf carries a regular number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Root {
        left: Option<Index>,
        right: Option<Index>,
    },
    Internal {
        parent: Index,
        left: Option<Index>,
        right: Option<Index>,
    },
    Leaf {
        parent: Index,
        value: u32,
    },
}

impl Node {
    pub fn internal(parent: Index) -> Self {
        Node::Internal {
            parent,
            left: None,
            right: None,
        }
    }

    pub fn leaf(parent: Index, value: u32) -> Self {
        Node::Leaf { parent, value }
    }

    /// Parent index, None for the root.
    pub fn parent(&self) -> Option<Index> {
        match self {
            Node::Root { .. } => None,
            Node::Internal { parent, .. } | Node::Leaf { parent, .. } => Some(*parent),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn is_pair(&self) -> bool {
        !self.is_leaf()
    }

    /// Leaf value, None for pairs.
    pub fn value(&self) -> Option<u32> {
        match self {
            Node::Leaf { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Child in the given slot. Leaves have none.
    pub fn child(&self, side: Side) -> Option<Index> {
        match (self, side) {
            (Node::Root { left, .. } | Node::Internal { left, .. }, Side::Left) => *left,
            (Node::Root { right, .. } | Node::Internal { right, .. }, Side::Right) => *right,
            (Node::Leaf { .. }, _) => None,
        }
    }

    pub fn children(&self) -> (Option<Index>, Option<Index>) {
        (self.child(Side::Left), self.child(Side::Right))
    }

    /// Mutable access to a child slot, None for leaves.
    pub(crate) fn slot_mut(&mut self, side: Side) -> Option<&mut Option<Index>> {
        match (self, side) {
            (Node::Root { left, .. } | Node::Internal { left, .. }, Side::Left) => Some(left),
            (Node::Root { right, .. } | Node::Internal { right, .. }, Side::Right) => Some(right),
            (Node::Leaf { .. }, _) => None,
        }
    }

    /// First empty child slot, filled left before right.
    pub fn free_slot(&self) -> Option<Side> {
        match self.children() {
            _ if self.is_leaf() => None,
            (None, _) => Some(Side::Left),
            (Some(_), None) => Some(Side::Right),
            (Some(_), Some(_)) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use generational_arena::Arena;

    #[test]
    fn given_pair_when_filling_slots_then_left_comes_first() {
        let mut arena = Arena::new();
        let root = arena.insert(Node::Root {
            left: None,
            right: None,
        });
        let mut node = Node::internal(root);
        assert_eq!(node.free_slot(), Some(Side::Left));

        *node.slot_mut(Side::Left).unwrap() = Some(root);
        assert_eq!(node.free_slot(), Some(Side::Right));

        *node.slot_mut(Side::Right).unwrap() = Some(root);
        assert_eq!(node.free_slot(), None);
    }

    #[test]
    fn given_leaf_when_asking_for_slot_then_none() {
        let mut arena: Arena<Node> = Arena::new();
        let root = arena.insert(Node::Root {
            left: None,
            right: None,
        });
        let mut leaf = Node::leaf(root, 7);
        assert_eq!(leaf.free_slot(), None);
        assert!(leaf.slot_mut(Side::Left).is_none());
        assert_eq!(leaf.value(), Some(7));
        assert_eq!(leaf.parent(), Some(root));
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
    }
}
