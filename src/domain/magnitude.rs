use generational_arena::Index;

use crate::domain::arena::SnailfishTree;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::Node;

const LEFT_WEIGHT: u64 = 3;
const RIGHT_WEIGHT: u64 = 2;

impl SnailfishTree {
    /// `3 * left + 2 * right` for pairs, the value itself for leaves.
    pub fn magnitude(&self) -> DomainResult<u64> {
        self.magnitude_of(self.root())
    }

    pub fn magnitude_of(&self, idx: Index) -> DomainResult<u64> {
        match self.node(idx)? {
            Node::Leaf { value, .. } => Ok(u64::from(*value)),
            pair => match pair.children() {
                (Some(left), Some(right)) => {
                    let left = LEFT_WEIGHT.checked_mul(self.magnitude_of(left)?);
                    let right = RIGHT_WEIGHT.checked_mul(self.magnitude_of(right)?);
                    left.zip(right)
                        .and_then(|(l, r)| l.checked_add(r))
                        .ok_or(DomainError::ValueOverflow)
                }
                _ => Err(DomainError::IncompletePair),
            },
        }
    }
}
