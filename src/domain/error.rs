//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the snailfish number grammar
/// and of the tree structure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed expression at position {position}: {reason}")]
    MalformedExpression { position: usize, reason: String },

    #[error("leaf node can't have any children")]
    LeafCannotHaveChildren,

    #[error("pair already has two children")]
    PairFull,

    #[error("pair is missing a child")]
    IncompletePair,

    #[error("expected a leaf node")]
    ExpectedLeaf,

    #[error("node is not part of this tree")]
    UnknownNode,

    #[error("the root node can't be replaced")]
    RootReplacement,

    #[error("no snailfish numbers to add")]
    EmptyInput,

    #[error("need at least two snailfish numbers, found {found}")]
    NotEnoughOperands { found: usize },

    #[error("value out of range")]
    ValueOverflow,

    #[error("reduction did not reach normal form within {limit} steps")]
    StepLimitExceeded { limit: usize },
}

impl DomainError {
    pub fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Self::MalformedExpression {
            position,
            reason: reason.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
