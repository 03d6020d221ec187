//! Domain layer: the snailfish number tree and its rewrite rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod combiner;
pub mod error;
pub mod magnitude;
pub mod navigator;
pub mod node;
pub mod parser;
pub mod reducer;

pub use arena::{SnailfishTree, TreeIterator};
pub use combiner::{add, combine, sum_all};
pub use error::{DomainError, DomainResult};
pub use node::{Node, Side};
pub use parser::parse;
pub use reducer::{Action, ReductionReport, Reducer};
