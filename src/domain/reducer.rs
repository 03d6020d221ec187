//! Explode/split rewriting to normal form.

use std::fmt;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::SnailfishTree;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::Node;

pub const DEFAULT_EXPLODE_DEPTH: usize = 4;
pub const DEFAULT_SPLIT_THRESHOLD: u32 = 10;
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// A single rewrite applied by the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Explode,
    Split,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Explode => write!(f, "explode"),
            Action::Split => write!(f, "split"),
        }
    }
}

/// Counts of the rewrites one reduction performed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReductionReport {
    pub explodes: usize,
    pub splits: usize,
}

impl ReductionReport {
    pub fn steps(&self) -> usize {
        self.explodes + self.splits
    }

    fn record(&mut self, action: Action) {
        match action {
            Action::Explode => self.explodes += 1,
            Action::Split => self.splits += 1,
        }
    }
}

/// Applies the explode and split rules until neither matches.
///
/// Every step rescans the tree from the root; explode always wins over split
/// and the leftmost candidate goes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reducer {
    /// Pairs nested at least this deep explode
    pub explode_depth: usize,
    /// Leaves holding at least this value split
    pub split_threshold: u32,
    /// Ceiling on rewrites for one reduction
    pub max_steps: usize,
}

impl Default for Reducer {
    fn default() -> Self {
        Self {
            explode_depth: DEFAULT_EXPLODE_DEPTH,
            split_threshold: DEFAULT_SPLIT_THRESHOLD,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl Reducer {
    pub fn new(explode_depth: usize, split_threshold: u32, max_steps: usize) -> Self {
        Self {
            explode_depth,
            split_threshold,
            max_steps,
        }
    }

    /// First pair, pre-order, deep enough to explode and holding two leaves.
    pub fn find_explode_candidate(&self, tree: &SnailfishTree) -> Option<Index> {
        tree.iter()
            .find(|&(_, node, depth)| {
                depth >= self.explode_depth
                    && matches!(node, Node::Internal { .. })
                    && self.holds_two_leaves(tree, node)
            })
            .map(|(idx, _, _)| idx)
    }

    fn holds_two_leaves(&self, tree: &SnailfishTree, node: &Node) -> bool {
        let is_leaf = |idx: Option<Index>| {
            idx.and_then(|idx| tree.get_node(idx))
                .is_some_and(Node::is_leaf)
        };
        let (left, right) = node.children();
        is_leaf(left) && is_leaf(right)
    }

    /// First leaf, left to right, at or above the split threshold.
    pub fn find_split_candidate(&self, tree: &SnailfishTree) -> Option<Index> {
        tree.iter()
            .find(|(_, node, _)| node.value().is_some_and(|v| v >= self.split_threshold))
            .map(|(idx, _, _)| idx)
    }

    pub fn is_normal(&self, tree: &SnailfishTree) -> bool {
        self.find_explode_candidate(tree).is_none() && self.find_split_candidate(tree).is_none()
    }

    /// Push the pair's values into the neighbouring leaves and put a zero in
    /// its place.
    #[instrument(level = "trace", skip(self, tree))]
    pub fn explode(&self, tree: &mut SnailfishTree, idx: Index) -> DomainResult<()> {
        let (left, right) = tree.node(idx)?.children();
        let left_value = leaf_value(tree, left)?;
        let right_value = leaf_value(tree, right)?;

        if let Some(neighbour) = tree.leaf_to_the_left(idx) {
            tree.add_to_leaf(neighbour, left_value)?;
        }
        if let Some(neighbour) = tree.leaf_to_the_right(idx) {
            tree.add_to_leaf(neighbour, right_value)?;
        }
        tree.replace_with(idx, |parent| Node::leaf(parent, 0))?;
        Ok(())
    }

    /// Replace a leaf with a pair of its halves, rounding down then up.
    #[instrument(level = "trace", skip(self, tree))]
    pub fn split(&self, tree: &mut SnailfishTree, idx: Index) -> DomainResult<()> {
        let value = tree.node(idx)?.value().ok_or(DomainError::ExpectedLeaf)?;
        let pair = tree.replace_with(idx, Node::internal)?;
        tree.insert_leaf(pair, value / 2)?;
        tree.insert_leaf(pair, value.div_ceil(2))?;
        Ok(())
    }

    /// Apply the highest-priority rule once. None means normal form.
    pub fn step(&self, tree: &mut SnailfishTree) -> DomainResult<Option<Action>> {
        if let Some(idx) = self.find_explode_candidate(tree) {
            self.explode(tree, idx)?;
            return Ok(Some(Action::Explode));
        }
        if let Some(idx) = self.find_split_candidate(tree) {
            self.split(tree, idx)?;
            return Ok(Some(Action::Split));
        }
        Ok(None)
    }

    /// Reduce `tree` in place to normal form.
    pub fn reduce(&self, tree: &mut SnailfishTree) -> DomainResult<ReductionReport> {
        self.reduce_with(tree, |_, _| {})
    }

    /// Reduce `tree` in place, handing every intermediate tree to `observe`.
    #[instrument(level = "debug", skip(self, tree, observe))]
    pub fn reduce_with(
        &self,
        tree: &mut SnailfishTree,
        mut observe: impl FnMut(Action, &SnailfishTree),
    ) -> DomainResult<ReductionReport> {
        let mut report = ReductionReport::default();
        while let Some(action) = self.step(tree)? {
            report.record(action);
            trace!(%action, tree = %tree, "after {}", action);
            observe(action, tree);
            if report.steps() >= self.max_steps && !self.is_normal(tree) {
                return Err(DomainError::StepLimitExceeded {
                    limit: self.max_steps,
                });
            }
        }
        debug!(
            explodes = report.explodes,
            splits = report.splits,
            "reached normal form"
        );
        Ok(report)
    }
}

fn leaf_value(tree: &SnailfishTree, idx: Option<Index>) -> DomainResult<u32> {
    let idx = idx.ok_or(DomainError::IncompletePair)?;
    tree.node(idx)?.value().ok_or(DomainError::ExpectedLeaf)
}
