//! Snailfish addition: joining two trees under a fresh root.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::SnailfishTree;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::Node;
use crate::domain::reducer::Reducer;

/// Build `[left,right]` from deep copies of both operands.
///
/// Neither input is touched. The result is not reduced.
#[instrument(level = "debug", skip_all)]
pub fn combine(left: &SnailfishTree, right: &SnailfishTree) -> DomainResult<SnailfishTree> {
    let mut sum = SnailfishTree::new();
    let root = sum.root();
    sum.graft(root, left, left.root())?;
    sum.graft(root, right, right.root())?;
    Ok(sum)
}

/// Add two trees and reduce the result.
pub fn add(
    left: &SnailfishTree,
    right: &SnailfishTree,
    reducer: &Reducer,
) -> DomainResult<SnailfishTree> {
    let mut sum = combine(left, right)?;
    reducer.reduce(&mut sum)?;
    Ok(sum)
}

/// Sum trees left to right, reducing after every addition.
///
/// Each operand is brought to normal form before it joins the running sum.
#[instrument(level = "debug", skip_all)]
pub fn sum_all<'a, I>(trees: I, reducer: &Reducer) -> DomainResult<SnailfishTree>
where
    I: IntoIterator<Item = &'a SnailfishTree>,
{
    let mut trees = trees.into_iter();
    let mut total = trees.next().ok_or(DomainError::EmptyInput)?.clone();
    reducer.reduce(&mut total)?;

    for tree in trees {
        let mut operand = tree.clone();
        reducer.reduce(&mut operand)?;
        total = add(&total, &operand, reducer)?;
        debug!(sum = %total, "after addition");
    }
    Ok(total)
}

impl SnailfishTree {
    /// Deep-copy the subtree of `source` rooted at `source_idx` as the next
    /// free child of `parent`. A copied root becomes an internal pair.
    fn graft(
        &mut self,
        parent: Index,
        source: &SnailfishTree,
        source_idx: Index,
    ) -> DomainResult<Index> {
        let mut top = None;
        let mut stack = vec![(source_idx, parent)];
        while let Some((src, dest_parent)) = stack.pop() {
            let copied = match source.node(src)? {
                Node::Leaf { value, .. } => self.insert_leaf(dest_parent, *value)?,
                pair => {
                    let copied = self.insert_pair(dest_parent)?;
                    // Right is pushed first so the left child claims the left slot
                    let (left, right) = pair.children();
                    stack.extend(right.map(|idx| (idx, copied)));
                    stack.extend(left.map(|idx| (idx, copied)));
                    copied
                }
            };
            top.get_or_insert(copied);
        }
        top.ok_or(DomainError::UnknownNode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parser::parse;

    fn trees(lines: &[&str]) -> Vec<SnailfishTree> {
        lines.iter().map(|line| parse(line).unwrap()).collect()
    }

    #[test]
    fn given_two_trees_when_combining_then_wraps_without_reducing() {
        let left = parse("[[[[4,3],4],4],[7,[[8,4],9]]]").unwrap();
        let right = parse("[1,1]").unwrap();

        let sum = combine(&left, &right).unwrap();

        assert_eq!(sum.to_string(), "[[[[[4,3],4],4],[7,[[8,4],9]]],[1,1]]");
        assert_eq!(sum.len(), left.len() + right.len() + 1);
    }

    #[test]
    fn given_combined_tree_when_inspecting_then_parent_links_point_into_new_tree() {
        let left = parse("[1,2]").unwrap();
        let right = parse("[3,4]").unwrap();

        let sum = combine(&left, &right).unwrap();

        for (idx, node, depth) in sum.iter() {
            assert_eq!(sum.depth_of(idx).unwrap(), depth);
            if let Some(parent) = node.parent() {
                assert!(sum.get_node(parent).is_some());
            }
        }
        assert!(matches!(
            sum.node(sum.child(sum.root(), crate::domain::node::Side::Left).unwrap()),
            Ok(Node::Internal { .. })
        ));
    }

    #[test]
    fn given_operands_when_reducing_sum_then_operands_unchanged() {
        let left = parse("[[[[4,3],4],4],[7,[[8,4],9]]]").unwrap();
        let right = parse("[1,1]").unwrap();

        let sum = add(&left, &right, &Reducer::default()).unwrap();

        assert_eq!(sum.to_string(), "[[[[0,7],4],[[7,8],[6,0]]],[8,1]]");
        assert_eq!(left.to_string(), "[[[[4,3],4],4],[7,[[8,4],9]]]");
        assert_eq!(right.to_string(), "[1,1]");
    }

    #[test]
    fn given_list_when_summing_then_reduces_after_each_addition() {
        let reducer = Reducer::default();

        let four = trees(&["[1,1]", "[2,2]", "[3,3]", "[4,4]"]);
        let sum = sum_all(&four, &reducer).unwrap();
        assert_eq!(sum.to_string(), "[[[[1,1],[2,2]],[3,3]],[4,4]]");

        let five = trees(&["[1,1]", "[2,2]", "[3,3]", "[4,4]", "[5,5]"]);
        let sum = sum_all(&five, &reducer).unwrap();
        assert_eq!(sum.to_string(), "[[[[3,0],[5,3]],[4,4]],[5,5]]");

        let six = trees(&["[1,1]", "[2,2]", "[3,3]", "[4,4]", "[5,5]", "[6,6]"]);
        let sum = sum_all(&six, &reducer).unwrap();
        assert_eq!(sum.to_string(), "[[[[5,0],[7,4]],[5,5]],[6,6]]");
    }

    #[test]
    fn given_single_tree_when_summing_then_returns_it_reduced() {
        let single = trees(&["[[[[[9,8],1],2],3],4]"]);
        let sum = sum_all(&single, &Reducer::default()).unwrap();
        assert_eq!(sum.to_string(), "[[[[0,9],2],3],4]");
    }

    #[test]
    fn given_no_trees_when_summing_then_errors() {
        let none: Vec<SnailfishTree> = Vec::new();
        assert!(matches!(
            sum_all(&none, &Reducer::default()),
            Err(DomainError::EmptyInput)
        ));
    }
}
