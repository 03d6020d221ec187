//! Parser for bracketed snailfish number expressions.
//!
//! Grammar: `pair := '[' element ',' element ']'`, `element := pair | number`.

use std::str::FromStr;

use tracing::{instrument, trace};

use crate::domain::arena::SnailfishTree;
use crate::domain::error::{DomainError, DomainResult};

/// Parse one expression into a fresh tree.
///
/// The outermost `[` opens the root pair. Every nested `[` attaches a new pair
/// as the next free child of the cursor and descends into it, `]` climbs back
/// to the parent, `,` only separates. Numbers attach a leaf without moving the
/// cursor.
#[instrument(level = "debug")]
pub fn parse(input: &str) -> DomainResult<SnailfishTree> {
    let mut chars = input.char_indices().peekable();
    match chars.next() {
        None => return Err(DomainError::malformed(0, "empty expression")),
        Some((_, '[')) => {}
        Some((pos, c)) => {
            return Err(DomainError::malformed(pos, format!("expected '[', found {c:?}")))
        }
    }

    let mut tree = SnailfishTree::new();
    let mut cursor = Some(tree.root());

    while let Some((pos, c)) = chars.next() {
        let Some(current) = cursor else {
            return Err(DomainError::malformed(
                pos,
                format!("unexpected {c:?} after the outermost pair"),
            ));
        };
        match c {
            '[' => {
                let pair = tree.insert_pair(current).map_err(|e| at(pos, e))?;
                cursor = Some(pair);
            }
            ',' => {}
            ']' => {
                if !matches!(tree.node(current)?.children(), (Some(_), Some(_))) {
                    return Err(DomainError::malformed(pos, "pair closed before both elements"));
                }
                cursor = tree.parent(current);
            }
            d if d.is_ascii_digit() => {
                let mut value = d.to_digit(10).unwrap_or_default();
                while let Some(digit) = chars.peek().and_then(|&(_, next)| next.to_digit(10)) {
                    value = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(digit))
                        .ok_or_else(|| DomainError::malformed(pos, "number out of range"))?;
                    chars.next();
                }
                tree.insert_leaf(current, value).map_err(|e| at(pos, e))?;
            }
            other => {
                return Err(DomainError::malformed(
                    pos,
                    format!("unexpected character {other:?}"),
                ))
            }
        }
    }

    if cursor.is_some() {
        return Err(DomainError::malformed(input.len(), "unexpected end of expression"));
    }
    trace!(tree = %tree, "parsed");
    Ok(tree)
}

/// Tie a structural error to the input position that caused it.
fn at(position: usize, error: DomainError) -> DomainError {
    DomainError::malformed(position, error.to_string())
}

impl FromStr for SnailfishTree {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::node::Node;
    use rstest::rstest;

    #[rstest]
    #[case("[1,2]")]
    #[case("[[1,2],3]")]
    #[case("[9,[8,7]]")]
    #[case("[[1,9],[8,5]]")]
    #[case("[[[[1,2],[3,4]],[[5,6],[7,8]]],9]")]
    #[case("[[[9,[3,8]],[[0,9],6]],[[[3,7],[4,9]],3]]")]
    #[case("[[[[1,3],[5,3]],[[1,3],[8,7]]],[[[4,9],[6,9]],[[8,2],[7,3]]]]")]
    #[case("[[[[0,7],4],[15,[0,13]]],[1,1]]")]
    fn given_valid_expression_when_parsing_then_round_trips(#[case] input: &str) {
        let tree = parse(input).unwrap();
        assert_eq!(tree.to_string(), input);
        assert!(tree.is_complete());
    }

    #[test]
    fn given_nested_pairs_when_parsing_then_children_fill_left_first() {
        let tree = parse("[[1,2],3]").unwrap();
        let root = tree.node(tree.root()).unwrap();
        let (left, right) = root.children();
        assert!(tree.node(left.unwrap()).unwrap().is_pair());
        assert_eq!(tree.node(right.unwrap()).unwrap().value(), Some(3));
        assert!(matches!(
            tree.node(left.unwrap()).unwrap(),
            Node::Internal { parent, .. } if *parent == tree.root()
        ));
    }

    #[test]
    fn given_multi_digit_literal_when_parsing_then_single_leaf() {
        let tree = parse("[12,3]").unwrap();
        assert_eq!(tree.values(), vec![12, 3]);
    }

    #[rstest]
    #[case("", 0)]
    #[case("1", 0)]
    #[case("[1,2", 4)]
    #[case("[1]", 2)]
    #[case("[1,2,3]", 5)]
    #[case("[1,x]", 3)]
    #[case("[1, 2]", 3)]
    #[case("[1,2]]", 5)]
    #[case("[1,2][3,4]", 5)]
    fn given_malformed_expression_when_parsing_then_reports_position(
        #[case] input: &str,
        #[case] expected: usize,
    ) {
        match parse(input) {
            Err(DomainError::MalformedExpression { position, .. }) => {
                assert_eq!(position, expected, "input {input:?}")
            }
            other => panic!("expected malformed expression for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn given_from_str_when_parsing_then_same_as_parse() {
        let tree: SnailfishTree = "[[3,4],5]".parse().unwrap();
        assert_eq!(tree.to_string(), "[[3,4],5]");
    }
}
