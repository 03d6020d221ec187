//! Snailfish number arithmetic.
//!
//! A snailfish number is a binary tree of pairs whose leaves hold regular
//! numbers, written `[[1,2],3]`. Adding two numbers wraps them in a new pair,
//! which is then reduced with the explode and split rules until neither
//! applies. The magnitude scores a number as `3*left + 2*right`.
//!
//! ```
//! use snailfish::domain::{parse, sum_all, Reducer};
//!
//! let numbers = ["[[[[4,3],4],4],[7,[[8,4],9]]]", "[1,1]"]
//!     .iter()
//!     .map(|line| parse(line))
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//! let sum = sum_all(&numbers, &Reducer::default()).unwrap();
//! assert_eq!(sum.to_string(), "[[[[0,7],4],[[7,8],[6,0]]],[8,1]]");
//! assert_eq!(sum.magnitude().unwrap(), 1384);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
