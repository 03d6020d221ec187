//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (InputSource) but are themselves
//! concrete structs, not traits.

mod arithmetic;

pub use arithmetic::{Answers, ArithmeticService};
