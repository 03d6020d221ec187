//! Snailfish homework service
//!
//! Turns puzzle input into trees, sums them and scores the results.

use std::path::Path;
use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt, LineResultExt};
use crate::config::Settings;
use crate::domain::{self, Action, DomainError, ReductionReport, Reducer, SnailfishTree};
use crate::infrastructure::traits::InputSource;

/// Both puzzle answers for one input.
#[derive(Debug, Clone)]
pub struct Answers {
    /// Reduced sum of every line, in order
    pub final_sum: SnailfishTree,
    /// Magnitude of the final sum
    pub part1: u64,
    /// Largest magnitude of any two distinct lines added; None for a single line
    pub part2: Option<u64>,
}

/// Service for snailfish arithmetic over puzzle input.
pub struct ArithmeticService {
    input: Arc<dyn InputSource>,
    reducer: Reducer,
    skip_blank_lines: bool,
}

impl ArithmeticService {
    /// Create a service configured from settings.
    pub fn new(input: Arc<dyn InputSource>, settings: &Settings) -> Self {
        Self::with_reducer(
            input,
            settings.reduction.reducer(),
            settings.input.skip_blank_lines,
        )
    }

    pub fn with_reducer(
        input: Arc<dyn InputSource>,
        reducer: Reducer,
        skip_blank_lines: bool,
    ) -> Self {
        Self {
            input,
            reducer,
            skip_blank_lines,
        }
    }

    pub fn reducer(&self) -> &Reducer {
        &self.reducer
    }

    /// Read and parse one snailfish number per line of `source`.
    #[instrument(level = "debug", skip(self))]
    pub fn read_numbers(&self, source: &Path) -> ApplicationResult<Vec<SnailfishTree>> {
        let content = self
            .input
            .read_to_string(source)
            .with_path_context("read input", source)?;
        self.parse_lines(&content)
    }

    /// Parse one snailfish number per line.
    ///
    /// Lines are trimmed. Blank lines are skipped or rejected depending on
    /// configuration; errors carry the 1-based line number.
    pub fn parse_lines(&self, content: &str) -> ApplicationResult<Vec<SnailfishTree>> {
        let mut numbers = Vec::new();
        for (i, line) in content.lines().enumerate() {
            let line_no = i + 1;
            let line = line.trim();
            if line.is_empty() {
                if self.skip_blank_lines {
                    continue;
                }
                return Err(ApplicationError::BlankLine { line: line_no });
            }
            numbers.push(domain::parse(line).at_line(line_no)?);
        }
        debug!("parse_lines: parsed {} numbers", numbers.len());
        Ok(numbers)
    }

    /// Parse a single expression given on the command line.
    pub fn parse_expression(&self, expression: &str) -> ApplicationResult<SnailfishTree> {
        Ok(domain::parse(expression.trim())?)
    }

    /// Add all numbers in order, reducing after each addition.
    #[instrument(level = "debug", skip_all)]
    pub fn final_sum(&self, numbers: &[SnailfishTree]) -> ApplicationResult<SnailfishTree> {
        Ok(domain::sum_all(numbers, &self.reducer)?)
    }

    /// `reduce(left + right)`.
    pub fn add(
        &self,
        left: &SnailfishTree,
        right: &SnailfishTree,
    ) -> ApplicationResult<SnailfishTree> {
        Ok(domain::add(left, right, &self.reducer)?)
    }

    /// Reduce in place, reporting every intermediate tree to `observe`.
    pub fn reduce(
        &self,
        tree: &mut SnailfishTree,
        observe: impl FnMut(Action, &SnailfishTree),
    ) -> ApplicationResult<ReductionReport> {
        Ok(self.reducer.reduce_with(tree, observe)?)
    }

    /// Largest magnitude of `reduce(a + b)` over ordered pairs of distinct numbers.
    #[instrument(level = "debug", skip_all)]
    pub fn largest_pair_magnitude(&self, numbers: &[SnailfishTree]) -> ApplicationResult<u64> {
        if numbers.len() < 2 {
            return Err(DomainError::NotEnoughOperands {
                found: numbers.len(),
            }
            .into());
        }
        let reduced = numbers
            .iter()
            .map(|number| -> Result<SnailfishTree, DomainError> {
                let mut number = number.clone();
                self.reducer.reduce(&mut number)?;
                Ok(number)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let best = reduced
            .iter()
            .permutations(2)
            .try_fold(0, |best, pair| -> Result<u64, DomainError> {
                let magnitude = domain::add(pair[0], pair[1], &self.reducer)?.magnitude()?;
                Ok(best.max(magnitude))
            })?;
        Ok(best)
    }

    /// Compute both answers for the input behind `source`.
    #[instrument(level = "debug", skip(self))]
    pub fn solve(&self, source: &Path) -> ApplicationResult<Answers> {
        let numbers = self.read_numbers(source)?;
        let final_sum = self.final_sum(&numbers)?;
        let part1 = final_sum.magnitude()?;
        let part2 = if numbers.len() >= 2 {
            Some(self.largest_pair_magnitude(&numbers)?)
        } else {
            None
        };
        info!(part1, ?part2, "solved {}", source.display());
        Ok(Answers {
            final_sum,
            part1,
            part2,
        })
    }
}
