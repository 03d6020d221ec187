//! Tests for ArithmeticService over puzzle input

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use snailfish::application::services::ArithmeticService;
use snailfish::application::ApplicationError;
use snailfish::config::Settings;
use snailfish::domain::{DomainError, Reducer};
use snailfish::infrastructure::traits::{InputSource, RealInputSource};
use snailfish::util::testing;

fn resource(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources")
        .join(name)
}

fn real_service() -> ArithmeticService {
    ArithmeticService::new(Arc::new(RealInputSource), &Settings::default())
}

/// In-memory input keyed by path.
#[derive(Default)]
struct MemoryInput {
    files: HashMap<PathBuf, String>,
}

impl MemoryInput {
    fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(PathBuf::from(path), content.to_string());
        self
    }
}

impl InputSource for MemoryInput {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }
}

#[test]
fn given_homework_when_solving_then_returns_both_answers() {
    testing::init_test_setup();

    let answers = real_service().solve(&resource("homework.txt")).unwrap();

    assert_eq!(
        answers.final_sum.to_string(),
        "[[[[6,6],[7,6]],[[7,7],[7,0]]],[[[7,7],[7,7]],[[7,8],[9,9]]]]"
    );
    assert_eq!(answers.part1, 4140);
    assert_eq!(answers.part2, Some(3993));
}

#[test]
fn given_larger_example_when_summing_then_matches_published_sum() {
    let service = real_service();
    let numbers = service.read_numbers(&resource("larger.txt")).unwrap();

    let sum = service.final_sum(&numbers).unwrap();

    assert_eq!(numbers.len(), 10);
    assert_eq!(
        sum.to_string(),
        "[[[[8,7],[7,7]],[[8,6],[7,7]]],[[[0,7],[6,6]],[8,7]]]"
    );
    assert_eq!(sum.magnitude().unwrap(), 3488);
}

#[test]
fn given_simple_list_when_solving_then_part1_scores_final_sum() {
    let answers = real_service().solve(&resource("simple.txt")).unwrap();

    assert_eq!(answers.final_sum.to_string(), "[[[[5,0],[7,4]],[5,5]],[6,6]]");
    assert_eq!(answers.part1, 1137);
}

#[test]
fn given_malformed_line_when_reading_then_reports_line() {
    let err = real_service()
        .read_numbers(&resource("malformed.txt"))
        .unwrap_err();

    match err {
        ApplicationError::InvalidLine { line, source } => {
            assert_eq!(line, 3);
            assert!(matches!(
                source,
                DomainError::MalformedExpression { position: 7, .. }
            ));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn given_missing_file_when_solving_then_operation_failed() {
    let temp = TempDir::new().unwrap();

    let err = real_service()
        .solve(&temp.path().join("missing.txt"))
        .unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
}

#[test]
fn given_memory_input_when_solving_then_reads_through_trait() {
    let input = MemoryInput::default().with_file("puzzle", "[[1,2],[[3,4],5]]\n");
    let service = ArithmeticService::with_reducer(Arc::new(input), Reducer::default(), true);

    let answers = service.solve(Path::new("puzzle")).unwrap();

    assert_eq!(answers.part1, 143);
    assert_eq!(answers.part2, None);
}

#[test]
fn given_empty_input_when_solving_then_errors() {
    let input = MemoryInput::default().with_file("puzzle", "\n\n");
    let service = ArithmeticService::with_reducer(Arc::new(input), Reducer::default(), true);

    let err = service.solve(Path::new("puzzle")).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::EmptyInput)
    ));
}

#[test]
fn given_file_on_disk_when_reading_then_trailing_whitespace_is_ignored() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("input.txt");
    std::fs::write(&path, "[9,1]  \r\n[1,9]\n").unwrap();

    let service = real_service();
    let numbers = service.read_numbers(&path).unwrap();

    assert_eq!(service.largest_pair_magnitude(&numbers).unwrap(), 129);
}
