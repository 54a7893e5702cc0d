//! Aggregation of several failures into one error.

mod common;

use common::{host_creator, init_test_logging, plain_creator};
use fluent_errors::collector::FailureCollector;
use fluent_errors::prelude::*;

fn errors(messages: &[&str]) -> Vec<AssertionError> {
    messages.iter().map(|m| AssertionError::new(*m)).collect()
}

#[test]
fn host_aggregate_with_description() {
    init_test_logging();
    let error = host_creator().multiple_assertions_error(
        Some(&Description::text("description")),
        &errors(&["error1", "error2"]),
    );
    assert_eq!(error.message(), "[description] (2 failures)\n\terror1\n\terror2");
    assert_eq!(error.failures().len(), 2);
}

#[test]
fn fallback_aggregate_numbers_failures() {
    let error = plain_creator().multiple_assertions_error(
        Some(&Description::text("Jedi")),
        &errors(&["error1", "\nexpected: 1\n but was: 2"]),
    );
    assert_eq!(
        error.message(),
        "\n[Jedi] (2 failures)\n-- failure 1 --\nerror1\n-- failure 2 --\nexpected: 1\n but was: 2"
    );
    assert!(matches!(error.kind(), ErrorKind::AggregatedFailures { heading, .. } if heading == "[Jedi]"));
}

#[test]
fn soft_assertions_without_host() {
    let error = plain_creator().multiple_soft_assertions_error(&errors(&["error1", "error2"]));
    assert_eq!(
        error.message(),
        "\nThe following 2 assertions failed:\n1) error1\n2) error2\n"
    );
}

#[test]
fn try_throwing_depends_on_host() {
    let failures = errors(&["boom"]);
    assert!(plain_creator().try_throwing_multiple_failures_error(&failures).is_ok());
    let error = host_creator()
        .try_throwing_multiple_failures_error(&failures)
        .unwrap_err();
    assert_eq!(error.message(), "Multiple Failures (1 failure)\n\tboom");
}

#[test]
fn collector_reports_failures_in_order() {
    init_test_logging();
    let collector = FailureCollector::with_creator(plain_creator());
    collector.collect(Err::<(), _>(AssertionError::new("first")));
    collector.collect(Ok::<_, AssertionError>(()));
    collector.collect_error(AssertionError::new("second"));
    collector.collect_error(AssertionError::new("third"));

    let error = collector.assert_all().unwrap_err();
    assert_eq!(
        error.message(),
        "\nThe following 3 assertions failed:\n1) first\n2) second\n3) third\n"
    );
}
