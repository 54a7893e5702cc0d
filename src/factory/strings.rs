//! String content failures.

use super::ErrorMessageFactory;
use crate::comparison::ComparisonStrategy;
use crate::message::MessageArg;
use crate::value::Value;

fn strings(values: &[&str]) -> Value {
    Value::array(values.iter().copied())
}

/// Failure for `actual` not containing `sequence`.
#[must_use]
pub fn should_contain_char_sequence(
    actual: &str,
    sequence: &str,
    comparison_strategy: &ComparisonStrategy,
) -> ErrorMessageFactory {
    ErrorMessageFactory::from_parts(
        "%nExpecting actual:%n  %s%nto contain:%n  %s %s",
        vec![
            MessageArg::value(actual),
            MessageArg::value(sequence),
            MessageArg::Strategy(comparison_strategy.clone()),
        ],
    )
}

/// Failure for `actual` not containing all of `values`; `not_found` lists
/// the missing ones.
#[must_use]
pub fn should_contain_char_sequences(
    actual: &str,
    values: &[&str],
    not_found: &[&str],
    comparison_strategy: &ComparisonStrategy,
) -> ErrorMessageFactory {
    ErrorMessageFactory::from_parts(
        "%nExpecting actual:%n  %s%nto contain:%n  %s%nbut could not find:%n  %s%n %s",
        vec![
            MessageArg::value(actual),
            MessageArg::Value(strings(values)),
            MessageArg::Value(strings(not_found)),
            MessageArg::Strategy(comparison_strategy.clone()),
        ],
    )
}

#[must_use]
pub fn should_contain_ignoring_case(actual: &str, sequence: &str) -> ErrorMessageFactory {
    ErrorMessageFactory::from_parts(
        "%nExpecting actual:%n  %s%nto contain:%n  %s%n (ignoring case)",
        vec![MessageArg::value(actual), MessageArg::value(sequence)],
    )
}

#[must_use]
pub fn should_contain_ignoring_whitespaces(
    actual: &str,
    sequence: &str,
    comparison_strategy: &ComparisonStrategy,
) -> ErrorMessageFactory {
    ErrorMessageFactory::from_parts(
        "%nExpecting actual:%n  %s%nto contain (ignoring whitespaces):%n  %s %s",
        vec![
            MessageArg::value(actual),
            MessageArg::value(sequence),
            MessageArg::Strategy(comparison_strategy.clone()),
        ],
    )
}

/// Failure for `actual` not containing `sequence` exactly once.
///
/// `occurrences` is the number of non-overlapping matches found; zero
/// selects the "did not appear" wording.
#[must_use]
pub fn should_contain_only_once(
    actual: &str,
    sequence: &str,
    occurrences: usize,
    comparison_strategy: &ComparisonStrategy,
) -> ErrorMessageFactory {
    let mut arguments = vec![MessageArg::value(sequence), MessageArg::value(actual)];
    let mut template = if occurrences == 0 {
        "Expecting: <%s> to appear only once in: <%s> but it did not appear".to_string()
    } else {
        arguments.push(MessageArg::value(occurrences));
        "Expecting: <%s> to appear only once in: <%s> but it appeared %s times".to_string()
    };
    if !comparison_strategy.is_standard() {
        template.push_str(" %s");
        arguments.push(MessageArg::Strategy(comparison_strategy.clone()));
    }
    ErrorMessageFactory::from_parts(template, arguments)
}
