//! Collection content and size failures.

use super::ErrorMessageFactory;
use crate::comparison::ComparisonStrategy;
use crate::message::{MessageArg, escape_percent};
use crate::value::Value;

/// How a container is named in "contain only" messages: the type shown after
/// `Expecting` and the noun used for its members.
fn container_names(actual: &Value) -> (String, String) {
    match actual {
        Value::Map { .. } => ("map".to_string(), "map entries".to_string()),
        Value::Array(items) => match items.first() {
            Some(first) if is_primitive(first) => {
                let element = first.type_name();
                (format!("{element}[]"), format!("{element}(s)"))
            }
            Some(first) => (format!("{}[]", first.type_name()), "element(s)".to_string()),
            None => ("array".to_string(), "element(s)".to_string()),
        },
        other => (other.type_name(), "element(s)".to_string()),
    }
}

fn is_primitive(value: &Value) -> bool {
    matches!(
        value,
        Value::Bool(_)
            | Value::Char(_)
            | Value::Byte(_)
            | Value::Short(_)
            | Value::Int(_)
            | Value::Long(_)
            | Value::Float(_)
            | Value::Double(_)
    )
}

/// Failure for `actual` not containing exactly the values of `expected`.
///
/// `not_found` holds the expected values missing from `actual`,
/// `not_expected` the values of `actual` that were not expected. Either may
/// be empty, which selects a shorter message.
///
/// ```rust
/// use fluent_errors::prelude::*;
/// use fluent_errors::factory::collections::should_contain_only;
///
/// let factory = should_contain_only(
///     Value::list(["Yoda"]),
///     Value::list(["Luke", "Yoda"]),
///     vec![Value::from("Luke")],
///     vec![],
///     &ComparisonStrategy::Standard,
/// );
/// assert_eq!(
///     factory.create(None, &StandardRepresentation::default()),
///     "\nExpecting Vec:\n  <[\"Yoda\"]>\nto contain only:\n  <[\"Luke\", \"Yoda\"]>\nbut could not find the following element(s):\n  <[\"Luke\"]>\n"
/// );
/// ```
#[must_use]
pub fn should_contain_only(
    actual: impl Into<Value>,
    expected: impl Into<Value>,
    not_found: Vec<Value>,
    not_expected: Vec<Value>,
    comparison_strategy: &ComparisonStrategy,
) -> ErrorMessageFactory {
    let actual = actual.into();
    let (container, group) = container_names(&actual);
    let (container, group) = (escape_percent(&container), escape_percent(&group));
    let head = format!("%nExpecting {container}:%n  <%s>%nto contain only:%n  <%s>%n");

    let mut arguments = vec![MessageArg::Value(actual), MessageArg::value(expected)];
    let body = match (not_found.is_empty(), not_expected.is_empty()) {
        (false, false) => {
            arguments.push(MessageArg::Value(Value::list(not_found)));
            arguments.push(MessageArg::Value(Value::list(not_expected)));
            format!("{group} not found:%n  <%s>%nand {group} not expected:%n  <%s>%n")
        }
        (false, true) => {
            arguments.push(MessageArg::Value(Value::list(not_found)));
            format!("but could not find the following {group}:%n  <%s>%n")
        }
        (true, _) => {
            arguments.push(MessageArg::Value(Value::list(not_expected)));
            format!("but the following {group} were unexpected:%n  <%s>%n")
        }
    };
    arguments.push(MessageArg::Strategy(comparison_strategy.clone()));
    ErrorMessageFactory::from_parts(format!("{head}{body}%s"), arguments)
}

/// Failure for `actual` not containing each of `expected` exactly once.
#[must_use]
pub fn should_contain_only_once(
    actual: impl Into<Value>,
    expected: impl Into<Value>,
    not_found: Vec<Value>,
    found_more_than_once: Vec<Value>,
    comparison_strategy: &ComparisonStrategy,
) -> ErrorMessageFactory {
    const HEAD: &str = "%nExpecting actual:%n  %s%nto contain only once:%n  %s%n";

    let mut arguments = vec![MessageArg::value(actual), MessageArg::value(expected)];
    let body = match (not_found.is_empty(), found_more_than_once.is_empty()) {
        (false, false) => {
            arguments.push(MessageArg::Value(Value::list(not_found)));
            arguments.push(MessageArg::Value(Value::list(found_more_than_once)));
            "but some elements were not found:%n  %s%nand others were found more than once:%n  %s%n"
        }
        (false, true) => {
            arguments.push(MessageArg::Value(Value::list(not_found)));
            "but some elements were not found:%n  %s%n"
        }
        (true, _) => {
            arguments.push(MessageArg::Value(Value::list(found_more_than_once)));
            "but some elements were found more than once:%n  %s%n"
        }
    };
    arguments.push(MessageArg::Strategy(comparison_strategy.clone()));
    ErrorMessageFactory::from_parts(format!("{HEAD}{body}%s"), arguments)
}

/// Failure for `actual` having `actual_size` elements instead of
/// `expected_size`.
#[must_use]
pub fn should_have_size(
    actual: impl Into<Value>,
    actual_size: usize,
    expected_size: usize,
) -> ErrorMessageFactory {
    ErrorMessageFactory::from_parts(
        "%nExpected size: %s but was: %s in:%n%s",
        vec![
            MessageArg::value(expected_size),
            MessageArg::value(actual_size),
            MessageArg::value(actual),
        ],
    )
}
