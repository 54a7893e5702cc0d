//! Predicate match failures.

use super::ErrorMessageFactory;
use crate::message::{MessageArg, PredicateDescription};
use crate::value::Value;

/// Failure for no element of `actual` matching the predicate.
///
/// ```rust
/// use fluent_errors::prelude::*;
/// use fluent_errors::factory::predicates::any_element_should_match;
///
/// let factory = any_element_should_match(
///     Value::list(["Luke", "Yoda"]),
///     PredicateDescription::new("Yoda violates some restrictions"),
/// );
/// assert_eq!(
///     factory.create(None, &StandardRepresentation::default()),
///     "Expecting any elements of: <[\"Luke\", \"Yoda\"]> to match 'Yoda violates some restrictions' predicate but none did."
/// );
/// ```
#[must_use]
pub fn any_element_should_match(
    actual: impl Into<Value>,
    predicate: PredicateDescription,
) -> ErrorMessageFactory {
    ErrorMessageFactory::from_parts(
        "Expecting any elements of: <%s> to match %s predicate but none did.",
        vec![MessageArg::value(actual), MessageArg::Predicate(predicate)],
    )
}

/// Failure for some elements of `actual` not matching the predicate.
///
/// A single offending element is shown on its own, several as a list.
#[must_use]
pub fn elements_should_match(
    actual: impl Into<Value>,
    mut not_matching: Vec<Value>,
    predicate: PredicateDescription,
) -> ErrorMessageFactory {
    let (template, offending) = if not_matching.len() == 1 {
        (
            "%nExpecting all elements of:%n  %s%nto match %s predicate but this element did not:%n  %s",
            not_matching.remove(0),
        )
    } else {
        (
            "%nExpecting all elements of:%n  %s%nto match %s predicate but these elements did not:%n  %s",
            Value::list(not_matching),
        )
    };
    ErrorMessageFactory::from_parts(
        template,
        vec![
            MessageArg::value(actual),
            MessageArg::Predicate(predicate),
            MessageArg::Value(offending),
        ],
    )
}

/// Failure for `matching`, an element of `actual`, matching the predicate.
#[must_use]
pub fn no_element_should_match(
    actual: impl Into<Value>,
    matching: impl Into<Value>,
    predicate: PredicateDescription,
) -> ErrorMessageFactory {
    ErrorMessageFactory::from_parts(
        "%nExpecting no elements of:%n  %s%nto match %s predicate but this element did:%n  %s",
        vec![
            MessageArg::value(actual),
            MessageArg::Predicate(predicate),
            MessageArg::value(matching),
        ],
    )
}
