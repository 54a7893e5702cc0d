//! Recursive comparison failures.

use super::ErrorMessageFactory;
use crate::message::MessageArg;
use crate::recursive::{ComparisonDifference, RecursiveComparisonConfiguration};
use crate::representation::Representation;
use crate::value::Value;

/// Failure for `actual` and `expected` differing when compared field by
/// field.
///
/// Differences are described with the configuration's representation when it
/// has one, otherwise with `representation`.
///
/// ```rust
/// use fluent_errors::prelude::*;
/// use fluent_errors::factory::recursive::should_be_equal_by_comparing_field_by_field_recursively;
/// use fluent_errors::recursive::{determine_differences, RecursiveComparisonConfiguration};
/// use fluent_errors::value::ObjectRef;
///
/// let actual = Value::from(ObjectRef::new("Person").with_field("name", "Luke"));
/// let expected = Value::from(ObjectRef::new("Person").with_field("name", "Leia"));
/// let configuration = RecursiveComparisonConfiguration::default();
/// let differences = determine_differences(&actual, &expected, &configuration);
///
/// let representation = StandardRepresentation::default();
/// let factory = should_be_equal_by_comparing_field_by_field_recursively(
///     actual,
///     expected,
///     &differences,
///     &configuration,
///     &representation,
/// );
/// let message = factory.create(None, &representation);
/// assert!(message.contains("but found the following difference:\n\nfield/property 'name' differ:"));
/// ```
#[must_use]
pub fn should_be_equal_by_comparing_field_by_field_recursively(
    actual: impl Into<Value>,
    expected: impl Into<Value>,
    differences: &[ComparisonDifference],
    configuration: &RecursiveComparisonConfiguration,
    representation: &dyn Representation,
) -> ErrorMessageFactory {
    let configured = configuration.representation();
    let representation = configured.as_deref().unwrap_or(representation);
    let described: Vec<String> = differences
        .iter()
        .map(|difference| difference.multi_line_description(representation))
        .collect();
    let count = match differences.len() {
        1 => "difference".to_string(),
        n => format!("{n} differences"),
    };
    ErrorMessageFactory::from_parts(
        "%nExpecting actual:%n  %s%nto be equal to:%n  %s%nwhen recursively comparing field by field, but found the following %s:%n%n%s%n%nThe recursive comparison was performed with this configuration:%n%s",
        vec![
            MessageArg::value(actual),
            MessageArg::value(expected),
            MessageArg::Text(count),
            MessageArg::Text(described.join("\n\n")),
            MessageArg::Text(configuration.multi_line_description()),
        ],
    )
}
