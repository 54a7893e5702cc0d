//! Failures of per-element requirements.

use super::ErrorMessageFactory;
use crate::message::MessageArg;
use crate::representation::Representation;
use crate::value::Value;

/// An element that failed a requirement, with the requirement's message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnsatisfiedRequirement {
    pub element: Value,
    pub error_message: String,
}

impl UnsatisfiedRequirement {
    #[must_use]
    pub fn new(element: impl Into<Value>, error_message: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            error_message: error_message.into(),
        }
    }

    #[must_use]
    pub fn describe(&self, representation: &dyn Representation) -> String {
        format!(
            "{}\nerror: {}",
            representation.to_string_of(&self.element),
            self.error_message
        )
    }
}

/// A pair of zipped elements that failed a requirement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZipSatisfyError {
    pub actual_element: Value,
    pub other_element: Value,
    pub error_message: String,
}

impl ZipSatisfyError {
    #[must_use]
    pub fn new(
        actual_element: impl Into<Value>,
        other_element: impl Into<Value>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            actual_element: actual_element.into(),
            other_element: other_element.into(),
            error_message: error_message.into(),
        }
    }

    #[must_use]
    pub fn describe(&self, representation: &dyn Representation) -> String {
        format!(
            "({}, {})\nerror: {}",
            representation.to_string_of(&self.actual_element),
            representation.to_string_of(&self.other_element),
            self.error_message
        )
    }
}

fn describe_requirements(
    requirements: &[UnsatisfiedRequirement],
    representation: &dyn Representation,
) -> String {
    requirements
        .iter()
        .map(|requirement| requirement.describe(representation))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Failure for some elements of `actual` not satisfying the requirements.
///
/// Element renderings are fixed when the factory is built, so
/// `representation` should be the one the message is created with.
#[must_use]
pub fn elements_should_satisfy(
    actual: impl Into<Value>,
    unsatisfied: &[UnsatisfiedRequirement],
    representation: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::from_parts(
        "%nExpecting all elements of:%n  %s%nto satisfy given requirements, but these elements did not:%n%n%s",
        vec![
            MessageArg::value(actual),
            MessageArg::Text(describe_requirements(unsatisfied, representation)),
        ],
    )
}

/// Failure for no element of `actual` satisfying the requirements.
#[must_use]
pub fn elements_should_satisfy_any(
    actual: impl Into<Value>,
    unsatisfied: &[UnsatisfiedRequirement],
    representation: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::from_parts(
        "%nExpecting any element of:%n  %s%nto satisfy the given assertions requirements but none did:%n%n%s",
        vec![
            MessageArg::value(actual),
            MessageArg::Text(describe_requirements(unsatisfied, representation)),
        ],
    )
}

/// Failure for zipped pairs of `actual` and `other` not satisfying the
/// requirements.
#[must_use]
pub fn zipped_elements_should_satisfy(
    actual: impl Into<Value>,
    other: impl Into<Value>,
    errors: &[ZipSatisfyError],
    representation: &dyn Representation,
) -> ErrorMessageFactory {
    let described: String = errors
        .iter()
        .map(|error| format!("\n\n- {}", error.describe(representation)))
        .collect();
    ErrorMessageFactory::from_parts(
        "%nExpecting zipped elements of:%n  %s%nand:%n  %s%nto satisfy given requirements but these zipped elements did not:%s",
        vec![
            MessageArg::value(actual),
            MessageArg::value(other),
            MessageArg::Text(described),
        ],
    )
}
