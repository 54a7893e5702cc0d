//! Equality failures.

use super::{AssertionErrorFactory, ErrorMessageFactory};
use crate::comparison::ComparisonStrategy;
use crate::description::Description;
use crate::error::{AssertionError, AssertionErrorCreator};
use crate::message::MessageArg;
use crate::representation::Representation;
use crate::value::Value;

const EXPECTED_BUT_WAS: &str = "%nexpected: %s%n but was: %s";
const EXPECTED_BUT_WAS_MULTI_LINE: &str = "%nexpected: %n  %s%n but was: %n  %s";
const COMPARISON_STRATEGY_CLAUSE: &str = "%n%s";

/// An `actual` that was expected to equal `expected`.
///
/// With the standard strategy the error goes through the creator's
/// comparison-failure chain so hosts can offer a diff. The error is plain
/// when both sides render identically (the message shows type and identity
/// instead) or when a comparator was used (the message names it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShouldBeEqual {
    actual: Value,
    expected: Value,
    comparison_strategy: ComparisonStrategy,
}

/// Failure for `actual` not being equal to `expected`.
///
/// ```rust
/// use fluent_errors::prelude::*;
/// use fluent_errors::factory::equality::should_be_equal;
///
/// let factory = should_be_equal("Luke", "Yoda", &ComparisonStrategy::Standard);
/// assert_eq!(
///     factory.message(None, &StandardRepresentation::default()),
///     "\nexpected: \"Yoda\"\n but was: \"Luke\""
/// );
/// ```
#[must_use]
pub fn should_be_equal(
    actual: impl Into<Value>,
    expected: impl Into<Value>,
    comparison_strategy: &ComparisonStrategy,
) -> ShouldBeEqual {
    ShouldBeEqual {
        actual: actual.into(),
        expected: expected.into(),
        comparison_strategy: comparison_strategy.clone(),
    }
}

impl ShouldBeEqual {
    #[must_use]
    pub fn actual(&self) -> &Value {
        &self.actual
    }

    #[must_use]
    pub fn expected(&self) -> &Value {
        &self.expected
    }

    #[must_use]
    pub fn comparison_strategy(&self) -> &ComparisonStrategy {
        &self.comparison_strategy
    }

    fn renders_identically(&self, representation: &dyn Representation) -> bool {
        representation.to_string_of(&self.actual) == representation.to_string_of(&self.expected)
    }

    /// The message factory for this failure under `representation`.
    #[must_use]
    pub fn message_factory(&self, representation: &dyn Representation) -> ErrorMessageFactory {
        let (actual, expected) = if self.renders_identically(representation) {
            (
                representation.unambiguous_to_string_of(&self.actual),
                representation.unambiguous_to_string_of(&self.expected),
            )
        } else {
            (
                representation.to_string_of(&self.actual),
                representation.to_string_of(&self.expected),
            )
        };

        let multi_line = actual.contains('\n') || expected.contains('\n');
        let (mut template, actual, expected) = if multi_line {
            (
                EXPECTED_BUT_WAS_MULTI_LINE.to_string(),
                indent(&actual),
                indent(&expected),
            )
        } else {
            (EXPECTED_BUT_WAS.to_string(), actual, expected)
        };

        let mut arguments = vec![MessageArg::Text(expected), MessageArg::Text(actual)];
        if !self.comparison_strategy.is_standard() {
            template.push_str(COMPARISON_STRATEGY_CLAUSE);
            arguments.push(MessageArg::Strategy(self.comparison_strategy.clone()));
        }
        ErrorMessageFactory::from_parts(template, arguments)
    }

    /// The failure message.
    #[must_use]
    pub fn message(
        &self,
        description: Option<&Description>,
        representation: &dyn Representation,
    ) -> String {
        self.message_factory(representation)
            .create(description, representation)
    }
}

impl AssertionErrorFactory for ShouldBeEqual {
    fn new_assertion_error(
        &self,
        description: Option<&Description>,
        representation: &dyn Representation,
        creator: &AssertionErrorCreator,
    ) -> AssertionError {
        let message = self.message(description, representation);
        if self.renders_identically(representation) || !self.comparison_strategy.is_standard() {
            return creator.failure(&message);
        }
        creator.assertion_error_with_description(
            &message,
            description,
            &self.actual,
            &self.expected,
            representation,
        )
    }
}

/// Keep continuation lines aligned under the two-space value indent.
fn indent(text: &str) -> String {
    text.replace('\n', "\n  ")
}

/// Failure for `actual` being equal to `other`.
#[must_use]
pub fn should_not_be_equal(
    actual: impl Into<Value>,
    other: impl Into<Value>,
    comparison_strategy: &ComparisonStrategy,
) -> ErrorMessageFactory {
    let mut arguments = vec![MessageArg::value(actual), MessageArg::value(other)];
    let template = if comparison_strategy.is_standard() {
        "%nExpecting actual:%n  %s%nnot to be equal to:%n  %s%n"
    } else {
        arguments.push(MessageArg::Strategy(comparison_strategy.clone()));
        "%nExpecting actual:%n  %s%nnot to be equal to:%n  %s%n%s"
    };
    ErrorMessageFactory::from_parts(template, arguments)
}
