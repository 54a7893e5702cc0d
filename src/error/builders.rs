//! Optional error builders composed into a fallback chain.

use std::sync::Arc;

use super::invoker::{ConstructorInvoker, CtorArgs};
use super::{AssertionError, ValueWrapper};
use crate::description::{Description, format_description};
use crate::representation::Representation;
use crate::value::Value;

/// Everything a builder may need to construct an error.
#[derive(Clone, Copy)]
pub struct FailureRequest<'a> {
    pub message: &'a str,
    pub description: Option<&'a Description>,
    pub actual: Option<&'a Value>,
    pub expected: Option<&'a Value>,
    pub representation: Option<&'a dyn Representation>,
    pub failures: &'a [AssertionError],
}

impl<'a> FailureRequest<'a> {
    /// A request for a single actual/expected mismatch.
    #[must_use]
    pub fn comparison(
        message: &'a str,
        description: Option<&'a Description>,
        actual: &'a Value,
        expected: &'a Value,
        representation: &'a dyn Representation,
    ) -> Self {
        Self {
            message,
            description,
            actual: Some(actual),
            expected: Some(expected),
            representation: Some(representation),
            failures: &[],
        }
    }

    /// A request aggregating several failures.
    #[must_use]
    pub fn aggregate(description: Option<&'a Description>, failures: &'a [AssertionError]) -> Self {
        Self {
            message: "",
            description,
            actual: None,
            expected: None,
            representation: None,
            failures,
        }
    }
}

/// Attempts to build one family of optional error types.
///
/// `None` means "not available here": the caller moves on to the next
/// builder. Implementations never panic and never propagate errors.
pub trait OptionalExceptionBuilder {
    fn build(&self, request: &FailureRequest<'_>) -> Option<AssertionError>;
}

fn invoke(invoker: &ConstructorInvoker, type_name: &str, args: CtorArgs) -> Option<AssertionError> {
    match invoker.new_instance(type_name, args) {
        Ok(error) => Some(error),
        Err(err) => {
            log::debug!("falling back: {err}");
            None
        }
    }
}

/// Builds the legacy `(description, expected, actual)` comparison failure.
///
/// Only applies when the formatted description is non-blank.
#[derive(Debug, Clone)]
pub struct ComparisonFailureBuilder {
    invoker: Arc<ConstructorInvoker>,
}

impl ComparisonFailureBuilder {
    #[must_use]
    pub fn new(invoker: Arc<ConstructorInvoker>) -> Self {
        Self { invoker }
    }
}

impl OptionalExceptionBuilder for ComparisonFailureBuilder {
    fn build(&self, request: &FailureRequest<'_>) -> Option<AssertionError> {
        let description = format_description(request.description);
        let description = description.trim();
        if description.is_empty() {
            return None;
        }
        let (actual, expected, representation) =
            (request.actual?, request.expected?, request.representation?);
        invoke(
            &self.invoker,
            ConstructorInvoker::COMPARISON_FAILURE,
            CtorArgs::Comparison {
                description: description.to_string(),
                expected: representation.to_string_of(expected),
                actual: representation.to_string_of(actual),
            },
        )
    }
}

/// Builds a failure carrying typed actual/expected wrappers.
#[derive(Debug, Clone)]
pub struct AssertionFailedErrorBuilder {
    invoker: Arc<ConstructorInvoker>,
}

impl AssertionFailedErrorBuilder {
    #[must_use]
    pub fn new(invoker: Arc<ConstructorInvoker>) -> Self {
        Self { invoker }
    }
}

impl OptionalExceptionBuilder for AssertionFailedErrorBuilder {
    fn build(&self, request: &FailureRequest<'_>) -> Option<AssertionError> {
        let (actual, expected, representation) =
            (request.actual?, request.expected?, request.representation?);
        invoke(
            &self.invoker,
            ConstructorInvoker::ASSERTION_FAILED_ERROR,
            CtorArgs::AssertionFailed {
                message: request.message.to_string(),
                actual: ValueWrapper::of(actual, representation),
                expected: ValueWrapper::of(expected, representation),
            },
        )
    }
}

/// Builds the host aggregate; never applies to an empty failure list.
#[derive(Debug, Clone)]
pub struct MultipleFailuresErrorBuilder {
    invoker: Arc<ConstructorInvoker>,
}

impl MultipleFailuresErrorBuilder {
    #[must_use]
    pub fn new(invoker: Arc<ConstructorInvoker>) -> Self {
        Self { invoker }
    }
}

impl OptionalExceptionBuilder for MultipleFailuresErrorBuilder {
    fn build(&self, request: &FailureRequest<'_>) -> Option<AssertionError> {
        if request.failures.is_empty() {
            return None;
        }
        let heading = format_description(request.description).trim().to_string();
        invoke(
            &self.invoker,
            ConstructorInvoker::MULTIPLE_FAILURES_ERROR,
            CtorArgs::MultipleFailures {
                heading,
                failures: request.failures.to_vec(),
            },
        )
    }
}
