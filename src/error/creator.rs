//! Chooses and builds the concrete kind of an [`AssertionError`].

use std::sync::Arc;

use super::builders::{
    AssertionFailedErrorBuilder, ComparisonFailureBuilder, FailureRequest,
    MultipleFailuresErrorBuilder, OptionalExceptionBuilder,
};
use super::invoker::ConstructorInvoker;
use super::multiple::{aggregated_failures_message, soft_assertions_message};
use super::stack::capture_stack_trace;
use super::{AssertionError, ErrorKind};
use crate::config::Configuration;
use crate::description::{Description, format_description};
use crate::representation::Representation;
use crate::value::Value;

/// Builds assertion errors, preferring richer host integrations.
///
/// Each entry point walks an ordered chain of [`OptionalExceptionBuilder`]s
/// and falls back to an error kind this crate can always build:
///
/// | Entry point | Chain |
/// |-------------|-------|
/// | [`assertion_error_with_description`](Self::assertion_error_with_description) | `ComparisonFailure` → `AssertionFailed` → plain |
/// | [`assertion_error`](Self::assertion_error) | `AssertionFailed` → plain |
/// | [`multiple_assertions_error`](Self::multiple_assertions_error) | `MultipleFailures` → aggregated |
/// | [`multiple_soft_assertions_error`](Self::multiple_soft_assertions_error) | `MultipleFailures` → soft |
///
/// Whatever the chain produces carries the captured stack trace, filtered of
/// this crate's frames unless disabled.
#[derive(Debug, Clone)]
pub struct AssertionErrorCreator {
    invoker: Arc<ConstructorInvoker>,
    remove_internal_frames: bool,
}

impl Default for AssertionErrorCreator {
    fn default() -> Self {
        Self::new()
    }
}

impl AssertionErrorCreator {
    /// A creator with all host integrations, honouring the process-wide
    /// stack filtering setting.
    #[must_use]
    pub fn new() -> Self {
        Self::from_configuration(&Configuration::global())
    }

    #[must_use]
    pub fn from_configuration(configuration: &Configuration) -> Self {
        Self {
            invoker: Arc::new(ConstructorInvoker::with_host_integrations()),
            remove_internal_frames: configuration.remove_internal_frames(),
        }
    }

    /// Replace the set of available host integrations.
    #[must_use]
    pub fn with_invoker(mut self, invoker: ConstructorInvoker) -> Self {
        self.invoker = Arc::new(invoker);
        self
    }

    #[must_use]
    pub fn with_remove_internal_frames(mut self, remove: bool) -> Self {
        self.remove_internal_frames = remove;
        self
    }

    #[must_use]
    pub fn invoker(&self) -> &ConstructorInvoker {
        &self.invoker
    }

    /// Error for an actual/expected mismatch, trying the legacy comparison
    /// failure first when a description is present.
    #[must_use]
    pub fn assertion_error_with_description(
        &self,
        message: &str,
        description: Option<&Description>,
        actual: &Value,
        expected: &Value,
        representation: &dyn Representation,
    ) -> AssertionError {
        let request =
            FailureRequest::comparison(message, description, actual, expected, representation);
        let error = ComparisonFailureBuilder::new(Arc::clone(&self.invoker))
            .build(&request)
            .or_else(|| AssertionFailedErrorBuilder::new(Arc::clone(&self.invoker)).build(&request))
            .unwrap_or_else(|| AssertionError::new(message));
        self.finish(error)
    }

    /// Error for an actual/expected mismatch carrying typed values when the
    /// host supports them.
    #[must_use]
    pub fn assertion_error(
        &self,
        message: &str,
        actual: &Value,
        expected: &Value,
        representation: &dyn Representation,
    ) -> AssertionError {
        let request = FailureRequest::comparison(message, None, actual, expected, representation);
        let error = AssertionFailedErrorBuilder::new(Arc::clone(&self.invoker))
            .build(&request)
            .unwrap_or_else(|| AssertionError::new(message));
        self.finish(error)
    }

    /// Combine failures collected under one description.
    #[must_use]
    pub fn multiple_assertions_error(
        &self,
        description: Option<&Description>,
        failures: &[AssertionError],
    ) -> AssertionError {
        let request = FailureRequest::aggregate(description, failures);
        let error = self.host_multiple_failures(&request).unwrap_or_else(|| {
            let heading = format_description(description).trim().to_string();
            AssertionError::new(aggregated_failures_message(&heading, failures)).with_kind(
                ErrorKind::AggregatedFailures {
                    heading,
                    failures: failures.to_vec(),
                },
            )
        });
        self.finish(error)
    }

    /// Combine failures collected by independent (soft) assertions.
    #[must_use]
    pub fn multiple_soft_assertions_error(&self, failures: &[AssertionError]) -> AssertionError {
        let request = FailureRequest::aggregate(None, failures);
        let error = self.host_multiple_failures(&request).unwrap_or_else(|| {
            AssertionError::new(soft_assertions_message(failures)).with_kind(
                ErrorKind::SoftAssertions {
                    failures: failures.to_vec(),
                },
            )
        });
        self.finish(error)
    }

    /// `Err` with the host aggregate when it can be built, `Ok(())` otherwise.
    ///
    /// # Errors
    ///
    /// The host `MultipleFailures` error for `failures`.
    pub fn try_throwing_multiple_failures_error(
        &self,
        failures: &[AssertionError],
    ) -> Result<(), AssertionError> {
        let request = FailureRequest::aggregate(None, failures);
        match self.host_multiple_failures(&request) {
            Some(error) => Err(self.finish(error)),
            None => Ok(()),
        }
    }

    /// A plain failure with just a message.
    #[must_use]
    pub fn failure(&self, message: &str) -> AssertionError {
        self.finish(AssertionError::new(message))
    }

    fn host_multiple_failures(&self, request: &FailureRequest<'_>) -> Option<AssertionError> {
        MultipleFailuresErrorBuilder::new(Arc::clone(&self.invoker)).build(request)
    }

    fn finish(&self, mut error: AssertionError) -> AssertionError {
        if error.stack_trace().is_empty() {
            error = error.with_stack_trace(capture_stack_trace());
        }
        if self.remove_internal_frames {
            error.remove_internal_frames();
        }
        error
    }
}
