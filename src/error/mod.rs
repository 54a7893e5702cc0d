//! Assertion errors and the machinery that decides which kind to build.
//!
//! The product of a failed check is an [`AssertionError`]. Its [`ErrorKind`]
//! records which "host integration" built it:
//!
//! - [`ErrorKind::ComparisonFailure`]: legacy expected/actual strings, with a
//!   compacted `expected:<..> but was:<..>` message.
//! - [`ErrorKind::AssertionFailed`]: typed actual/expected wrappers for IDE
//!   diff viewers.
//! - [`ErrorKind::MultipleFailures`]: a host-rendered aggregate.
//! - [`ErrorKind::AggregatedFailures`] / [`ErrorKind::SoftAssertions`]: the
//!   crate's own aggregate renderings, used when the host type is missing.
//! - [`ErrorKind::Plain`]: just a message.
//!
//! Host types are optional: they are looked up by name in a
//! [`ConstructorInvoker`] and every lookup or construction failure silently
//! falls through to the next, simpler kind. See [`AssertionErrorCreator`].

mod builders;
mod creator;
mod invoker;
mod multiple;
mod stack;

use std::fmt;

use crate::representation::Representation;
use crate::value::Value;

pub use builders::{
    AssertionFailedErrorBuilder, ComparisonFailureBuilder, FailureRequest,
    MultipleFailuresErrorBuilder, OptionalExceptionBuilder,
};
pub use creator::AssertionErrorCreator;
pub use invoker::{ConstructionError, ConstructorInvoker, CtorArgs, compact_comparison};
pub use multiple::{
    DEFAULT_MULTIPLE_FAILURES_HEADING, aggregated_failures_message, multiple_failures_message,
    soft_assertions_message,
};
pub use stack::{
    INTERNAL_FRAME_PREFIX, StackFrame, capture_stack_trace, remove_internal_frames,
};

/// Typed value carried by [`ErrorKind::AssertionFailed`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValueWrapper {
    /// Rendering through the representation active for the assertion.
    pub value: String,
    pub type_name: String,
    pub identity_hex: String,
}

impl ValueWrapper {
    #[must_use]
    pub fn of(value: &Value, representation: &dyn Representation) -> Self {
        Self {
            value: representation.to_string_of(value),
            type_name: value.type_name(),
            identity_hex: value.identity_hex(),
        }
    }
}

impl fmt::Display for ValueWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Which integration produced an [`AssertionError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    Plain,
    ComparisonFailure {
        expected: String,
        actual: String,
    },
    AssertionFailed {
        actual: ValueWrapper,
        expected: ValueWrapper,
    },
    MultipleFailures {
        heading: String,
        failures: Vec<AssertionError>,
    },
    AggregatedFailures {
        heading: String,
        failures: Vec<AssertionError>,
    },
    SoftAssertions {
        failures: Vec<AssertionError>,
    },
}

/// A failed expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionError {
    message: String,
    kind: ErrorKind,
    stack_trace: Vec<StackFrame>,
}

impl AssertionError {
    /// A plain error without stack trace.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ErrorKind::Plain,
            stack_trace: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_stack_trace(mut self, stack_trace: Vec<StackFrame>) -> Self {
        self.stack_trace = stack_trace;
        self
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    #[must_use]
    pub fn stack_trace(&self) -> &[StackFrame] {
        &self.stack_trace
    }

    /// First frame outside this crate.
    #[must_use]
    pub fn first_external_frame(&self) -> Option<&StackFrame> {
        self.stack_trace.iter().find(|frame| !frame.is_internal())
    }

    /// Drop the frames of this crate from the stack trace.
    pub fn remove_internal_frames(&mut self) {
        remove_internal_frames(&mut self.stack_trace);
    }

    /// Typed actual value, for errors built with actual/expected wrappers.
    #[must_use]
    pub fn actual(&self) -> Option<&ValueWrapper> {
        match &self.kind {
            ErrorKind::AssertionFailed { actual, .. } => Some(actual),
            _ => None,
        }
    }

    /// Typed expected value, for errors built with actual/expected wrappers.
    #[must_use]
    pub fn expected(&self) -> Option<&ValueWrapper> {
        match &self.kind {
            ErrorKind::AssertionFailed { expected, .. } => Some(expected),
            _ => None,
        }
    }

    /// Aggregated failures, empty for single-failure kinds.
    #[must_use]
    pub fn failures(&self) -> &[AssertionError] {
        match &self.kind {
            ErrorKind::MultipleFailures { failures, .. }
            | ErrorKind::AggregatedFailures { failures, .. }
            | ErrorKind::SoftAssertions { failures } => failures,
            _ => &[],
        }
    }
}

impl fmt::Display for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AssertionError {}

impl From<&str> for AssertionError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for AssertionError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}
