//! Name-based construction of optional error types.
//!
//! A [`ConstructorInvoker`] maps type names to constructor functions. Host
//! integrations that may or may not be present (an IDE-aware failure type, a
//! test runner's aggregate type) register themselves here; callers ask for a
//! type by name and treat any [`ConstructionError`] as "not available".

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::multiple::multiple_failures_message;
use super::{AssertionError, ErrorKind, ValueWrapper};

/// Arguments handed to a registered constructor.
#[derive(Debug, Clone)]
pub enum CtorArgs {
    /// `(description, expected, actual)` strings.
    Comparison {
        description: String,
        expected: String,
        actual: String,
    },
    /// Message plus typed actual/expected.
    AssertionFailed {
        message: String,
        actual: ValueWrapper,
        expected: ValueWrapper,
    },
    /// Heading plus ordered failures.
    MultipleFailures {
        heading: String,
        failures: Vec<AssertionError>,
    },
}

impl CtorArgs {
    fn shape(&self) -> &'static str {
        match self {
            Self::Comparison { .. } => "(description, expected, actual)",
            Self::AssertionFailed { .. } => "(message, actual, expected)",
            Self::MultipleFailures { .. } => "(heading, failures)",
        }
    }
}

/// Why an optional error type could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// No constructor registered under this name.
    Unavailable { type_name: String },
    /// The constructor does not accept this argument shape.
    ArgumentMismatch {
        type_name: String,
        given: &'static str,
    },
    /// The constructor ran and reported a failure.
    Failed { type_name: String, reason: String },
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { type_name } => write!(f, "{type_name} is not available"),
            Self::ArgumentMismatch { type_name, given } => {
                write!(f, "{type_name} has no constructor taking {given}")
            }
            Self::Failed { type_name, reason } => {
                write!(f, "constructing {type_name} failed: {reason}")
            }
        }
    }
}

impl std::error::Error for ConstructionError {}

/// A registered constructor.
pub type Constructor =
    Arc<dyn Fn(CtorArgs) -> Result<AssertionError, ConstructionError> + Send + Sync>;

/// Registry of optional error constructors, looked up by type name.
#[derive(Clone)]
pub struct ConstructorInvoker {
    constructors: HashMap<String, Constructor>,
}

impl ConstructorInvoker {
    /// Legacy comparison failure taking `(description, expected, actual)`.
    pub const COMPARISON_FAILURE: &'static str = "ComparisonFailure";
    /// Failure with typed actual/expected values.
    pub const ASSERTION_FAILED_ERROR: &'static str = "AssertionFailedError";
    /// Host aggregate of several failures.
    pub const MULTIPLE_FAILURES_ERROR: &'static str = "MultipleFailuresError";

    /// An invoker where nothing is available.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// An invoker with the three built-in host integrations registered.
    #[must_use]
    pub fn with_host_integrations() -> Self {
        Self::empty()
            .register(Self::COMPARISON_FAILURE, comparison_failure)
            .register(Self::ASSERTION_FAILED_ERROR, assertion_failed_error)
            .register(Self::MULTIPLE_FAILURES_ERROR, multiple_failures_error)
    }

    /// Register (or replace) a constructor.
    #[must_use]
    pub fn register<F>(mut self, type_name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(CtorArgs) -> Result<AssertionError, ConstructionError> + Send + Sync + 'static,
    {
        self.constructors
            .insert(type_name.into(), Arc::new(constructor));
        self
    }

    /// Remove a constructor, making that type unavailable.
    #[must_use]
    pub fn unregister(mut self, type_name: &str) -> Self {
        self.constructors.remove(type_name);
        self
    }

    #[must_use]
    pub fn is_available(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    /// Build an instance of the named type.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::Unavailable`] when nothing is registered under
    /// `type_name`, or whatever the constructor itself reports.
    pub fn new_instance(
        &self,
        type_name: &str,
        args: CtorArgs,
    ) -> Result<AssertionError, ConstructionError> {
        let constructor =
            self.constructors
                .get(type_name)
                .ok_or_else(|| ConstructionError::Unavailable {
                    type_name: type_name.to_string(),
                })?;
        constructor(args)
    }
}

impl Default for ConstructorInvoker {
    fn default() -> Self {
        Self::with_host_integrations()
    }
}

impl fmt::Debug for ConstructorInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.constructors.keys().collect();
        names.sort();
        f.debug_struct("ConstructorInvoker")
            .field("constructors", &names)
            .finish()
    }
}

fn mismatch(type_name: &str, args: &CtorArgs) -> ConstructionError {
    ConstructionError::ArgumentMismatch {
        type_name: type_name.to_string(),
        given: args.shape(),
    }
}

fn comparison_failure(args: CtorArgs) -> Result<AssertionError, ConstructionError> {
    let CtorArgs::Comparison {
        description,
        expected,
        actual,
    } = args
    else {
        return Err(mismatch(ConstructorInvoker::COMPARISON_FAILURE, &args));
    };
    let message = compact_comparison(&description, &expected, &actual);
    Ok(AssertionError::new(message).with_kind(ErrorKind::ComparisonFailure { expected, actual }))
}

fn assertion_failed_error(args: CtorArgs) -> Result<AssertionError, ConstructionError> {
    let CtorArgs::AssertionFailed {
        message,
        actual,
        expected,
    } = args
    else {
        return Err(mismatch(ConstructorInvoker::ASSERTION_FAILED_ERROR, &args));
    };
    Ok(AssertionError::new(message).with_kind(ErrorKind::AssertionFailed { actual, expected }))
}

fn multiple_failures_error(args: CtorArgs) -> Result<AssertionError, ConstructionError> {
    let CtorArgs::MultipleFailures { heading, failures } = args else {
        return Err(mismatch(ConstructorInvoker::MULTIPLE_FAILURES_ERROR, &args));
    };
    let message = multiple_failures_message(&heading, &failures);
    Ok(AssertionError::new(message).with_kind(ErrorKind::MultipleFailures { heading, failures }))
}

const CONTEXT_LENGTH: usize = 20;
const ELLIPSIS: &str = "...";
const DELTA_START: &str = "[";
const DELTA_END: &str = "]";

/// Render `"<message> expected:<..> but was:<..>"` with the differing middle
/// part bracketed and long common context elided.
///
/// ```rust
/// use fluent_errors::error::compact_comparison;
///
/// assert_eq!(
///     compact_comparison("", "0x03", "0x02"),
///     "expected:<0x0[3]> but was:<0x0[2]>"
/// );
/// ```
#[must_use]
pub fn compact_comparison(message: &str, expected: &str, actual: &str) -> String {
    let prefix_text = if message.is_empty() {
        String::new()
    } else {
        format!("{message} ")
    };
    if expected == actual {
        return format!("{prefix_text}expected:<{expected}> but was:<{actual}>");
    }

    let expected: Vec<char> = expected.chars().collect();
    let actual: Vec<char> = actual.chars().collect();

    let prefix = expected
        .iter()
        .zip(&actual)
        .take_while(|(e, a)| e == a)
        .count();

    // Number of chars after the differing part, plus one.
    let mut expected_end = expected.len();
    let mut actual_end = actual.len();
    while expected_end > prefix && actual_end > prefix && expected[expected_end - 1] == actual[actual_end - 1] {
        expected_end -= 1;
        actual_end -= 1;
    }
    let suffix = expected.len() - expected_end;

    let common_prefix = if prefix > 0 {
        let start = prefix.saturating_sub(CONTEXT_LENGTH);
        let ellipsis = if prefix > CONTEXT_LENGTH { ELLIPSIS } else { "" };
        format!("{ellipsis}{}", expected[start..prefix].iter().collect::<String>())
    } else {
        String::new()
    };
    let common_suffix = if suffix > 0 {
        let end = (expected_end + CONTEXT_LENGTH).min(expected.len());
        let ellipsis = if expected.len() - expected_end > CONTEXT_LENGTH {
            ELLIPSIS
        } else {
            ""
        };
        format!("{}{ellipsis}", expected[expected_end..end].iter().collect::<String>())
    } else {
        String::new()
    };

    let compact = |source: &[char], end: usize| {
        format!(
            "{common_prefix}{DELTA_START}{}{DELTA_END}{common_suffix}",
            source[prefix..end].iter().collect::<String>()
        )
    };
    format!(
        "{prefix_text}expected:<{}> but was:<{}>",
        compact(&expected, expected_end),
        compact(&actual, actual_end)
    )
}
