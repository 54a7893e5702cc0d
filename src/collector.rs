//! Collecting failures of independent assertions.
//!
//! A [`FailureCollector`] lets a test run every check before failing, then
//! report all failures at once:
//!
//! ```rust
//! use fluent_errors::collector::FailureCollector;
//! use fluent_errors::error::{AssertionError, AssertionErrorCreator, ConstructorInvoker};
//!
//! let creator = AssertionErrorCreator::default().with_invoker(ConstructorInvoker::empty());
//! let collector = FailureCollector::with_creator(creator);
//! collector.collect(Ok(()));
//! collector.collect::<()>(Err(AssertionError::new("expected 1 but was 2")));
//! collector.collect_error(AssertionError::new("expected empty"));
//!
//! let error = collector.assert_all().unwrap_err();
//! assert_eq!(
//!     error.message(),
//!     "\nThe following 2 assertions failed:\n1) expected 1 but was 2\n2) expected empty\n"
//! );
//! ```

use std::sync::Mutex;

use crate::error::{AssertionError, AssertionErrorCreator};
use crate::sync::lock_recover;

/// Accumulates assertion failures in the order they occur.
///
/// Shareable across threads; each failure is recorded exactly once.
#[derive(Debug, Default)]
pub struct FailureCollector {
    creator: AssertionErrorCreator,
    errors: Mutex<Vec<AssertionError>>,
}

impl FailureCollector {
    /// A collector using the process-wide configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_creator(AssertionErrorCreator::new())
    }

    #[must_use]
    pub fn with_creator(creator: AssertionErrorCreator) -> Self {
        Self {
            creator,
            errors: Mutex::new(Vec::new()),
        }
    }

    /// Record the failure of `result`, if any.
    pub fn collect<T>(&self, result: Result<T, AssertionError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.collect_error(error);
                None
            }
        }
    }

    pub fn collect_error(&self, error: AssertionError) {
        log::trace!("collected failure: {}", error.message());
        lock_recover(&self.errors).push(error);
    }

    /// Snapshot of the failures so far.
    #[must_use]
    pub fn errors_collected(&self) -> Vec<AssertionError> {
        lock_recover(&self.errors).clone()
    }

    #[must_use]
    pub fn was_success(&self) -> bool {
        lock_recover(&self.errors).is_empty()
    }

    /// Fail with every collected failure combined into one error.
    ///
    /// # Errors
    ///
    /// The combined error when at least one failure was collected.
    pub fn assert_all(&self) -> Result<(), AssertionError> {
        let errors = self.errors_collected();
        if errors.is_empty() {
            return Ok(());
        }
        Err(self.creator.multiple_soft_assertions_error(&errors))
    }
}
