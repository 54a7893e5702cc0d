//! Message factories: deferred, comparable builders of one failure message.
//!
//! A factory binds a template to its arguments when a check fails and
//! renders the message later, once the description and representation of
//! the assertion are known:
//!
//! - [`equality`]: `should_be_equal`, `should_not_be_equal`
//! - [`collections`]: `should_contain_only`, `should_contain_only_once`,
//!   `should_have_size`
//! - [`strings`]: `should_contain_char_sequence` and its variants,
//!   `should_contain_only_once` for strings
//! - [`predicates`]: `any_element_should_match`, `elements_should_match`,
//!   `no_element_should_match`
//! - [`satisfy`]: per-element requirement failures
//! - [`recursive`]: field-by-field recursive comparison failures
//!
//! # Examples
//!
//! ```rust
//! use fluent_errors::prelude::*;
//! use fluent_errors::factory::strings::should_contain_only_once;
//!
//! let factory = should_contain_only_once(
//!     "aaamotifmotifaabbbmotifaaa",
//!     "motif",
//!     3,
//!     &ComparisonStrategy::Standard,
//! );
//! let message = factory.create(None, &StandardRepresentation::default());
//! assert_eq!(
//!     message,
//!     "Expecting: <\"motif\"> to appear only once in: <\"aaamotifmotifaabbbmotifaaa\"> but it appeared 3 times"
//! );
//! ```

pub mod collections;
pub mod equality;
pub mod predicates;
pub mod recursive;
pub mod satisfy;
pub mod strings;

use crate::config::Configuration;
use crate::description::Description;
use crate::error::{AssertionError, AssertionErrorCreator};
use crate::message::{FormatError, MessageArg, MessageFormatter, count_placeholders};
use crate::representation::Representation;

pub use equality::ShouldBeEqual;
pub use satisfy::{UnsatisfiedRequirement, ZipSatisfyError};

/// A template plus the arguments it will be rendered with.
///
/// Two factories are equal when both template and arguments are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorMessageFactory {
    template: String,
    arguments: Vec<MessageArg>,
}

impl ErrorMessageFactory {
    /// Bind `arguments` to `template`.
    ///
    /// # Errors
    ///
    /// A [`FormatError`] when the template is malformed or needs more
    /// arguments than given.
    pub fn new(
        template: impl Into<String>,
        arguments: impl IntoIterator<Item = MessageArg>,
    ) -> Result<Self, FormatError> {
        let template = template.into();
        let arguments: Vec<MessageArg> = arguments.into_iter().collect();
        let needed = count_placeholders(&template)?;
        if needed > arguments.len() {
            return Err(FormatError::MissingArgument {
                index: arguments.len(),
                available: arguments.len(),
            });
        }
        Ok(Self {
            template,
            arguments,
        })
    }

    /// For the crate's own templates, which are known to be well formed.
    pub(crate) fn from_parts(template: impl Into<String>, arguments: Vec<MessageArg>) -> Self {
        Self {
            template: template.into(),
            arguments,
        }
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    #[must_use]
    pub fn arguments(&self) -> &[MessageArg] {
        &self.arguments
    }

    /// Render the message.
    ///
    /// Templates are validated on construction, so formatting cannot fail
    /// here; should it ever, the raw template is returned.
    #[must_use]
    pub fn create(
        &self,
        description: Option<&Description>,
        representation: &dyn Representation,
    ) -> String {
        MessageFormatter
            .format(description, representation, &self.template, &self.arguments)
            .unwrap_or_else(|err| {
                log::warn!("could not format {:?}: {err}", self.template);
                self.template.clone()
            })
    }

    /// Render with no description and the process-wide representation.
    #[must_use]
    pub fn create_with_defaults(&self) -> String {
        self.create(None, Configuration::global().representation().as_ref())
    }

    /// Render with `description` and the process-wide representation.
    #[must_use]
    pub fn create_with_description(&self, description: &Description) -> String {
        self.create(
            Some(description),
            Configuration::global().representation().as_ref(),
        )
    }
}

/// Factories that build the whole error, not just its message.
pub trait AssertionErrorFactory {
    fn new_assertion_error(
        &self,
        description: Option<&Description>,
        representation: &dyn Representation,
        creator: &AssertionErrorCreator,
    ) -> AssertionError;
}

impl AssertionErrorFactory for ErrorMessageFactory {
    fn new_assertion_error(
        &self,
        description: Option<&Description>,
        representation: &dyn Representation,
        creator: &AssertionErrorCreator,
    ) -> AssertionError {
        creator.failure(&self.create(description, representation))
    }
}
