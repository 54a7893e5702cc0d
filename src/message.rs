//! Template interpolation for failure messages.
//!
//! Templates understand exactly three directives:
//!
//! | Directive | Meaning |
//! |-----------|---------|
//! | `%s` | next argument, rendered |
//! | `%n` | newline |
//! | `%%` | literal `%` |
//!
//! Interpolation runs in two passes. The first replaces every `%s` with its
//! rendered argument after doubling each `%` in that text; the second
//! resolves `%n` and `%%`. A value such as `"50%n"` therefore comes out
//! verbatim instead of gaining a line break.
//!
//! ```rust
//! use fluent_errors::message::{MessageArg, MessageFormatter};
//! use fluent_errors::representation::StandardRepresentation;
//!
//! let text = MessageFormatter
//!     .format(
//!         None,
//!         &StandardRepresentation::default(),
//!         "%nExpecting:%n  %s",
//!         &[MessageArg::value("100%s")],
//!     )
//!     .unwrap();
//! assert_eq!(text, "\nExpecting:\n  \"100%s\"");
//! ```

use std::fmt;

use crate::comparison::ComparisonStrategy;
use crate::description::{Description, format_description};
use crate::representation::Representation;
use crate::value::Value;

/// Errors raised when a template cannot be interpolated.
///
/// These signal API misuse, never an assertion mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The template has more `%s` placeholders than arguments.
    MissingArgument { index: usize, available: usize },
    /// A `%` followed by something other than `s`, `n` or `%`.
    UnknownDirective { directive: char, position: usize },
    /// A lone `%` at the very end of the template.
    DanglingPercent { position: usize },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument { index, available } => write!(
                f,
                "template placeholder #{index} has no argument ({available} available)"
            ),
            Self::UnknownDirective {
                directive,
                position,
            } => write!(
                f,
                "unsupported directive '%{directive}' at byte {position}"
            ),
            Self::DanglingPercent { position } => {
                write!(f, "dangling '%' at byte {position}")
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Description of a predicate, shown in "to match ... predicate" messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredicateDescription {
    description: String,
}

impl PredicateDescription {
    /// Text of the description used when none was supplied.
    pub const DEFAULT: &'static str = "given";

    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    /// The unnamed predicate.
    #[must_use]
    pub fn given() -> Self {
        Self::new(Self::DEFAULT)
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.description == Self::DEFAULT
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Default for PredicateDescription {
    fn default() -> Self {
        Self::given()
    }
}

impl fmt::Display for PredicateDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            f.write_str(&self.description)
        } else {
            write!(f, "'{}'", self.description)
        }
    }
}

/// One argument bound into a message template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageArg {
    /// A value rendered through the active representation.
    Value(Value),
    /// Pre-rendered text inserted as-is.
    Text(String),
    /// A predicate description.
    Predicate(PredicateDescription),
    /// A comparison strategy, rendered as its "when comparing ..." clause.
    Strategy(ComparisonStrategy),
}

impl MessageArg {
    #[must_use]
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Render the argument for interpolation (before percent escaping).
    #[must_use]
    pub fn render(&self, representation: &dyn Representation) -> String {
        match self {
            Self::Value(value) => representation.to_string_of(value),
            Self::Text(text) => text.clone(),
            Self::Predicate(predicate) => predicate.to_string(),
            Self::Strategy(strategy) => strategy.as_text(),
        }
    }
}

impl From<Value> for MessageArg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<PredicateDescription> for MessageArg {
    fn from(predicate: PredicateDescription) -> Self {
        Self::Predicate(predicate)
    }
}

impl From<ComparisonStrategy> for MessageArg {
    fn from(strategy: ComparisonStrategy) -> Self {
        Self::Strategy(strategy)
    }
}

/// Double every `%` so the text survives directive resolution unchanged.
#[must_use]
pub fn escape_percent(text: &str) -> String {
    text.replace('%', "%%")
}

/// Check a template and return the number of `%s` placeholders.
///
/// # Errors
///
/// [`FormatError::UnknownDirective`] or [`FormatError::DanglingPercent`] for
/// a malformed template.
pub fn count_placeholders(template: &str) -> Result<usize, FormatError> {
    let mut count = 0;
    let mut chars = template.char_indices();
    while let Some((position, c)) = chars.next() {
        if c != '%' {
            continue;
        }
        match chars.next() {
            Some((_, 's')) => count += 1,
            Some((_, 'n' | '%')) => {}
            Some((_, directive)) => {
                return Err(FormatError::UnknownDirective {
                    directive,
                    position,
                });
            }
            None => return Err(FormatError::DanglingPercent { position }),
        }
    }
    Ok(count)
}

/// Interpolates templates into final message text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageFormatter;

impl MessageFormatter {
    /// Build a message: the description prefix followed by the interpolated
    /// template.
    ///
    /// The template is validated completely before anything is substituted.
    /// Arguments beyond the number of placeholders are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] for a malformed template or when the
    /// template needs more arguments than given.
    pub fn format(
        &self,
        description: Option<&Description>,
        representation: &dyn Representation,
        template: &str,
        args: &[MessageArg],
    ) -> Result<String, FormatError> {
        let needed = count_placeholders(template)?;
        if needed > args.len() {
            return Err(FormatError::MissingArgument {
                index: args.len(),
                available: args.len(),
            });
        }

        let substituted = substitute(template, args, representation);
        let mut message = format_description(description);
        resolve_directives(&substituted, &mut message);
        log::trace!("formatted message with {needed} argument(s)");
        Ok(message)
    }
}

/// Pass 1: replace `%s` with escaped renderings, keep other directives.
fn substitute(template: &str, args: &[MessageArg], representation: &dyn Representation) -> String {
    let mut out = String::with_capacity(template.len() + 16 * args.len());
    let mut next_arg = args.iter();
    let mut chars = template.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => {
                if let Some(arg) = next_arg.next() {
                    out.push_str(&escape_percent(&arg.render(representation)));
                }
            }
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }
    out
}

/// Pass 2: resolve `%n` and `%%`.
fn resolve_directives(text: &str, out: &mut String) {
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('%') => out.push('%'),
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }
}
