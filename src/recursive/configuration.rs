//! Settings of a recursive comparison.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use regex::Regex;

use super::FieldLocation;
use crate::comparison::Comparator;
use crate::config::ConfigError;
use crate::representation::SharedRepresentation;
use crate::value::Value;

bitflags! {
    /// On/off switches of a recursive comparison.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ComparisonFlags: u8 {
        /// Skip fields whose actual value is null.
        const IGNORE_ALL_ACTUAL_NULL_FIELDS           = 1 << 0;
        /// Skip fields whose expected value is null.
        const IGNORE_ALL_EXPECTED_NULL_FIELDS         = 1 << 1;
        /// Compare every ordered sequence as if unordered.
        const IGNORE_COLLECTION_ORDER                 = 1 << 2;
        /// Values of different types are different even if their fields match.
        const STRICT_TYPE_CHECKING                    = 1 << 3;
        /// A null matches an empty array or sequence.
        const TREAT_NULL_AND_EMPTY_ITERABLES_AS_EQUAL = 1 << 4;
    }
}

type SharedComparator = Arc<dyn Comparator>;

/// What the recursive comparison ignores and how it compares what is left.
///
/// Built with [`RecursiveComparisonConfiguration::builder`]; the default
/// compares every field with natural equality, lenient on types.
#[derive(Clone, Default)]
pub struct RecursiveComparisonConfiguration {
    flags: ComparisonFlags,
    ignored_fields: Vec<String>,
    ignored_fields_regexes: Vec<Regex>,
    ignored_collection_order_in_fields: Vec<String>,
    field_comparators: Vec<(String, SharedComparator)>,
    type_comparators: Vec<(String, SharedComparator)>,
    field_messages: Vec<(String, String)>,
    type_messages: Vec<(String, String)>,
    representation: Option<SharedRepresentation>,
}

impl fmt::Debug for RecursiveComparisonConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let comparators = |entries: &[(String, SharedComparator)]| {
            entries
                .iter()
                .map(|(key, comparator)| format!("{key} -> {}", comparator.description()))
                .collect::<Vec<_>>()
        };
        f.debug_struct("RecursiveComparisonConfiguration")
            .field("flags", &self.flags)
            .field("ignored_fields", &self.ignored_fields)
            .field(
                "ignored_fields_regexes",
                &self
                    .ignored_fields_regexes
                    .iter()
                    .map(Regex::as_str)
                    .collect::<Vec<_>>(),
            )
            .field(
                "ignored_collection_order_in_fields",
                &self.ignored_collection_order_in_fields,
            )
            .field("field_comparators", &comparators(&self.field_comparators))
            .field("type_comparators", &comparators(&self.type_comparators))
            .field("field_messages", &self.field_messages)
            .field("type_messages", &self.type_messages)
            .field("representation", &self.representation)
            .finish()
    }
}

impl RecursiveComparisonConfiguration {
    #[must_use]
    pub fn builder() -> RecursiveComparisonConfigurationBuilder {
        RecursiveComparisonConfigurationBuilder::default()
    }

    #[must_use]
    pub fn flags(&self) -> ComparisonFlags {
        self.flags
    }

    #[must_use]
    pub fn ignore_all_actual_null_fields(&self) -> bool {
        self.flags
            .contains(ComparisonFlags::IGNORE_ALL_ACTUAL_NULL_FIELDS)
    }

    #[must_use]
    pub fn ignore_all_expected_null_fields(&self) -> bool {
        self.flags
            .contains(ComparisonFlags::IGNORE_ALL_EXPECTED_NULL_FIELDS)
    }

    #[must_use]
    pub fn ignore_collection_order(&self) -> bool {
        self.flags.contains(ComparisonFlags::IGNORE_COLLECTION_ORDER)
    }

    #[must_use]
    pub fn strict_type_checking(&self) -> bool {
        self.flags.contains(ComparisonFlags::STRICT_TYPE_CHECKING)
    }

    #[must_use]
    pub fn treat_null_and_empty_iterables_as_equal(&self) -> bool {
        self.flags
            .contains(ComparisonFlags::TREAT_NULL_AND_EMPTY_ITERABLES_AS_EQUAL)
    }

    #[must_use]
    pub fn ignored_fields(&self) -> &[String] {
        &self.ignored_fields
    }

    /// Representation used for differences, when one was configured.
    #[must_use]
    pub fn representation(&self) -> Option<SharedRepresentation> {
        self.representation.clone()
    }

    /// True if the field at `location` is excluded by name or pattern.
    #[must_use]
    pub fn is_ignored_field(&self, location: &FieldLocation) -> bool {
        if location.is_root() {
            return false;
        }
        if self.ignored_fields.iter().any(|path| location.matches(path)) {
            return true;
        }
        let field_path = location.field_path();
        self.ignored_fields_regexes
            .iter()
            .any(|regex| regex.is_match(&field_path))
    }

    /// True if the pair at `location` takes no part in the comparison.
    #[must_use]
    pub fn should_ignore(&self, location: &FieldLocation, actual: &Value, expected: &Value) -> bool {
        if location.is_root() {
            return false;
        }
        (self.ignore_all_actual_null_fields() && actual.is_null())
            || (self.ignore_all_expected_null_fields() && expected.is_null())
            || self.is_ignored_field(location)
    }

    /// True if sequences at `location` are compared without regard to order.
    #[must_use]
    pub fn should_ignore_collection_order(&self, location: &FieldLocation) -> bool {
        self.ignore_collection_order()
            || self
                .ignored_collection_order_in_fields
                .iter()
                .any(|path| location.matches(path))
    }

    /// Comparator for the pair at `location`; field comparators win over
    /// type comparators.
    #[must_use]
    pub fn comparator_for(
        &self,
        location: &FieldLocation,
        actual: &Value,
        expected: &Value,
    ) -> Option<&dyn Comparator> {
        if !location.is_root()
            && let Some((_, comparator)) = self
                .field_comparators
                .iter()
                .find(|(path, _)| location.matches(path))
        {
            return Some(comparator.as_ref());
        }
        let type_name = compared_type_name(actual, expected)?;
        self.type_comparators
            .iter()
            .find(|(name, _)| *name == type_name)
            .map(|(_, comparator)| comparator.as_ref())
    }

    /// Overridden error message for the pair at `location`, field messages
    /// first.
    #[must_use]
    pub fn message_for(
        &self,
        location: &FieldLocation,
        actual: &Value,
        expected: &Value,
    ) -> Option<&str> {
        if let Some((_, message)) = self
            .field_messages
            .iter()
            .find(|(path, _)| location.matches(path))
        {
            return Some(message);
        }
        let type_name = compared_type_name(actual, expected)?;
        self.type_messages
            .iter()
            .find(|(name, _)| *name == type_name)
            .map(|(_, message)| message.as_str())
    }

    /// One `- ` line per active setting.
    ///
    /// ```rust
    /// use fluent_errors::recursive::RecursiveComparisonConfiguration;
    ///
    /// let configuration = RecursiveComparisonConfiguration::builder()
    ///     .ignore_all_actual_null_fields(true)
    ///     .ignoring_fields(["id"])
    ///     .build()
    ///     .unwrap();
    /// let description = configuration.multi_line_description();
    /// assert!(description.starts_with(
    ///     "- all actual null fields were ignored in the comparison\n\
    ///      - the following fields were ignored in the comparison: id\n"
    /// ));
    /// ```
    #[must_use]
    pub fn multi_line_description(&self) -> String {
        let mut description = String::new();
        if self.ignore_all_actual_null_fields() {
            description.push_str("- all actual null fields were ignored in the comparison\n");
        }
        if self.ignore_all_expected_null_fields() {
            description.push_str("- all expected null fields were ignored in the comparison\n");
        }
        if !self.ignored_fields.is_empty() {
            description.push_str(&format!(
                "- the following fields were ignored in the comparison: {}\n",
                self.ignored_fields.join(", ")
            ));
        }
        if !self.ignored_fields_regexes.is_empty() {
            let patterns: Vec<&str> = self
                .ignored_fields_regexes
                .iter()
                .map(|regex| unanchored(regex.as_str()))
                .collect();
            description.push_str(&format!(
                "- the fields matching the following regexes were ignored in the comparison: {}\n",
                patterns.join(", ")
            ));
        }
        if self.ignore_collection_order() {
            description.push_str("- collection order was ignored in all fields in the comparison\n");
        } else if !self.ignored_collection_order_in_fields.is_empty() {
            description.push_str(&format!(
                "- collection order was ignored in the following fields in the comparison: {}\n",
                self.ignored_collection_order_in_fields.join(", ")
            ));
        }
        if self.treat_null_and_empty_iterables_as_equal() {
            description
                .push_str("- null and empty iterables were considered equal in the comparison\n");
        }
        if !self.type_comparators.is_empty() {
            description.push_str("- these types were compared with the following comparators:\n");
            describe_comparators(&mut description, &self.type_comparators);
        }
        if !self.field_comparators.is_empty() {
            description.push_str("- these fields were compared with the following comparators:\n");
            describe_comparators(&mut description, &self.field_comparators);
            if !self.type_comparators.is_empty() {
                description.push_str("- field comparators take precedence over type comparators.\n");
            }
        }
        if !self.field_messages.is_empty() {
            description.push_str("- these fields had overridden error messages:\n");
            for (path, _) in &self.field_messages {
                description.push_str(&format!("  - {path}\n"));
            }
        }
        if !self.type_messages.is_empty() {
            description.push_str("- these types had overridden error messages:\n");
            for (type_name, _) in &self.type_messages {
                description.push_str(&format!("  - {type_name}\n"));
            }
        }
        if self.strict_type_checking() {
            description.push_str(
                "- actual and expected objects and their fields were considered different when of \
                 incompatible types (i.e. expected type does not match actual's type) even if all \
                 their fields match, for example a Person instance will never match a PersonDto \
                 (call strict_type_checking(false) to change that behavior).\n",
            );
        } else {
            description.push_str(
                "- actual and expected objects and their fields were compared field by field \
                 recursively even if they were not of the same type, this allows for example to \
                 compare a Person to a PersonDto (call strict_type_checking(true) to change that \
                 behavior).\n",
            );
        }
        description
    }
}

fn describe_comparators(description: &mut String, comparators: &[(String, SharedComparator)]) {
    for (key, comparator) in comparators {
        description.push_str(&format!("  - {key} -> {}\n", comparator.description()));
    }
}

/// Type that selects type-keyed settings: actual's, or expected's when
/// actual is null.
fn compared_type_name(actual: &Value, expected: &Value) -> Option<String> {
    match (actual, expected) {
        (Value::Null, Value::Null) => None,
        (Value::Null, other) | (other, _) => Some(other.type_name()),
    }
}

fn anchored(pattern: &str) -> String {
    format!("^(?:{pattern})$")
}

fn unanchored(pattern: &str) -> &str {
    pattern
        .strip_prefix("^(?:")
        .and_then(|p| p.strip_suffix(")$"))
        .unwrap_or(pattern)
}

/// Builder for [`RecursiveComparisonConfiguration`].
#[derive(Default)]
pub struct RecursiveComparisonConfigurationBuilder {
    flags: ComparisonFlags,
    ignored_fields: Vec<String>,
    ignored_fields_patterns: Vec<String>,
    ignored_collection_order_in_fields: Vec<String>,
    field_comparators: Vec<(String, SharedComparator)>,
    type_comparators: Vec<(String, SharedComparator)>,
    field_messages: Vec<(String, String)>,
    type_messages: Vec<(String, String)>,
    representation: Option<SharedRepresentation>,
}

impl RecursiveComparisonConfigurationBuilder {
    fn flag(mut self, flag: ComparisonFlags, on: bool) -> Self {
        self.flags.set(flag, on);
        self
    }

    #[must_use]
    pub fn ignore_all_actual_null_fields(self, on: bool) -> Self {
        self.flag(ComparisonFlags::IGNORE_ALL_ACTUAL_NULL_FIELDS, on)
    }

    #[must_use]
    pub fn ignore_all_expected_null_fields(self, on: bool) -> Self {
        self.flag(ComparisonFlags::IGNORE_ALL_EXPECTED_NULL_FIELDS, on)
    }

    #[must_use]
    pub fn ignore_collection_order(self, on: bool) -> Self {
        self.flag(ComparisonFlags::IGNORE_COLLECTION_ORDER, on)
    }

    #[must_use]
    pub fn strict_type_checking(self, on: bool) -> Self {
        self.flag(ComparisonFlags::STRICT_TYPE_CHECKING, on)
    }

    #[must_use]
    pub fn treat_null_and_empty_iterables_as_equal(self, on: bool) -> Self {
        self.flag(ComparisonFlags::TREAT_NULL_AND_EMPTY_ITERABLES_AS_EQUAL, on)
    }

    /// Ignore fields by path, e.g. `"address.city"`.
    #[must_use]
    pub fn ignoring_fields<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_fields.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Ignore fields whose path fully matches one of `patterns`.
    #[must_use]
    pub fn ignoring_fields_matching_regexes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_fields_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn ignoring_collection_order_in_fields<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_collection_order_in_fields
            .extend(paths.into_iter().map(Into::into));
        self
    }

    /// Compare the fields at `paths` with `comparator`.
    #[must_use]
    pub fn with_comparator_for_fields<C, I, S>(mut self, comparator: C, paths: I) -> Self
    where
        C: Comparator + 'static,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let comparator: SharedComparator = Arc::new(comparator);
        for path in paths {
            self.field_comparators
                .push((path.into(), Arc::clone(&comparator)));
        }
        self
    }

    /// Compare every value of `type_name` with `comparator`.
    #[must_use]
    pub fn with_comparator_for_type<C>(mut self, comparator: C, type_name: impl Into<String>) -> Self
    where
        C: Comparator + 'static,
    {
        self.type_comparators
            .push((type_name.into(), Arc::new(comparator)));
        self
    }

    /// Report differences at `paths` with `message` instead of the default
    /// description.
    #[must_use]
    pub fn with_error_message_for_fields<I, S>(mut self, message: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let message = message.into();
        for path in paths {
            self.field_messages.push((path.into(), message.clone()));
        }
        self
    }

    #[must_use]
    pub fn with_error_message_for_type(
        mut self,
        message: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        self.type_messages.push((type_name.into(), message.into()));
        self
    }

    #[must_use]
    pub fn representation(mut self, representation: SharedRepresentation) -> Self {
        self.representation = Some(representation);
        self
    }

    /// Compile the field patterns and build the configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidFieldRegex`] if a pattern does not compile.
    pub fn build(self) -> Result<RecursiveComparisonConfiguration, ConfigError> {
        let ignored_fields_regexes = self
            .ignored_fields_patterns
            .iter()
            .map(|pattern| {
                Regex::new(&anchored(pattern)).map_err(|err| ConfigError::InvalidFieldRegex {
                    pattern: pattern.clone(),
                    reason: err.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RecursiveComparisonConfiguration {
            flags: self.flags,
            ignored_fields: self.ignored_fields,
            ignored_fields_regexes,
            ignored_collection_order_in_fields: self.ignored_collection_order_in_fields,
            field_comparators: self.field_comparators,
            type_comparators: self.type_comparators,
            field_messages: self.field_messages,
            type_messages: self.type_messages,
            representation: self.representation,
        })
    }
}
