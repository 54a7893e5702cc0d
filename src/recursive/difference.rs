//! Differences found by the recursive comparison.

use super::FieldLocation;
use crate::representation::Representation;
use crate::value::Value;

const TOP_LEVEL_OBJECTS: &str = "Top level actual and expected objects";

/// Renderings of an actual/expected pair, with type and identity added
/// when the plain renderings would be indistinguishable.
fn render_pair(actual: &Value, expected: &Value, representation: &dyn Representation) -> (String, String) {
    let actual_text = representation.to_string_of(actual);
    let expected_text = representation.to_string_of(expected);
    if actual_text == expected_text {
        (
            representation.unambiguous_to_string_of(actual),
            representation.unambiguous_to_string_of(expected),
        )
    } else {
        (actual_text, expected_text)
    }
}

/// Two sorted-map keys found at the same position but not equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonKeyDifference {
    pub actual_key: Value,
    pub expected_key: Value,
}

impl ComparisonKeyDifference {
    #[must_use]
    pub fn new(actual_key: impl Into<Value>, expected_key: impl Into<Value>) -> Self {
        Self {
            actual_key: actual_key.into(),
            expected_key: expected_key.into(),
        }
    }

    #[must_use]
    pub fn multi_line_description(&self, representation: &dyn Representation) -> String {
        let (actual, expected) = render_pair(&self.actual_key, &self.expected_key, representation);
        format!("map key difference:\n- actual key  : {actual}\n- expected key: {expected}")
    }
}

/// One mismatch between actual and expected at a given location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonDifference {
    location: FieldLocation,
    actual: Value,
    expected: Value,
    description: Option<String>,
    custom_message: Option<String>,
    key_difference: Option<ComparisonKeyDifference>,
}

impl ComparisonDifference {
    #[must_use]
    pub fn new(location: FieldLocation, actual: impl Into<Value>, expected: impl Into<Value>) -> Self {
        Self {
            location,
            actual: actual.into(),
            expected: expected.into(),
            description: None,
            custom_message: None,
            key_difference: None,
        }
    }

    /// Attach the reason the values could not be compared further.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the whole rendered description with `message`.
    #[must_use]
    pub fn with_custom_message(mut self, message: impl Into<String>) -> Self {
        self.custom_message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_key_difference(mut self, key_difference: ComparisonKeyDifference) -> Self {
        self.key_difference = Some(key_difference);
        self
    }

    #[must_use]
    pub fn location(&self) -> &FieldLocation {
        &self.location
    }

    #[must_use]
    pub fn concatenated_path(&self) -> String {
        self.location.concatenated_path()
    }

    #[must_use]
    pub fn actual(&self) -> &Value {
        &self.actual
    }

    #[must_use]
    pub fn expected(&self) -> &Value {
        &self.expected
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn custom_message(&self) -> Option<&str> {
        self.custom_message.as_deref()
    }

    #[must_use]
    pub fn key_difference(&self) -> Option<&ComparisonKeyDifference> {
        self.key_difference.as_ref()
    }

    /// Describe the difference over several lines.
    ///
    /// ```rust
    /// use fluent_errors::prelude::*;
    /// use fluent_errors::recursive::{ComparisonDifference, FieldLocation};
    ///
    /// let difference = ComparisonDifference::new(FieldLocation::parse("name"), "Luke", "Yoda");
    /// assert_eq!(
    ///     difference.multi_line_description(&StandardRepresentation::default()),
    ///     "field/property 'name' differ:\n- actual value  : \"Luke\"\n- expected value: \"Yoda\""
    /// );
    /// ```
    #[must_use]
    pub fn multi_line_description(&self, representation: &dyn Representation) -> String {
        if let Some(message) = &self.custom_message {
            return message.clone();
        }
        let (actual, expected) = render_pair(&self.actual, &self.expected, representation);
        let subject = if self.location.is_root() {
            TOP_LEVEL_OBJECTS.to_string()
        } else {
            format!("field/property '{}'", self.location.concatenated_path())
        };
        let mut description =
            format!("{subject} differ:\n- actual value  : {actual}\n- expected value: {expected}");
        if let Some(key_difference) = &self.key_difference {
            description.push('\n');
            description.push_str(&key_difference.multi_line_description(representation));
        }
        if let Some(reason) = &self.description {
            description.push('\n');
            description.push_str(reason);
        }
        description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::representation::StandardRepresentation;
    use crate::value::ObjectRef;

    fn repr() -> StandardRepresentation {
        StandardRepresentation::default()
    }

    #[test]
    fn test_root_difference() {
        let difference = ComparisonDifference::new(FieldLocation::root(), 1, 2);
        assert_eq!(
            difference.multi_line_description(&repr()),
            "Top level actual and expected objects differ:\n- actual value  : 1\n- expected value: 2"
        );
    }

    #[test]
    fn test_reason_on_its_own_line() {
        let difference = ComparisonDifference::new(
            FieldLocation::parse("friends"),
            Value::list(["Han"]),
            Value::list(["Han", "Leia"]),
        )
        .with_description(
            "actual and expected values are collections of different size, actual size=1 when expected size=2",
        );
        assert_eq!(
            difference.multi_line_description(&repr()),
            "field/property 'friends' differ:\n- actual value  : [\"Han\"]\n- expected value: [\"Han\", \"Leia\"]\nactual and expected values are collections of different size, actual size=1 when expected size=2"
        );
    }

    #[test]
    fn test_identical_renderings_show_type_and_identity() {
        let difference = ComparisonDifference::new(
            FieldLocation::parse("pets"),
            Value::list(["Rex"]),
            Value::set(["Rex"]),
        );
        let description = difference.multi_line_description(&repr());
        assert!(description.contains("- actual value  : [\"Rex\"] (Vec@"));
        assert!(description.contains("- expected value: [\"Rex\"] (HashSet@"));
    }

    #[test]
    fn test_distinct_objects_rendering_identically() {
        let luke = ObjectRef::new("Person").with_field("name", "Luke");
        let twin = ObjectRef::new("Person").with_field("name", "Luke");
        let difference = ComparisonDifference::new(FieldLocation::root(), luke.clone(), twin.clone());
        let description = difference.multi_line_description(&repr());
        assert!(description.contains(&format!("(Person@{:x})", luke.id())));
        assert!(description.contains(&format!("(Person@{:x})", twin.id())));
    }

    #[test]
    fn test_custom_message_replaces_description() {
        let difference = ComparisonDifference::new(FieldLocation::parse("name"), "Luke", "Yoda")
            .with_description("ignored")
            .with_custom_message("name should be Yoda");
        assert_eq!(difference.multi_line_description(&repr()), "name should be Yoda");
        assert_eq!(difference.description(), Some("ignored"));
    }

    #[test]
    fn test_key_difference() {
        let difference = ComparisonDifference::new(
            FieldLocation::parse("ranks"),
            Value::sorted_map([("a", 1)]),
            Value::sorted_map([("b", 1)]),
        )
        .with_key_difference(ComparisonKeyDifference::new("a", "b"));
        assert_eq!(
            difference.multi_line_description(&repr()),
            "field/property 'ranks' differ:\n- actual value  : {\"a\"=1}\n- expected value: {\"b\"=1}\nmap key difference:\n- actual key  : \"a\"\n- expected key: \"b\""
        );
    }
}
