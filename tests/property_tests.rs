//! Property-based tests for fluent_errors.
//!
//! Uses proptest to check invariants of message construction over generated
//! inputs.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use proptest::prelude::*;

use fluent_errors::description::format_description;
use fluent_errors::error::{AssertionError, multiple_failures_message, soft_assertions_message};
use fluent_errors::message::{MessageArg, MessageFormatter};
use fluent_errors::prelude::*;
use fluent_errors::recursive::determine_differences;

// ============================================================================
// Custom Strategies
// ============================================================================

/// Text likely to contain format directives.
fn percent_text() -> impl Strategy<Value = String> {
    "([a-z ]|%|%s|%n|%d|%%){0,12}"
}

fn failure_messages() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,10}", 0..8)
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// ============================================================================
// Interpolation
// ============================================================================

proptest! {
    #[test]
    fn interpolated_text_is_preserved(text in percent_text()) {
        let message = MessageFormatter
            .format(None, &StandardRepresentation::default(), "<%s>", &[MessageArg::text(text.clone())])
            .unwrap();
        prop_assert_eq!(message, format!("<{text}>"));
    }

    #[test]
    fn interpolated_strings_keep_every_percent(text in percent_text()) {
        let factory = ErrorMessageFactory::new("%nvalue: %s", [MessageArg::value(text.as_str())]).unwrap();
        let message = factory.create(None, &StandardRepresentation::default());
        prop_assert_eq!(message.matches('%').count(), text.matches('%').count());
        prop_assert_eq!(message, format!("\nvalue: \"{text}\""));
    }

    #[test]
    fn description_prefixes_message(label in "[a-zA-Z0-9 %]{0,16}", text in percent_text()) {
        let description = Description::text(label);
        let message = MessageFormatter
            .format(Some(&description), &StandardRepresentation::default(), "%s", &[MessageArg::text(text.clone())])
            .unwrap();
        let prefix = format_description(Some(&description));
        prop_assert!(message.starts_with(&prefix));
        prop_assert_eq!(&message[prefix.len()..], text.as_str());
    }
}

// ============================================================================
// Factory equality
// ============================================================================

proptest! {
    #[test]
    fn factory_equality_follows_template_and_arguments(
        a in "[a-z]{0,6}",
        b in "[a-z]{0,6}",
        x in any::<i32>(),
        y in any::<i32>(),
    ) {
        let first = ErrorMessageFactory::new(format!("{a} %s"), [MessageArg::value(x)]).unwrap();
        let second = ErrorMessageFactory::new(format!("{b} %s"), [MessageArg::value(y)]).unwrap();
        let copy = first.clone();

        prop_assert_eq!(&first, &copy);
        prop_assert_eq!(hash_of(&first), hash_of(&copy));
        prop_assert_eq!(first == second, a == b && x == y);
        prop_assert_eq!(first == second, second == first);
        if first == second {
            prop_assert_eq!(hash_of(&first), hash_of(&second));
        }
    }
}

// ============================================================================
// Aggregation
// ============================================================================

proptest! {
    #[test]
    fn aggregate_reports_every_failure_in_order(messages in failure_messages()) {
        let failures: Vec<AssertionError> = messages.iter().map(AssertionError::new).collect();

        let soft = soft_assertions_message(&failures);
        let mut position = 0;
        for (i, message) in messages.iter().enumerate() {
            let block = format!("{}) {message}\n", i + 1);
            let found = soft[position..].find(&block);
            prop_assert!(found.is_some());
            position += found.unwrap_or_default() + block.len();
        }

        if !messages.is_empty() {
            let host = multiple_failures_message("[d]", &failures);
            let unit = if messages.len() == 1 { "failure" } else { "failures" };
            let header = format!("[d] ({} {unit})", messages.len());
            prop_assert!(host.starts_with(&header));
            prop_assert_eq!(host.matches("\n\t").count(), messages.len());
        }
    }
}

// ============================================================================
// Recursive comparison
// ============================================================================

proptest! {
    #[test]
    fn graph_equals_its_structural_copy(values in prop::collection::vec(any::<i32>(), 0..6)) {
        let build = || {
            let node = ObjectRef::new("Node").with_field("values", Value::list(values.clone()));
            node.set_field("me", node.clone());
            Value::from(node)
        };
        let differences = determine_differences(&build(), &build(), &RecursiveComparisonConfiguration::default());
        prop_assert!(differences.is_empty());
    }

    #[test]
    fn one_difference_per_changed_element(values in prop::collection::vec(any::<i16>(), 1..8), index in any::<prop::sample::Index>()) {
        let changed = index.index(values.len());
        let mut other = values.clone();
        other[changed] = other[changed].wrapping_add(1);
        let differences = determine_differences(
            &Value::list(values),
            &Value::list(other),
            &RecursiveComparisonConfiguration::default(),
        );
        prop_assert_eq!(differences.len(), 1);
        prop_assert_eq!(differences[0].concatenated_path(), format!("[{changed}]"));
    }
}
