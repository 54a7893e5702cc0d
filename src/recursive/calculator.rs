//! Field-by-field difference calculation.
//!
//! The traversal keeps an explicit stack of pairs still to compare instead of
//! recursing, so deep graphs cannot overflow the call stack. Children are
//! pushed in reverse so they pop, and report their differences, in
//! declaration order. Object pairs are recorded by identity when popped; a
//! pair met again (a cycle, or the same nodes reached by another path) is
//! skipped, which guarantees termination.

use std::cmp::Ordering;

use super::visited::{DualValue, VisitedDualValues};
use super::{ComparisonDifference, ComparisonKeyDifference, FieldLocation, RecursiveComparisonConfiguration};
use crate::representation::{self, SharedRepresentation};
use crate::value::{ObjectRef, SequenceKind, Value};

fn different_size(kind: &str, actual_size: usize, expected_size: usize) -> String {
    format!(
        "actual and expected values are {kind} of different size, actual size={actual_size} when expected size={expected_size}"
    )
}

fn different_kind(expected_kind: &str, actual: &Value) -> String {
    format!(
        "expected field is {expected_kind} but actual field is not ({})",
        actual.type_name()
    )
}

fn missing_fields(subject: &ObjectRef, other: &ObjectRef, missing: &[String]) -> String {
    let (subject, other) = (subject.type_name(), other.type_name());
    format!(
        "{subject} can't be compared to {other} as {other} does not declare all {subject} fields, it lacks these: [{}]",
        missing.join(", ")
    )
}

fn is_empty_iterable(value: &Value) -> bool {
    value.iterable_items().is_some_and(<[Value]>::is_empty)
}

/// Computes the differences between two value graphs.
///
/// ```rust
/// use fluent_errors::recursive::{RecursiveComparisonConfiguration, RecursiveComparisonDifferenceCalculator};
/// use fluent_errors::value::{ObjectRef, Value};
///
/// let actual = ObjectRef::new("Person").with_field("name", "Luke").with_field("age", 19);
/// let expected = ObjectRef::new("Person").with_field("name", "Luke").with_field("age", 20);
///
/// let differences = RecursiveComparisonDifferenceCalculator.determine_differences(
///     &actual.into(),
///     &expected.into(),
///     &RecursiveComparisonConfiguration::default(),
/// );
/// assert_eq!(differences.len(), 1);
/// assert_eq!(differences[0].concatenated_path(), "age");
/// assert_eq!(differences[0].actual(), &Value::from(19));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursiveComparisonDifferenceCalculator;

impl RecursiveComparisonDifferenceCalculator {
    /// Differences between `actual` and `expected`, in discovery order.
    ///
    /// Structural mismatches never fail the calculation: they are reported
    /// as differences carrying a reason.
    #[must_use]
    pub fn determine_differences(
        &self,
        actual: &Value,
        expected: &Value,
        configuration: &RecursiveComparisonConfiguration,
    ) -> Vec<ComparisonDifference> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "determine_differences",
            actual = %actual.type_name(),
            expected = %expected.type_name()
        )
        .entered();

        if configuration.strict_type_checking()
            && !actual.is_null()
            && !expected.is_null()
            && actual.type_name() != expected.type_name()
        {
            let reason = format!(
                "actual and expected are considered different since the comparison enforces strict type check and expected type {} does not match actual type {}",
                expected.type_name(),
                actual.type_name()
            );
            return vec![
                ComparisonDifference::new(FieldLocation::root(), actual.clone(), expected.clone())
                    .with_description(reason),
            ];
        }

        let differences = ComparisonState::new(configuration, VisitedDualValues::default()).run(
            DualValue::new(FieldLocation::root(), actual.clone(), expected.clone()),
        );
        log::debug!(
            "recursive comparison found {} difference(s)",
            differences.len()
        );
        differences
    }
}

/// Shorthand for [`RecursiveComparisonDifferenceCalculator::determine_differences`].
#[must_use]
pub fn determine_differences(
    actual: &Value,
    expected: &Value,
    configuration: &RecursiveComparisonConfiguration,
) -> Vec<ComparisonDifference> {
    RecursiveComparisonDifferenceCalculator.determine_differences(actual, expected, configuration)
}

struct ComparisonState<'a> {
    configuration: &'a RecursiveComparisonConfiguration,
    visited: VisitedDualValues,
    to_compare: Vec<DualValue>,
    differences: Vec<ComparisonDifference>,
}

impl<'a> ComparisonState<'a> {
    fn new(configuration: &'a RecursiveComparisonConfiguration, visited: VisitedDualValues) -> Self {
        Self {
            configuration,
            visited,
            to_compare: Vec::new(),
            differences: Vec::new(),
        }
    }

    fn run(mut self, start: DualValue) -> Vec<ComparisonDifference> {
        self.to_compare.push(start);
        while let Some(dual_value) = self.to_compare.pop() {
            if !self.visited.insert(&dual_value) {
                log::trace!("'{}' already visited", dual_value.location);
                continue;
            }
            log::trace!("comparing '{}'", dual_value.location);
            self.compare(&dual_value);
        }
        self.differences
    }

    fn representation(&self) -> SharedRepresentation {
        self.configuration
            .representation()
            .unwrap_or_else(representation::standard)
    }

    /// Queue children so the first one is compared next.
    fn register(&mut self, children: Vec<DualValue>) {
        for child in children.into_iter().rev() {
            if self
                .configuration
                .should_ignore(&child.location, &child.actual, &child.expected)
                || self.visited.contains(&child)
            {
                continue;
            }
            self.to_compare.push(child);
        }
    }

    fn add_difference(&mut self, dual_value: &DualValue, reason: Option<String>) {
        let mut difference = ComparisonDifference::new(
            dual_value.location.clone(),
            dual_value.actual.clone(),
            dual_value.expected.clone(),
        );
        if let Some(reason) = reason {
            difference = difference.with_description(reason);
        }
        self.push_difference(difference);
    }

    fn push_difference(&mut self, mut difference: ComparisonDifference) {
        if let Some(message) = self.configuration.message_for(
            difference.location(),
            difference.actual(),
            difference.expected(),
        ) {
            difference = difference.with_custom_message(message);
        }
        log::trace!("difference at '{}'", difference.location());
        self.differences.push(difference);
    }

    fn compare(&mut self, dual_value: &DualValue) {
        let (actual, expected) = (&dual_value.actual, &dual_value.expected);
        if let (Value::Object(a), Value::Object(e)) = (actual, expected)
            && a.ptr_eq(e)
        {
            return;
        }
        if actual.is_null() && expected.is_null() {
            return;
        }
        if let Some(comparator) =
            self.configuration
                .comparator_for(&dual_value.location, actual, expected)
        {
            if comparator.compare(actual, expected) != Ordering::Equal {
                self.add_difference(dual_value, None);
            }
            return;
        }
        if actual.is_null() || expected.is_null() {
            let null_matches_empty = self.configuration.treat_null_and_empty_iterables_as_equal()
                && (is_empty_iterable(actual) || is_empty_iterable(expected));
            if !null_matches_empty {
                self.add_difference(dual_value, None);
            }
            return;
        }

        let ignore_order = self
            .configuration
            .should_ignore_collection_order(&dual_value.location);
        match expected {
            Value::Array(items) if ignore_order => self.compare_unordered(dual_value, items),
            Value::Array(items) => self.compare_arrays(dual_value, items),
            Value::Sequence {
                kind: SequenceKind::Ordered,
                items,
                ..
            } if !ignore_order => self.compare_ordered(dual_value, items),
            Value::Sequence { items, .. } => self.compare_unordered(dual_value, items),
            Value::Optional(inner) => self.compare_optionals(dual_value, inner.as_deref()),
            Value::Map {
                sorted: true,
                entries,
                ..
            } => self.compare_sorted_maps(dual_value, entries),
            Value::Map { entries, .. } => self.compare_unordered_maps(dual_value, entries),
            Value::Object(object) => self.compare_objects(dual_value, object),
            _ => {
                if actual != expected {
                    self.add_difference(dual_value, None);
                }
            }
        }
    }

    fn compare_elements(&mut self, dual_value: &DualValue, actual: &[Value], expected: &[Value]) {
        let children = actual
            .iter()
            .zip(expected)
            .enumerate()
            .map(|(index, (a, e))| {
                DualValue::new(dual_value.location.index(index), a.clone(), e.clone())
            })
            .collect();
        self.register(children);
    }

    fn compare_arrays(&mut self, dual_value: &DualValue, expected: &[Value]) {
        let Value::Array(actual) = &dual_value.actual else {
            let reason = different_kind("an array", &dual_value.actual);
            self.add_difference(dual_value, Some(reason));
            return;
        };
        if actual.len() != expected.len() {
            let reason = different_size("arrays", actual.len(), expected.len());
            self.add_difference(dual_value, Some(reason));
            return;
        }
        self.compare_elements(dual_value, actual, expected);
    }

    fn compare_ordered(&mut self, dual_value: &DualValue, expected: &[Value]) {
        let Value::Sequence {
            kind: SequenceKind::Ordered,
            items: actual,
            ..
        } = &dual_value.actual
        else {
            let reason = different_kind("an ordered collection", &dual_value.actual);
            self.add_difference(dual_value, Some(reason));
            return;
        };
        if actual.len() != expected.len() {
            let reason = different_size("collections", actual.len(), expected.len());
            self.add_difference(dual_value, Some(reason));
            return;
        }
        self.compare_elements(dual_value, actual, expected);
    }

    /// Each actual element consumes the first still unmatched expected
    /// element it has no difference with.
    fn compare_unordered(&mut self, dual_value: &DualValue, expected: &[Value]) {
        let Some(actual) = dual_value.actual.iterable_items() else {
            let reason = different_kind("an iterable", &dual_value.actual);
            self.add_difference(dual_value, Some(reason));
            return;
        };
        if actual.len() != expected.len() {
            let reason = different_size("collections", actual.len(), expected.len());
            self.add_difference(dual_value, Some(reason));
            return;
        }
        let mut unmatched: Vec<&Value> = expected.iter().collect();
        for element in actual {
            if let Some(position) = unmatched
                .iter()
                .position(|candidate| self.matches(&dual_value.location, element, candidate))
            {
                unmatched.remove(position);
            }
        }
        if !unmatched.is_empty() {
            let unmatched = Value::list(unmatched.into_iter().cloned());
            let reason = format!(
                "The following expected elements were not matched in the actual {}:\n  {}",
                dual_value.actual.type_name(),
                self.representation().to_string_of(&unmatched)
            );
            self.add_difference(dual_value, Some(reason));
        }
    }

    /// Trial comparison on a copy of the visited pairs, so failed trials
    /// leave no trace.
    fn matches(&self, location: &FieldLocation, actual: &Value, expected: &Value) -> bool {
        ComparisonState::new(self.configuration, self.visited.clone())
            .run(DualValue::new(location.clone(), actual.clone(), expected.clone()))
            .is_empty()
    }

    fn compare_optionals(&mut self, dual_value: &DualValue, expected: Option<&Value>) {
        let Value::Optional(actual) = &dual_value.actual else {
            let reason = different_kind("an Option", &dual_value.actual);
            self.add_difference(dual_value, Some(reason));
            return;
        };
        match (actual.as_deref(), expected) {
            (Some(a), Some(e)) => {
                let child = DualValue::new(dual_value.location.field("value"), a.clone(), e.clone());
                self.register(vec![child]);
            }
            (None, None) => {}
            _ => self.add_difference(dual_value, None),
        }
    }

    fn key_location(&self, parent: &FieldLocation, key: &Value) -> FieldLocation {
        match key.as_str() {
            Some(name) => parent.field(name),
            None => parent.field(self.representation().to_string_of(key)),
        }
    }

    /// Entries whose key, addressed as a field, is not ignored.
    fn comparable_entries<'v>(
        &self,
        parent: &FieldLocation,
        entries: &'v [(Value, Value)],
    ) -> Vec<&'v (Value, Value)> {
        entries
            .iter()
            .filter(|(key, _)| {
                key.is_null() || !self.configuration.is_ignored_field(&self.key_location(parent, key))
            })
            .collect()
    }

    fn render_keys<'v>(&self, keys: impl IntoIterator<Item = &'v Value>) -> String {
        let keys: Vec<Value> = keys.into_iter().cloned().collect();
        self.representation().to_string_of(&Value::list(keys))
    }

    fn compare_sorted_maps(&mut self, dual_value: &DualValue, expected: &[(Value, Value)]) {
        let Value::Map {
            sorted: true,
            entries: actual,
            ..
        } = &dual_value.actual
        else {
            let reason = different_kind("a sorted map", &dual_value.actual);
            self.add_difference(dual_value, Some(reason));
            return;
        };
        let location = &dual_value.location;
        let actual = self.comparable_entries(location, actual);
        let expected = self.comparable_entries(location, expected);
        if actual.len() != expected.len() {
            let reason = different_size("sorted maps", actual.len(), expected.len());
            self.add_difference(dual_value, Some(reason));
            return;
        }
        let mut children = Vec::new();
        for ((actual_key, actual_value), (expected_key, expected_value)) in actual.into_iter().zip(expected) {
            if actual_key == expected_key {
                children.push(DualValue::new(
                    self.key_location(location, actual_key),
                    actual_value.clone(),
                    expected_value.clone(),
                ));
            } else {
                let difference = ComparisonDifference::new(
                    location.clone(),
                    dual_value.actual.clone(),
                    dual_value.expected.clone(),
                )
                .with_key_difference(ComparisonKeyDifference::new(
                    actual_key.clone(),
                    expected_key.clone(),
                ));
                self.push_difference(difference);
            }
        }
        self.register(children);
    }

    fn compare_unordered_maps(&mut self, dual_value: &DualValue, expected: &[(Value, Value)]) {
        let Value::Map {
            entries: actual, ..
        } = &dual_value.actual
        else {
            let reason = different_kind("a map", &dual_value.actual);
            self.add_difference(dual_value, Some(reason));
            return;
        };
        let location = &dual_value.location;
        let actual = self.comparable_entries(location, actual);
        let expected = self.comparable_entries(location, expected);

        let mut reasons = Vec::new();
        if actual.len() != expected.len() {
            reasons.push(different_size("maps", actual.len(), expected.len()));
        }
        let not_in_actual: Vec<&Value> = expected
            .iter()
            .map(|(key, _)| key)
            .filter(|key| !actual.iter().any(|(k, _)| k == *key))
            .collect();
        let not_in_expected: Vec<&Value> = actual
            .iter()
            .map(|(key, _)| key)
            .filter(|key| !expected.iter().any(|(k, _)| k == *key))
            .collect();
        if !not_in_actual.is_empty() {
            reasons.push(format!(
                "The following keys were not found in the actual map value:\n  {}",
                self.render_keys(not_in_actual)
            ));
        }
        if !not_in_expected.is_empty() {
            reasons.push(format!(
                "The following keys were present in the actual map value, but not in the expected map value:\n  {}",
                self.render_keys(not_in_expected)
            ));
        }
        if !reasons.is_empty() {
            self.add_difference(dual_value, Some(reasons.join("\n")));
            return;
        }

        let children = actual
            .into_iter()
            .filter_map(|(key, actual_value)| {
                let (_, expected_value) = expected.iter().find(|(k, _)| k == key)?;
                Some(DualValue::new(
                    self.key_location(location, key),
                    actual_value.clone(),
                    expected_value.clone(),
                ))
            })
            .collect();
        self.register(children);
    }

    fn compare_objects(&mut self, dual_value: &DualValue, expected: &ObjectRef) {
        let Value::Object(actual) = &dual_value.actual else {
            self.add_difference(dual_value, None);
            return;
        };
        if self.configuration.strict_type_checking() && actual.type_name() != expected.type_name() {
            let reason = format!(
                "the fields are considered different since the comparison enforces strict type check and {} does not match {}",
                expected.type_name(),
                actual.type_name()
            );
            self.add_difference(dual_value, Some(reason));
            return;
        }

        let location = &dual_value.location;
        let actual_fields: Vec<(String, Value)> = actual
            .fields()
            .into_iter()
            .filter(|(name, _)| !self.configuration.is_ignored_field(&location.field(name)))
            .collect();
        let expected_names = expected.field_names();

        let lacking_in_expected: Vec<String> = actual_fields
            .iter()
            .filter(|(name, _)| !expected_names.contains(name))
            .map(|(name, _)| name.clone())
            .collect();
        if !lacking_in_expected.is_empty() {
            let reason = missing_fields(actual, expected, &lacking_in_expected);
            self.add_difference(dual_value, Some(reason));
            return;
        }
        let lacking_in_actual: Vec<String> = expected
            .fields()
            .into_iter()
            .filter(|(name, value)| {
                !(actual_fields.iter().any(|(n, _)| n == name)
                    || self.configuration.is_ignored_field(&location.field(name))
                    || (value.is_null() && self.configuration.ignore_all_expected_null_fields()))
            })
            .map(|(name, _)| name)
            .collect();
        if !lacking_in_actual.is_empty() {
            let reason = missing_fields(expected, actual, &lacking_in_actual);
            self.add_difference(dual_value, Some(reason));
            return;
        }

        let children = actual_fields
            .into_iter()
            .map(|(name, actual_value)| {
                let expected_value = expected.field(&name).unwrap_or(Value::Null);
                DualValue::new(location.field(name), actual_value, expected_value)
            })
            .collect();
        self.register(children);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::CaseInsensitiveStringComparator;

    fn person(first: impl Into<Value>, last: impl Into<Value>) -> ObjectRef {
        ObjectRef::new("Person")
            .with_field("first", first)
            .with_field("last", last)
    }

    fn differences(
        actual: impl Into<Value>,
        expected: impl Into<Value>,
        configuration: &RecursiveComparisonConfiguration,
    ) -> Vec<ComparisonDifference> {
        determine_differences(&actual.into(), &expected.into(), configuration)
    }

    fn paths(differences: &[ComparisonDifference]) -> Vec<String> {
        differences
            .iter()
            .map(ComparisonDifference::concatenated_path)
            .collect()
    }

    fn default_config() -> RecursiveComparisonConfiguration {
        RecursiveComparisonConfiguration::default()
    }

    // =========================================================================
    // Objects
    // =========================================================================

    #[test]
    fn test_equal_graphs_have_no_difference() {
        let found = differences(person("Luke", "Skywalker"), person("Luke", "Skywalker"), &default_config());
        assert!(found.is_empty());
    }

    #[test]
    fn test_null_expected_field_with_actual_nulls_ignored() {
        let configuration = RecursiveComparisonConfiguration::builder()
            .ignore_all_actual_null_fields(true)
            .build()
            .unwrap();
        let found = differences(person("Magic", "Johnson"), person(Value::Null, "Johnson"), &configuration);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].concatenated_path(), "first");
        assert_eq!(found[0].actual(), &Value::from("Magic"));
        assert_eq!(found[0].expected(), &Value::Null);
        assert_eq!(found[0].description(), None);
    }

    #[test]
    fn test_null_actual_field_is_ignored() {
        let configuration = RecursiveComparisonConfiguration::builder()
            .ignore_all_actual_null_fields(true)
            .build()
            .unwrap();
        assert!(differences(person(Value::Null, "Johnson"), person("Magic", "Johnson"), &configuration).is_empty());
        assert_eq!(
            paths(&differences(person(Value::Null, "Johnson"), person("Magic", "Johnson"), &default_config())),
            vec!["first"]
        );
    }

    #[test]
    fn test_differences_in_declaration_order() {
        let actual = ObjectRef::new("Person")
            .with_field("name", "Luke")
            .with_field("home", ObjectRef::new("Home").with_field("city", "Tatooine").with_field("number", 1))
            .with_field("age", 19);
        let expected = ObjectRef::new("Person")
            .with_field("name", "Leia")
            .with_field("home", ObjectRef::new("Home").with_field("city", "Alderaan").with_field("number", 2))
            .with_field("age", 20);
        assert_eq!(
            paths(&differences(actual, expected, &default_config())),
            vec!["name", "home.city", "home.number", "age"]
        );
    }

    #[test]
    fn test_ignored_fields_are_skipped() {
        let configuration = RecursiveComparisonConfiguration::builder()
            .ignoring_fields(["first"])
            .build()
            .unwrap();
        assert!(differences(person("Luke", "Skywalker"), person("Leia", "Skywalker"), &configuration).is_empty());
    }

    #[test]
    fn test_expected_lacking_actual_fields() {
        let actual = ObjectRef::new("Person")
            .with_field("name", "Luke")
            .with_field("age", 19);
        let expected = ObjectRef::new("PersonDto").with_field("name", "Luke");
        let found = differences(actual, expected, &default_config());
        assert_eq!(found.len(), 1);
        assert!(found[0].location().is_root());
        assert_eq!(
            found[0].description(),
            Some("Person can't be compared to PersonDto as PersonDto does not declare all Person fields, it lacks these: [age]")
        );
    }

    #[test]
    fn test_actual_lacking_expected_fields() {
        let actual = ObjectRef::new("PersonDto").with_field("name", "Luke");
        let expected = ObjectRef::new("Person")
            .with_field("name", "Luke")
            .with_field("age", 19);
        let found = differences(actual, expected, &default_config());
        assert_eq!(
            found[0].description(),
            Some("Person can't be compared to PersonDto as PersonDto does not declare all Person fields, it lacks these: [age]")
        );
    }

    #[test]
    fn test_lenient_type_checking_compares_fields() {
        let actual = ObjectRef::new("Person").with_field("name", "Luke");
        let expected = ObjectRef::new("PersonDto").with_field("name", "Luke");
        assert!(differences(actual, expected, &default_config()).is_empty());
    }

    #[test]
    fn test_strict_type_checking() {
        let configuration = RecursiveComparisonConfiguration::builder()
            .strict_type_checking(true)
            .build()
            .unwrap();
        let root = differences(
            ObjectRef::new("Person").with_field("name", "Luke"),
            ObjectRef::new("PersonDto").with_field("name", "Luke"),
            &configuration,
        );
        assert_eq!(
            root[0].description(),
            Some("actual and expected are considered different since the comparison enforces strict type check and expected type PersonDto does not match actual type Person")
        );

        let actual = ObjectRef::new("Person").with_field("home", ObjectRef::new("Home"));
        let expected = ObjectRef::new("Person").with_field("home", ObjectRef::new("HomeDto"));
        let nested = differences(actual, expected, &configuration);
        assert_eq!(paths(&nested), vec!["home"]);
        assert_eq!(
            nested[0].description(),
            Some("the fields are considered different since the comparison enforces strict type check and HomeDto does not match Home")
        );
    }

    // =========================================================================
    // Cycles
    // =========================================================================

    #[test]
    fn test_self_reference_terminates() {
        let actual = ObjectRef::new("Node").with_field("id", 1);
        actual.set_field("next", actual.clone());
        let expected = ObjectRef::new("Node").with_field("id", 1);
        expected.set_field("next", expected.clone());
        assert!(differences(actual, expected, &default_config()).is_empty());
    }

    #[test]
    fn test_indirect_cycle_reports_difference_once() {
        let a1 = ObjectRef::new("Node").with_field("id", 1);
        let b1 = ObjectRef::new("Node").with_field("id", 2).with_field("next", a1.clone());
        a1.set_field("next", b1);
        let a2 = ObjectRef::new("Node").with_field("id", 1);
        let b2 = ObjectRef::new("Node").with_field("id", 3).with_field("next", a2.clone());
        a2.set_field("next", b2);
        assert_eq!(paths(&differences(a1, a2, &default_config())), vec!["next.id"]);
    }

    // =========================================================================
    // Collections
    // =========================================================================

    #[test]
    fn test_ordered_elements_pairwise() {
        let found = differences(Value::list([1, 2, 3]), Value::list([1, 5, 3]), &default_config());
        assert_eq!(paths(&found), vec!["[1]"]);
        assert_eq!(found[0].actual(), &Value::from(2));
    }

    #[test]
    fn test_nested_element_paths() {
        let actual = ObjectRef::new("Team").with_field("members", Value::list([person("Luke", "S"), person("Han", "S")]));
        let expected = ObjectRef::new("Team").with_field("members", Value::list([person("Luke", "S"), person("Han", "Solo")]));
        assert_eq!(paths(&differences(actual, expected, &default_config())), vec!["members[1].last"]);
    }

    #[test]
    fn test_collection_size_mismatch() {
        let found = differences(Value::list([1]), Value::list([1, 2]), &default_config());
        assert_eq!(
            found[0].description(),
            Some("actual and expected values are collections of different size, actual size=1 when expected size=2")
        );
        let found = differences(Value::array([1]), Value::array([1, 2]), &default_config());
        assert_eq!(
            found[0].description(),
            Some("actual and expected values are arrays of different size, actual size=1 when expected size=2")
        );
    }

    #[test]
    fn test_ordered_expected_with_unordered_actual() {
        let found = differences(Value::set([1]), Value::list([1]), &default_config());
        assert_eq!(
            found[0].description(),
            Some("expected field is an ordered collection but actual field is not (HashSet)")
        );
    }

    #[test]
    fn test_unordered_best_match() {
        assert!(differences(Value::set([1, 2, 3]), Value::set([3, 1, 2]), &default_config()).is_empty());

        let found = differences(Value::set([1, 2, 3]), Value::set([3, 1, 4]), &default_config());
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].description(),
            Some("The following expected elements were not matched in the actual HashSet:\n  [4]")
        );
    }

    #[test]
    fn test_ignore_collection_order() {
        let configuration = RecursiveComparisonConfiguration::builder()
            .ignore_collection_order(true)
            .build()
            .unwrap();
        let actual = Value::list([person("Luke", "S"), person("Han", "S")]);
        let expected = Value::list([person("Han", "S"), person("Luke", "S")]);
        assert!(differences(actual.clone(), expected.clone(), &configuration).is_empty());
        assert_eq!(
            paths(&differences(actual, expected, &default_config())),
            vec!["[0].first", "[1].first"]
        );
    }

    #[test]
    fn test_null_and_empty_iterables() {
        let configuration = RecursiveComparisonConfiguration::builder()
            .treat_null_and_empty_iterables_as_equal(true)
            .build()
            .unwrap();
        let actual = ObjectRef::new("Team").with_field("members", Value::Null);
        let expected = ObjectRef::new("Team").with_field("members", Value::list(Vec::<Value>::new()));
        assert!(differences(actual.clone(), expected.clone(), &configuration).is_empty());
        assert_eq!(paths(&differences(actual, expected, &default_config())), vec!["members"]);
    }

    // =========================================================================
    // Maps and optionals
    // =========================================================================

    #[test]
    fn test_unordered_map_values_by_key() {
        let found = differences(
            Value::map([("a", 1), ("b", 2)]),
            Value::map([("b", 3), ("a", 1)]),
            &default_config(),
        );
        assert_eq!(paths(&found), vec!["b"]);

        let found = differences(Value::map([("a", 1)]), Value::map([("c", 1)]), &default_config());
        assert!(found[0].location().is_root());
    }

    #[test]
    fn test_sorted_map_key_difference() {
        let found = differences(
            Value::sorted_map([("a", 1), ("b", 2)]),
            Value::sorted_map([("a", 1), ("c", 2)]),
            &default_config(),
        );
        assert_eq!(found.len(), 1);
        let key_difference = found[0].key_difference().cloned();
        assert_eq!(key_difference, Some(ComparisonKeyDifference::new("b", "c")));
    }

    #[test]
    fn test_map_key_mismatch_is_explained() {
        let found = differences(
            Value::map([("a", 1), ("b", 2)]),
            Value::map([("a", 1), ("c", 2)]),
            &default_config(),
        );
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].description(),
            Some(
                "The following keys were not found in the actual map value:\n  [\"c\"]\nThe following keys were present in the actual map value, but not in the expected map value:\n  [\"b\"]"
            )
        );
    }

    #[test]
    fn test_map_size_difference_lists_missing_keys() {
        let found = differences(
            Value::map([("a", 1)]),
            Value::map([("a", 1), ("c", 3), ("d", 4)]),
            &default_config(),
        );
        assert_eq!(
            found[0].description(),
            Some(
                "actual and expected values are maps of different size, actual size=1 when expected size=3\nThe following keys were not found in the actual map value:\n  [\"c\", \"d\"]"
            )
        );

        let found = differences(Value::map([("a", 1), ("e", 5)]), Value::map([("a", 1)]), &default_config());
        assert!(found[0].description().is_some_and(|reason| reason.ends_with(
            "The following keys were present in the actual map value, but not in the expected map value:\n  [\"e\"]"
        )));
    }

    #[test]
    fn test_ignored_map_keys_are_dropped() {
        let holder = |map: Value| ObjectRef::new("Holder").with_field("map", map);
        let configuration = RecursiveComparisonConfiguration::builder()
            .ignoring_fields(["map.secret"])
            .build()
            .unwrap();
        let found = differences(
            holder(Value::map([("a", 1), ("secret", 2)])),
            holder(Value::map([("a", 1)])),
            &configuration,
        );
        assert!(found.is_empty());

        let found = differences(
            holder(Value::sorted_map([("a", 1), ("secret", 2)])),
            holder(Value::sorted_map([("a", 2), ("secret", 3)])),
            &configuration,
        );
        assert_eq!(paths(&found), vec!["map.a"]);
    }

    #[test]
    fn test_map_keys_ignored_by_regex() {
        let configuration = RecursiveComparisonConfiguration::builder()
            .ignoring_fields_matching_regexes(["tmp_.*"])
            .build()
            .unwrap();
        let found = differences(
            Value::map([("id", 1), ("tmp_cache", 9)]),
            Value::map([("id", 1)]),
            &configuration,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_optionals() {
        assert!(differences(Value::some(1), Value::some(1), &default_config()).is_empty());
        assert!(differences(Value::none(), Value::none(), &default_config()).is_empty());
        assert_eq!(paths(&differences(Value::some(1), Value::some(2), &default_config())), vec!["value"]);
        assert!(differences(Value::some(1), Value::none(), &default_config())[0].location().is_root());
    }

    // =========================================================================
    // Comparators and messages
    // =========================================================================

    #[test]
    fn test_field_comparator() {
        let configuration = RecursiveComparisonConfiguration::builder()
            .with_comparator_for_fields(CaseInsensitiveStringComparator, ["first"])
            .build()
            .unwrap();
        assert!(differences(person("LUKE", "S"), person("luke", "S"), &configuration).is_empty());
        assert_eq!(paths(&differences(person("Luke", "s"), person("Luke", "S"), &configuration)), vec!["last"]);
    }

    #[test]
    fn test_type_comparator() {
        let configuration = RecursiveComparisonConfiguration::builder()
            .with_comparator_for_type(CaseInsensitiveStringComparator, "String")
            .build()
            .unwrap();
        assert!(differences(person("LUKE", "S"), person("luke", "s"), &configuration).is_empty());
    }

    #[test]
    fn test_custom_message_attached() {
        let configuration = RecursiveComparisonConfiguration::builder()
            .with_error_message_for_fields("first names differ", ["first"])
            .build()
            .unwrap();
        let found = differences(person("Luke", "S"), person("Leia", "S"), &configuration);
        assert_eq!(found[0].custom_message(), Some("first names differ"));
    }

    #[test]
    fn test_scalars_at_root() {
        assert!(differences(1, 1, &default_config()).is_empty());
        let found = differences(1, 2, &default_config());
        assert!(found[0].location().is_root());
        assert_eq!(differences(Value::Int(1), Value::Long(1), &default_config()).len(), 1);
    }
}
