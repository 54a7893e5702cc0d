//! Comparison strategies: natural equality or a caller-supplied comparator.
//!
//! Every message that depends on an equality notion appends the strategy's
//! clause, so a failure is never misread as using natural equality when a
//! comparator was in play:
//!
//! ```rust
//! use fluent_errors::comparison::{CaseInsensitiveStringComparator, ComparisonStrategy};
//! use fluent_errors::value::Value;
//!
//! let strategy = ComparisonStrategy::comparator(CaseInsensitiveStringComparator);
//! assert!(strategy.are_equal(&Value::from("YODA"), &Value::from("yoda")));
//! assert_eq!(
//!     strategy.as_text(),
//!     "when comparing values using CaseInsensitiveStringComparator"
//! );
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::value::Value;

/// A total ordering over values with a display name.
pub trait Comparator: Send + Sync {
    /// Compare two values; `Equal` means "deemed equal" for the strategy.
    fn compare(&self, a: &Value, b: &Value) -> Ordering;

    /// Name shown in the "when comparing values using ..." clause.
    fn description(&self) -> String;
}

/// Natural ordering of values.
///
/// Integers compare numerically across widths, floats by total order, strings
/// and chars lexicographically. Values of unrelated kinds fall back to their
/// rendered text so the ordering stays total.
#[must_use]
pub fn natural_order(a: &Value, b: &Value) -> Ordering {
    if let (Some(x), Some(y)) = (integer_of(a), integer_of(b)) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (float_of(a), float_of(b)) {
        return x.total_cmp(&y);
    }
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => x.cmp(y),
        (Value::Char(x), Value::Char(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ if a == b => Ordering::Equal,
        _ => a.sort_key().cmp(&b.sort_key()),
    }
}

fn integer_of(v: &Value) -> Option<i64> {
    match v {
        Value::Byte(x) => Some(i64::from(*x)),
        Value::Short(x) => Some(i64::from(*x)),
        Value::Int(x) => Some(i64::from(*x)),
        Value::Long(x) => Some(*x),
        _ => None,
    }
}

#[allow(clippy::cast_precision_loss)]
fn float_of(v: &Value) -> Option<f64> {
    match v {
        Value::Float(x) => Some(f64::from(*x)),
        Value::Double(x) => Some(*x),
        other => integer_of(other).map(|i| i as f64),
    }
}

// ============================================================================
// Built-in comparators
// ============================================================================

/// Compares strings ignoring case; other values use natural ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseInsensitiveStringComparator;

impl Comparator for CaseInsensitiveStringComparator {
    fn compare(&self, a: &Value, b: &Value) -> Ordering {
        match (a, b) {
            (Value::Str(x), Value::Str(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
            (Value::Char(x), Value::Char(y)) => x
                .to_lowercase()
                .collect::<String>()
                .cmp(&y.to_lowercase().collect::<String>()),
            _ => natural_order(a, b),
        }
    }

    fn description(&self) -> String {
        "CaseInsensitiveStringComparator".to_string()
    }
}

/// Compares numbers by absolute value.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsValueComparator;

impl Comparator for AbsValueComparator {
    fn compare(&self, a: &Value, b: &Value) -> Ordering {
        if let (Some(x), Some(y)) = (integer_of(a), integer_of(b)) {
            return x.unsigned_abs().cmp(&y.unsigned_abs());
        }
        match (float_of(a), float_of(b)) {
            (Some(x), Some(y)) => x.abs().total_cmp(&y.abs()),
            _ => natural_order(a, b),
        }
    }

    fn description(&self) -> String {
        "AbsValueComparator".to_string()
    }
}

/// A comparator built from a closure and a display name.
pub struct FnComparator<F> {
    name: String,
    compare: F,
}

impl<F> FnComparator<F>
where
    F: Fn(&Value, &Value) -> Ordering + Send + Sync,
{
    #[must_use]
    pub fn new(name: impl Into<String>, compare: F) -> Self {
        Self {
            name: name.into(),
            compare,
        }
    }
}

impl<F> Comparator for FnComparator<F>
where
    F: Fn(&Value, &Value) -> Ordering + Send + Sync,
{
    fn compare(&self, a: &Value, b: &Value) -> Ordering {
        (self.compare)(a, b)
    }

    fn description(&self) -> String {
        self.name.clone()
    }
}

impl<F> fmt::Debug for FnComparator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnComparator").field("name", &self.name).finish()
    }
}

// ============================================================================
// Strategy
// ============================================================================

/// How an assertion decides that two values are equal.
#[derive(Clone, Default)]
pub enum ComparisonStrategy {
    /// Natural equality and ordering.
    #[default]
    Standard,
    /// Equality and ordering delegated to a comparator.
    ComparatorBased {
        comparator: Arc<dyn Comparator>,
        /// Explicit label, shown quoted instead of the comparator's own name.
        description: Option<String>,
    },
}

impl ComparisonStrategy {
    /// Strategy wrapping `comparator`.
    #[must_use]
    pub fn comparator(comparator: impl Comparator + 'static) -> Self {
        Self::ComparatorBased {
            comparator: Arc::new(comparator),
            description: None,
        }
    }

    /// Strategy wrapping `comparator`, displayed as `'description'`.
    #[must_use]
    pub fn described_comparator(
        comparator: impl Comparator + 'static,
        description: impl Into<String>,
    ) -> Self {
        Self::ComparatorBased {
            comparator: Arc::new(comparator),
            description: Some(description.into()),
        }
    }

    #[must_use]
    pub fn is_standard(&self) -> bool {
        matches!(self, Self::Standard)
    }

    /// Display name of the comparator, quoted when explicitly described.
    #[must_use]
    pub fn comparator_description(&self) -> Option<String> {
        match self {
            Self::Standard => None,
            Self::ComparatorBased {
                description: Some(description),
                ..
            } => Some(format!("'{description}'")),
            Self::ComparatorBased { comparator, .. } => Some(comparator.description()),
        }
    }

    /// The message clause disclosing the comparator; empty for standard.
    #[must_use]
    pub fn as_text(&self) -> String {
        self.comparator_description()
            .map(|name| format!("when comparing values using {name}"))
            .unwrap_or_default()
    }

    fn order(&self, a: &Value, b: &Value) -> Ordering {
        match self {
            Self::Standard => natural_order(a, b),
            Self::ComparatorBased { comparator, .. } => comparator.compare(a, b),
        }
    }

    #[must_use]
    pub fn are_equal(&self, actual: &Value, other: &Value) -> bool {
        match self {
            Self::Standard => actual == other,
            Self::ComparatorBased { comparator, .. } => {
                comparator.compare(actual, other) == Ordering::Equal
            }
        }
    }

    #[must_use]
    pub fn is_greater_than(&self, actual: &Value, other: &Value) -> bool {
        self.order(actual, other) == Ordering::Greater
    }

    #[must_use]
    pub fn is_less_than(&self, actual: &Value, other: &Value) -> bool {
        self.order(actual, other) == Ordering::Less
    }

    #[must_use]
    pub fn is_greater_than_or_equal_to(&self, actual: &Value, other: &Value) -> bool {
        !self.is_less_than(actual, other)
    }

    #[must_use]
    pub fn is_less_than_or_equal_to(&self, actual: &Value, other: &Value) -> bool {
        !self.is_greater_than(actual, other)
    }

    #[must_use]
    pub fn iterable_contains(&self, items: &[Value], value: &Value) -> bool {
        items.iter().any(|item| self.are_equal(item, value))
    }

    /// Remove every element deemed equal to `value`.
    pub fn iterable_remove(&self, items: &mut Vec<Value>, value: &Value) {
        items.retain(|item| !self.are_equal(item, value));
    }

    /// Remove the first element deemed equal to `value`.
    pub fn iterable_remove_first(&self, items: &mut Vec<Value>, value: &Value) {
        if let Some(index) = items.iter().position(|item| self.are_equal(item, value)) {
            items.remove(index);
        }
    }

    /// Distinct elements seen more than once, in order of first repetition.
    #[must_use]
    pub fn duplicates_from(&self, items: &[Value]) -> Vec<Value> {
        let mut seen: Vec<&Value> = Vec::new();
        let mut duplicates: Vec<Value> = Vec::new();
        for item in items {
            if seen.iter().any(|s| self.are_equal(s, item)) {
                if !self.iterable_contains(&duplicates, item) {
                    duplicates.push(item.clone());
                }
            } else {
                seen.push(item);
            }
        }
        duplicates
    }

    #[must_use]
    pub fn string_starts_with(&self, string: &str, prefix: &str) -> bool {
        match self {
            Self::Standard => string.starts_with(prefix),
            Self::ComparatorBased { .. } => {
                let n = prefix.chars().count();
                string.chars().count() >= n
                    && self.strings_equal(&string.chars().take(n).collect::<String>(), prefix)
            }
        }
    }

    #[must_use]
    pub fn string_ends_with(&self, string: &str, suffix: &str) -> bool {
        match self {
            Self::Standard => string.ends_with(suffix),
            Self::ComparatorBased { .. } => {
                let total = string.chars().count();
                let n = suffix.chars().count();
                total >= n
                    && self.strings_equal(&string.chars().skip(total - n).collect::<String>(), suffix)
            }
        }
    }

    #[must_use]
    pub fn string_contains(&self, string: &str, sequence: &str) -> bool {
        match self {
            Self::Standard => string.contains(sequence),
            Self::ComparatorBased { .. } => self.count_occurrences(string, sequence) > 0,
        }
    }

    /// Count non-overlapping occurrences of `sequence` in `string`.
    #[must_use]
    pub fn count_occurrences(&self, string: &str, sequence: &str) -> usize {
        if sequence.is_empty() {
            return 0;
        }
        if self.is_standard() {
            return string.matches(sequence).count();
        }
        let haystack: Vec<char> = string.chars().collect();
        let width = sequence.chars().count();
        let mut count = 0;
        let mut start = 0;
        while start + width <= haystack.len() {
            let window: String = haystack[start..start + width].iter().collect();
            if self.strings_equal(&window, sequence) {
                count += 1;
                start += width;
            } else {
                start += 1;
            }
        }
        count
    }

    fn strings_equal(&self, a: &str, b: &str) -> bool {
        self.are_equal(&Value::from(a), &Value::from(b))
    }
}

impl fmt::Display for ComparisonStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl fmt::Debug for ComparisonStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => f.write_str("ComparisonStrategy::Standard"),
            Self::ComparatorBased {
                comparator,
                description,
            } => f
                .debug_struct("ComparisonStrategy::ComparatorBased")
                .field("comparator", &comparator.description())
                .field("description", description)
                .finish(),
        }
    }
}

impl PartialEq for ComparisonStrategy {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Standard, Self::Standard) => true,
            (
                Self::ComparatorBased {
                    comparator: c1,
                    description: d1,
                },
                Self::ComparatorBased {
                    comparator: c2,
                    description: d2,
                },
            ) => {
                let same_comparator = Arc::as_ptr(c1).cast::<()>() == Arc::as_ptr(c2).cast::<()>()
                    || c1.description() == c2.description();
                same_comparator && d1 == d2
            }
            _ => false,
        }
    }
}

impl Eq for ComparisonStrategy {}

impl Hash for ComparisonStrategy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Standard => 0u8.hash(state),
            Self::ComparatorBased {
                comparator,
                description,
            } => {
                1u8.hash(state);
                comparator.description().hash(state);
                description.hash(state);
            }
        }
    }
}
