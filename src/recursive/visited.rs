//! Pairs already handed to the comparison.

use std::collections::HashSet;

use super::FieldLocation;
use crate::value::Value;

/// A pair of values compared at one location.
#[derive(Debug, Clone)]
pub(crate) struct DualValue {
    pub(crate) location: FieldLocation,
    pub(crate) actual: Value,
    pub(crate) expected: Value,
}

impl DualValue {
    pub(crate) fn new(location: FieldLocation, actual: Value, expected: Value) -> Self {
        Self {
            location,
            actual,
            expected,
        }
    }

    /// Identity key of an object pair; other values have no identity and
    /// cannot close a cycle.
    pub(crate) fn identity(&self) -> Option<(usize, usize)> {
        match (&self.actual, &self.expected) {
            (Value::Object(actual), Value::Object(expected)) => Some((actual.id(), expected.id())),
            _ => None,
        }
    }
}

/// Object pairs already compared, keyed by node identity.
#[derive(Debug, Clone, Default)]
pub(crate) struct VisitedDualValues {
    pairs: HashSet<(usize, usize)>,
}

impl VisitedDualValues {
    pub(crate) fn contains(&self, dual_value: &DualValue) -> bool {
        dual_value
            .identity()
            .is_some_and(|pair| self.pairs.contains(&pair))
    }

    /// Record `dual_value`; false if it was already recorded.
    pub(crate) fn insert(&mut self, dual_value: &DualValue) -> bool {
        dual_value
            .identity()
            .is_none_or(|pair| self.pairs.insert(pair))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ObjectRef;

    #[test]
    fn test_object_pairs_are_recorded_once() {
        let a = ObjectRef::new("A");
        let b = ObjectRef::new("B");
        let pair = DualValue::new(FieldLocation::root(), a.clone().into(), b.clone().into());
        let mut visited = VisitedDualValues::default();
        assert!(!visited.contains(&pair));
        assert!(visited.insert(&pair));
        assert!(visited.contains(&pair));
        assert!(!visited.insert(&pair));

        let swapped = DualValue::new(FieldLocation::root(), b.into(), a.into());
        assert!(!visited.contains(&swapped));
    }

    #[test]
    fn test_scalars_are_never_visited() {
        let pair = DualValue::new(FieldLocation::root(), Value::from(1), Value::from(1));
        let mut visited = VisitedDualValues::default();
        assert!(visited.insert(&pair));
        assert!(visited.insert(&pair));
        assert!(!visited.contains(&pair));
    }
}
