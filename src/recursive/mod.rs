//! Recursive field-by-field comparison.
//!
//! Two value graphs are walked side by side and every mismatching pair is
//! reported as a [`ComparisonDifference`] carrying its [`FieldLocation`].
//! What is compared, and how, is set by a
//! [`RecursiveComparisonConfiguration`]:
//!
//! ```rust
//! use fluent_errors::recursive::{determine_differences, RecursiveComparisonConfiguration};
//! use fluent_errors::value::{ObjectRef, Value};
//!
//! let actual = ObjectRef::new("Person")
//!     .with_field("first", "Magic")
//!     .with_field("last", "Johnson");
//! let expected = ObjectRef::new("Person")
//!     .with_field("first", Value::Null)
//!     .with_field("last", "Johnson");
//!
//! let configuration = RecursiveComparisonConfiguration::builder()
//!     .ignore_all_actual_null_fields(true)
//!     .build()?;
//! let differences = determine_differences(&actual.into(), &expected.into(), &configuration);
//!
//! assert_eq!(differences.len(), 1);
//! assert_eq!(differences[0].concatenated_path(), "first");
//! assert_eq!(differences[0].expected(), &Value::Null);
//! # Ok::<(), fluent_errors::config::ConfigError>(())
//! ```

mod calculator;
mod configuration;
mod difference;
mod location;
mod visited;

pub use calculator::{RecursiveComparisonDifferenceCalculator, determine_differences};
pub use configuration::{
    ComparisonFlags, RecursiveComparisonConfiguration, RecursiveComparisonConfigurationBuilder,
};
pub use difference::{ComparisonDifference, ComparisonKeyDifference};
pub use location::{FieldLocation, PathSegment};
