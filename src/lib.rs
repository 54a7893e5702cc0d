//! # fluent_errors
//!
//! The failure-message core of a fluent assertion library.
//!
//! When an expectation does not hold, this crate builds the message and the
//! error that report it: a template is chosen for the kind of mismatch, the
//! values are rendered through a pluggable [`Representation`] and spliced in
//! without any `%` they contain being taken for a directive, and the result
//! becomes the richest [`AssertionError`] the host integrations allow.
//!
//! ## Quick Start
//!
//! ```rust
//! use fluent_errors::prelude::*;
//! use fluent_errors::factory::equality::should_be_equal;
//!
//! let factory = should_be_equal("Luke", "Yoda", &ComparisonStrategy::Standard);
//! let error = factory.new_assertion_error(
//!     None,
//!     &StandardRepresentation::default(),
//!     &AssertionErrorCreator::default(),
//! );
//! assert_eq!(error.message(), "\nexpected: \"Yoda\"\n but was: \"Luke\"");
//! ```
//!
//! ## Core Concepts
//!
//! - **Value**: a dynamically typed value tree, the input of every message
//! - **Representation**: how values are rendered (standard, hex, binary)
//! - **Description**: the optional `[...]` prefix naming what was checked
//! - **`ErrorMessageFactory`**: a template bound to its arguments, rendered later
//! - **`AssertionErrorCreator`**: picks the kind of error to build
//! - **Recursive comparison**: field-by-field differences of two value graphs

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collector;
pub mod comparison;
pub mod config;
pub mod description;
pub mod error;
pub mod factory;
pub mod message;
pub mod recursive;
pub mod representation;
pub mod sync;
pub mod value;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::collector::FailureCollector;
    pub use crate::comparison::{
        CaseInsensitiveStringComparator, Comparator, ComparisonStrategy, FnComparator,
    };
    pub use crate::config::Configuration;
    pub use crate::description::Description;
    pub use crate::error::{AssertionError, AssertionErrorCreator, ErrorKind};
    pub use crate::factory::{AssertionErrorFactory, ErrorMessageFactory, ShouldBeEqual};
    pub use crate::message::{MessageArg, PredicateDescription};
    pub use crate::recursive::{
        ComparisonDifference, FieldLocation, RecursiveComparisonConfiguration,
        RecursiveComparisonDifferenceCalculator,
    };
    pub use crate::representation::{
        BinaryRepresentation, HexadecimalRepresentation, Representation, StandardRepresentation,
    };
    pub use crate::value::{ObjectRef, SequenceKind, Value};
}

// Re-export key types at crate root
pub use config::{ConfigError, Configuration};
pub use description::Description;
pub use error::{AssertionError, AssertionErrorCreator};
pub use factory::ErrorMessageFactory;
pub use message::FormatError;
pub use representation::{Representation, StandardRepresentation};
pub use value::Value;
