//! Common test utilities and logging infrastructure
//!
//! The crate logs through the `log` facade; `tracing-subscriber` bridges
//! those records so they show up in test output.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::init_test_logging;
//!
//! #[test]
//! fn my_test() {
//!     init_test_logging();
//!     // test code...
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG=debug` - Enable debug logging in tests
//! - `RUST_LOG=fluent_errors::recursive=trace` - Follow the recursive traversal
//! - `TEST_LOG_JSON=1` - Output JSON format for CI parsing
//!
//! Not every test module uses every helper.

#![allow(dead_code)]

use std::sync::Once;

use fluent_errors::error::{AssertionErrorCreator, ConstructorInvoker};
use fluent_errors::value::{ObjectRef, Value};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize test logging; idempotent.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let use_json = std::env::var("TEST_LOG_JSON").is_ok();
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("fluent_errors=debug,test=info"));

        if use_json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_test_writer())
                .try_init()
                .ok();
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_test_writer()
                        .with_file(true)
                        .with_line_number(true)
                        .with_thread_ids(true)
                        .with_target(true)
                        .compact(),
                )
                .try_init()
                .ok();
        }
    });
}

/// A span marking one phase of a test.
pub fn test_phase(name: &str) -> tracing::span::EnteredSpan {
    let span = tracing::info_span!("test_phase", phase = name);
    tracing::info!(phase = name, "entering test phase");
    span.entered()
}

// ============================================================================
// Fixtures
// ============================================================================

/// A creator that never reaches a host integration.
pub fn plain_creator() -> AssertionErrorCreator {
    AssertionErrorCreator::default()
        .with_invoker(ConstructorInvoker::empty())
        .with_remove_internal_frames(false)
}

/// A creator with every host integration available.
pub fn host_creator() -> AssertionErrorCreator {
    AssertionErrorCreator::default()
        .with_invoker(ConstructorInvoker::with_host_integrations())
        .with_remove_internal_frames(false)
}

pub fn person(first: impl Into<Value>, last: impl Into<Value>) -> ObjectRef {
    ObjectRef::new("Person")
        .with_field("first", first)
        .with_field("last", last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_test_logging();
        init_test_logging();
    }
}
