//! Stack frames attached to assertion errors.
//!
//! # Automatic Capture (requires `backtrace` feature)
//!
//! With the `backtrace` feature enabled, [`capture_stack_trace`] records the
//! caller's stack, most recent call first. Without it, errors carry an empty
//! stack unless frames are supplied explicitly with
//! [`AssertionError::with_stack_trace`](super::AssertionError::with_stack_trace).

use std::fmt;

#[cfg(feature = "backtrace")]
use backtrace::Backtrace as BT;

/// Symbol prefix identifying frames from inside this crate.
pub const INTERNAL_FRAME_PREFIX: &str = "fluent_errors::";

/// One frame of a captured stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StackFrame {
    /// Fully qualified function path, e.g. `my_tests::checks_names`.
    pub symbol: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl StackFrame {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            file: None,
            line: None,
        }
    }

    #[must_use]
    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    #[must_use]
    pub fn line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// True for frames of this crate (and its trait impls).
    #[must_use]
    pub fn is_internal(&self) -> bool {
        let symbol = self.symbol.trim_start_matches('<');
        symbol.starts_with(INTERNAL_FRAME_PREFIX)
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{}({file}:{line})", self.symbol),
            (Some(file), None) => write!(f, "{}({file})", self.symbol),
            _ => f.write_str(&self.symbol),
        }
    }
}

/// Drop every internal frame, keeping the relative order of the others.
pub fn remove_internal_frames(frames: &mut Vec<StackFrame>) {
    let before = frames.len();
    frames.retain(|frame| !frame.is_internal());
    if frames.len() != before {
        log::trace!("removed {} internal stack frame(s)", before - frames.len());
    }
}

/// Capture the current stack, most recent call first.
///
/// Runtime frames (`std`, `core`, unwinding machinery) are skipped.
#[cfg(feature = "backtrace")]
#[must_use]
pub fn capture_stack_trace() -> Vec<StackFrame> {
    let bt = BT::new();
    let mut frames = Vec::new();
    for frame in bt.frames() {
        backtrace::resolve(frame.ip(), |symbol| {
            let Some(name) = symbol.name().map(|n| n.to_string()) else {
                return;
            };
            if is_runtime_frame(&name) {
                return;
            }
            let mut captured = StackFrame::new(strip_hash_suffix(&name));
            if let Some(path) = symbol.filename() {
                captured = captured.file(path.display().to_string());
            }
            if let Some(line) = symbol.lineno() {
                captured = captured.line(line);
            }
            frames.push(captured);
        });
    }
    frames
}

/// Capture the current stack; always empty without the `backtrace` feature.
#[cfg(not(feature = "backtrace"))]
#[must_use]
pub fn capture_stack_trace() -> Vec<StackFrame> {
    Vec::new()
}

#[cfg(feature = "backtrace")]
fn is_runtime_frame(name: &str) -> bool {
    const RUNTIME_PREFIXES: [&str; 11] = [
        "std::",
        "core::",
        "alloc::",
        "backtrace::",
        "<alloc::",
        "<core::",
        "<std::",
        "rust_begin_unwind",
        "__rust_",
        "__libc_",
        "_start",
    ];
    RUNTIME_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

/// `my_crate::func::h1234567890abcdef` becomes `my_crate::func`.
#[cfg(feature = "backtrace")]
fn strip_hash_suffix(name: &str) -> String {
    if let Some(pos) = name.rfind("::h")
        && name[pos + 3..].chars().all(|c| c.is_ascii_hexdigit())
    {
        return name[..pos].to_string();
    }
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_display() {
        let frame = StackFrame::new("tests::checks").file("tests/checks.rs").line(12);
        assert_eq!(frame.to_string(), "tests::checks(tests/checks.rs:12)");
        assert_eq!(StackFrame::new("main").to_string(), "main");
    }

    #[test]
    fn test_internal_detection() {
        assert!(StackFrame::new("fluent_errors::error::creator::build").is_internal());
        assert!(
            StackFrame::new("<fluent_errors::error::builders::ComparisonFailureBuilder as Trait>::build")
                .is_internal()
        );
        assert!(!StackFrame::new("my_tests::fluent_errors_usage").is_internal());
    }

    #[test]
    fn test_remove_internal_frames_keeps_order() {
        let mut frames = vec![
            StackFrame::new("fluent_errors::failures::failure"),
            StackFrame::new("my_tests::a"),
            StackFrame::new("fluent_errors::message::format"),
            StackFrame::new("my_tests::b"),
        ];
        remove_internal_frames(&mut frames);
        let symbols: Vec<_> = frames.iter().map(|f| f.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["my_tests::a", "my_tests::b"]);
    }

    #[cfg(feature = "backtrace")]
    #[test]
    fn test_strip_hash_suffix() {
        assert_eq!(strip_hash_suffix("my_crate::func::h1234567890abcdef"), "my_crate::func");
        assert_eq!(strip_hash_suffix("my_crate::func"), "my_crate::func");
    }

    #[cfg(feature = "backtrace")]
    #[test]
    fn test_capture_skips_runtime_frames() {
        let frames = capture_stack_trace();
        assert!(frames.iter().all(|f| !f.symbol.starts_with("std::")));
    }
}
