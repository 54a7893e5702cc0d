//! Message layouts for aggregated failures.

use super::AssertionError;

/// Heading used when an aggregate has no description.
pub const DEFAULT_MULTIPLE_FAILURES_HEADING: &str = "Multiple Failures";

fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    format!("{count} {}", if count == 1 { singular } else { plural })
}

fn heading_or_default(heading: &str) -> &str {
    let heading = heading.trim();
    if heading.is_empty() {
        DEFAULT_MULTIPLE_FAILURES_HEADING
    } else {
        heading
    }
}

fn message_or_placeholder(failure: &AssertionError) -> &str {
    if failure.message().trim().is_empty() {
        "<no message>"
    } else {
        failure.message()
    }
}

/// Host aggregate layout: one tab-indented block per failure.
///
/// ```text
/// [description] (2 failures)
/// 	error1
/// 	error2
/// ```
///
/// Newlines inside a failure message are followed by a tab so multi-line
/// messages stay inside their block.
#[must_use]
pub fn multiple_failures_message(heading: &str, failures: &[AssertionError]) -> String {
    let heading = heading_or_default(heading);
    if failures.is_empty() {
        return heading.to_string();
    }
    let blocks: Vec<String> = failures
        .iter()
        .map(|failure| format!("\t{}", message_or_placeholder(failure).replace('\n', "\n\t")))
        .collect();
    format!(
        "{heading} ({})\n{}",
        pluralize(failures.len(), "failure", "failures"),
        blocks.join("\n")
    )
}

/// Fallback aggregate layout with numbered separators and the first stack
/// frame outside this crate.
///
/// ```text
///
/// Multiple Failures (2 failures)
/// -- failure 1 --
/// boom
/// at my_tests::checks(tests/checks.rs:12)
/// -- failure 2 --
/// bam
/// ```
#[must_use]
pub fn aggregated_failures_message(heading: &str, failures: &[AssertionError]) -> String {
    let mut out = format!(
        "\n{} ({})",
        heading_or_default(heading),
        pluralize(failures.len(), "failure", "failures")
    );
    for (i, failure) in failures.iter().enumerate() {
        out.push_str(&format!("\n-- failure {} --", i + 1));
        let message = message_or_placeholder(failure);
        if !message.starts_with('\n') {
            out.push('\n');
        }
        out.push_str(message);
        if let Some(frame) = failure.first_external_frame() {
            out.push_str(&format!("\nat {frame}"));
        }
    }
    out
}

/// Soft-assertion fallback layout with explicit `i) ` numbering.
///
/// ```text
///
/// The following 2 assertions failed:
/// 1) error1
/// 2) error2
/// ```
#[must_use]
pub fn soft_assertions_message(failures: &[AssertionError]) -> String {
    let mut out = format!(
        "\nThe following {} failed:\n",
        pluralize(failures.len(), "assertion", "assertions")
    );
    for (i, failure) in failures.iter().enumerate() {
        out.push_str(&format!("{}) {}\n", i + 1, failure.message()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StackFrame;

    fn errors(messages: &[&str]) -> Vec<AssertionError> {
        messages.iter().map(|m| AssertionError::new(*m)).collect()
    }

    // =========================================================================
    // Host layout
    // =========================================================================

    #[test]
    fn test_host_layout_with_heading() {
        assert_eq!(
            multiple_failures_message("[description]", &errors(&["error1", "error2"])),
            "[description] (2 failures)\n\terror1\n\terror2"
        );
    }

    #[test]
    fn test_host_layout_blank_heading() {
        assert_eq!(
            multiple_failures_message("  ", &errors(&["boom"])),
            "Multiple Failures (1 failure)\n\tboom"
        );
    }

    #[test]
    fn test_host_layout_indents_inner_lines() {
        assert_eq!(
            multiple_failures_message("h", &errors(&["line1\nline2", ""])),
            "h (2 failures)\n\tline1\n\tline2\n\t<no message>"
        );
    }

    #[test]
    fn test_host_layout_without_failures_is_heading() {
        assert_eq!(multiple_failures_message("", &[]), "Multiple Failures");
    }

    // =========================================================================
    // Fallback layouts
    // =========================================================================

    #[test]
    fn test_aggregated_layout() {
        let first = AssertionError::new("Expecting empty but was: [\"\"]").with_stack_trace(vec![
            StackFrame::new("fluent_errors::error::creator::failure"),
            StackFrame::new("my_tests::soft").file("tests/soft.rs").line(48),
        ]);
        let second = AssertionError::new("\nexpected: \"bcd\"\n but was: \"abc\"");
        assert_eq!(
            aggregated_failures_message("", &[first, second]),
            "\nMultiple Failures (2 failures)\n-- failure 1 --\nExpecting empty but was: [\"\"]\nat my_tests::soft(tests/soft.rs:48)\n-- failure 2 --\nexpected: \"bcd\"\n but was: \"abc\""
        );
    }

    #[test]
    fn test_soft_layout() {
        assert_eq!(
            soft_assertions_message(&errors(&["error1", "error2"])),
            "\nThe following 2 assertions failed:\n1) error1\n2) error2\n"
        );
        assert_eq!(
            soft_assertions_message(&errors(&["only"])),
            "\nThe following 1 assertion failed:\n1) only\n"
        );
    }
}
