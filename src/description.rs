//! Assertion descriptions and their bracketed message prefix.

use std::fmt;
use std::sync::Arc;

/// An optional human label attached to an assertion.
///
/// Descriptions are immutable once built. A [`Description::Lazy`] label is
/// evaluated every time it is formatted, so an expensive label only costs
/// something when an assertion actually fails.
#[derive(Clone, Default)]
pub enum Description {
    /// No label.
    #[default]
    Empty,
    /// A fixed label.
    Text(String),
    /// A label computed on demand.
    Lazy(Arc<dyn Fn() -> String + Send + Sync>),
    /// Several labels joined by `", "`.
    Join(Vec<Description>),
}

impl Description {
    /// A fixed text description.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// A description computed when the failure message is built.
    #[must_use]
    pub fn lazy<F>(supplier: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::Lazy(Arc::new(supplier))
    }

    /// Join several descriptions, skipping the empty ones.
    #[must_use]
    pub fn join(descriptions: impl IntoIterator<Item = Description>) -> Self {
        Self::Join(descriptions.into_iter().collect())
    }

    /// The rendered label text.
    #[must_use]
    pub fn value(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.clone(),
            Self::Lazy(supplier) => supplier(),
            Self::Join(parts) => parts
                .iter()
                .map(Self::value)
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value().is_empty()
    }
}

impl fmt::Debug for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Description::Empty"),
            Self::Text(text) => f.debug_tuple("Description::Text").field(text).finish(),
            Self::Lazy(_) => f.write_str("Description::Lazy(..)"),
            Self::Join(parts) => f.debug_tuple("Description::Join").field(parts).finish(),
        }
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value())
    }
}

impl PartialEq for Description {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Eq for Description {}

impl From<&str> for Description {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Description {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Format a description as a message prefix.
///
/// Returns `"[text] "` for a non-empty label and `""` otherwise.
///
/// ```rust
/// use fluent_errors::description::{format_description, Description};
///
/// assert_eq!(format_description(Some(&Description::text("Test"))), "[Test] ");
/// assert_eq!(format_description(Some(&Description::Empty)), "");
/// assert_eq!(format_description(None), "");
/// ```
#[must_use]
pub fn format_description(description: Option<&Description>) -> String {
    let text = description.map(Description::value).unwrap_or_default();
    if text.is_empty() {
        String::new()
    } else {
        format!("[{text}] ")
    }
}
