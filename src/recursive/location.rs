//! Paths of compared sub-values.

use std::fmt;

use smallvec::SmallVec;

/// One step from a parent value to a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A declared field, or a map entry addressed by its key.
    Field(String),
    /// An element of an array or ordered sequence.
    Index(usize),
}

/// Where a compared pair of values sits in the object graph.
///
/// The root location has no segments and renders as an empty path.
///
/// ```rust
/// use fluent_errors::recursive::FieldLocation;
///
/// let location = FieldLocation::root().field("friends").index(0).field("name");
/// assert_eq!(location.concatenated_path(), "friends[0].name");
/// assert_eq!(location.field_path(), "friends.name");
/// assert!(FieldLocation::root().concatenated_path().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldLocation {
    segments: SmallVec<[PathSegment; 4]>,
}

impl FieldLocation {
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted field path such as `"address.city"`.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('.')
                .filter(|name| !name.is_empty())
                .map(|name| PathSegment::Field(name.to_string()))
                .collect(),
        }
    }

    /// Child location for a field or map key.
    #[must_use]
    pub fn field(&self, name: impl Into<String>) -> Self {
        let mut child = self.clone();
        child.segments.push(PathSegment::Field(name.into()));
        child
    }

    /// Child location for an element.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut child = self.clone();
        child.segments.push(PathSegment::Index(index));
        child
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Name of the last field step, if any.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|segment| match segment {
            PathSegment::Field(name) => Some(name.as_str()),
            PathSegment::Index(_) => None,
        })
    }

    /// Full path including element indexes, e.g. `a.b[0].c`.
    #[must_use]
    pub fn concatenated_path(&self) -> String {
        let mut path = String::new();
        for segment in &self.segments {
            match segment {
                PathSegment::Field(name) => {
                    if !path.is_empty() {
                        path.push('.');
                    }
                    path.push_str(name);
                }
                PathSegment::Index(index) => {
                    path.push('[');
                    path.push_str(&index.to_string());
                    path.push(']');
                }
            }
        }
        path
    }

    /// Path of field names only, e.g. `a.b.c` for `a.b[0].c`.
    ///
    /// Elements share their collection's field path, so a setting keyed on
    /// `friends.name` applies to the name of every friend.
    #[must_use]
    pub fn field_path(&self) -> String {
        self.decomposed_path().join(".")
    }

    /// Field names from the root down.
    #[must_use]
    pub fn decomposed_path(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                PathSegment::Field(name) => Some(name.as_str()),
                PathSegment::Index(_) => None,
            })
            .collect()
    }

    /// True if `path` names this location, with or without indexes.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.field_path() == path || self.concatenated_path() == path
    }
}

impl fmt::Display for FieldLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.concatenated_path())
    }
}
