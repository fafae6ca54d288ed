//! Field paths: the bracketed control names mirroring configuration nesting.
//!
//! A configuration object `{"net": {"ssid": "x", "dns": [1, 2]}}` addresses
//! the controls named `net[ssid]` and `net[dns][]`. Paths are built segment by
//! segment while walking the object and rendered to a name only at the leaf.

use std::fmt;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PathSegment {
    /// An object key.
    Key(String),
    /// The trailing `[]` marking an array-valued field.
    Array,
}

/// Ordered sequence of object keys, optionally ending in an array marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// A path made of a single top-level key.
    #[must_use]
    pub fn root(key: impl Into<String>) -> Self {
        Self::default().child(key)
    }

    /// This path extended with an object key.
    #[must_use]
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    /// This path marked as array-valued.
    #[must_use]
    pub fn array(mut self) -> Self {
        self.segments.push(PathSegment::Array);
        self
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if index == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, "[{key}]")?,
                PathSegment::Array => f.write_str("[]")?,
            }
        }
        Ok(())
    }
}
