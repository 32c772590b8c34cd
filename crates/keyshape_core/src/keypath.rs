//! Key paths locating a value within the root input.

use std::fmt;

/// One segment of a [`KeyPath`]: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object field name
    Key(String),
    /// Array position
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => f.write_str(k),
            Segment::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Ordered sequence of segments locating a value within the root input.
///
/// Rendering joins the segments with `.`, so the path of element 2 of the
/// `arr` field of the `sha` field is `sha.arr.2`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPath(Vec<Segment>);

impl KeyPath {
    /// The empty path addressing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a copy of this path extended by an object key.
    pub fn join_key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Key(key.into()));
        Self(segments)
    }

    /// Returns a copy of this path extended by an array index.
    pub fn join_index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Index(index));
        Self(segments)
    }

    /// Returns the segments of this path.
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Returns true if this path addresses the root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl From<&str> for KeyPath {
    fn from(key: &str) -> Self {
        KeyPath::root().join_key(key)
    }
}
