//! Locations of failures inside a decoded value.
//!
//! [`ErrorPath`] is what a [`DecodeError`](crate::DecodeError) tree looks like
//! once it is flattened: the chain of keys and indices crossed on the way from
//! the root of the input down to a rejected leaf.

use std::fmt::{self, Display};

/// One step of an [`ErrorPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named field (e.g. `user`, `email`).
    Key(String),
    /// A positional element (e.g. `[0]`).
    Index(usize),
}

/// The position of a leaf failure, rendered like `users[0].email`.
///
/// # Example
///
/// ```rust
/// use faultline::ErrorPath;
///
/// let path = ErrorPath::root()
///     .push_key("users")
///     .push_index(0)
///     .push_key("email");
///
/// assert_eq!(path.to_string(), "users[0].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ErrorPath {
    segments: Vec<PathSegment>,
}

impl ErrorPath {
    /// The empty path, pointing at the input itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path extended with a key. `self` is left untouched.
    pub fn push_key(&self, key: impl Into<String>) -> Self {
        self.push(PathSegment::Key(key.into()))
    }

    /// Returns a new path extended with an index. `self` is left untouched.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    fn push(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    /// Returns true if this path points at the input itself.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the segments, root first.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// The path one step up, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(Self {
            segments: init.to_vec(),
        })
    }

    /// The innermost segment, or `None` at the root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for ErrorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{}", key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}
