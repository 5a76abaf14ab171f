//! The decode failure tree.
//!
//! This module provides [`DecodeError`], one node of a failure report, and
//! [`DecodeErrors`], the non-empty aggregate of sibling failures that composite
//! nodes carry.

use std::fmt::{self, Display};

use serde_json::Value;

use crate::free_semigroup::FreeSemigroup;
use crate::path::ErrorPath;

/// Whether a failing key or index was mandatory in the schema.
///
/// The decoder chooses the kind; this crate only carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The key or index must be present and valid.
    Required,
    /// The key or index may be absent, but must be valid when present.
    Optional,
}

impl Kind {
    /// Returns `"required"` or `"optional"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Required => "required",
            Kind::Optional => "optional",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-empty set of sibling failures.
pub type DecodeErrors<E> = FreeSemigroup<DecodeError<E>>;

/// One node of a decode failure report.
///
/// A report is a tree: [`Leaf`] nodes hold the rejected input and the reason
/// it was rejected, while [`Key`] and [`Index`] nodes record where in the
/// input the failures below them happened. Composite nodes always hold at
/// least one child, since [`DecodeErrors`] cannot be empty.
///
/// The reason type `E` is chosen by the decoder (a message, an error code, a
/// structured enum). Consumers take the tree apart with [`fold`] or `match`.
///
/// # Example
///
/// ```rust
/// use faultline::{DecodeError, DecodeErrors, Kind};
/// use serde_json::json;
///
/// let error = DecodeError::key(
///     "age",
///     Kind::Required,
///     DecodeErrors::of(DecodeError::leaf(json!("ten"), "expected integer")),
/// );
///
/// let summary = error.fold(
///     |_, reason| reason.to_string(),
///     |key, kind, errors| format!("{} {}: {} failure(s)", kind, key, errors.len()),
///     |index, kind, errors| format!("{} [{}]: {} failure(s)", kind, index, errors.len()),
/// );
/// assert_eq!(summary, "required age: 1 failure(s)");
/// ```
///
/// [`Leaf`]: DecodeError::Leaf
/// [`Key`]: DecodeError::Key
/// [`Index`]: DecodeError::Index
/// [`fold`]: DecodeError::fold
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError<E> {
    /// The input value `actual` was rejected for `error`.
    #[error("cannot decode {actual}: {error}")]
    Leaf { actual: Value, error: E },

    /// Decoding the field `key` failed.
    #[error("{kind} key {key:?}: {} failure(s)", .errors.len())]
    Key {
        key: String,
        kind: Kind,
        errors: Box<DecodeErrors<E>>,
    },

    /// Decoding the element at `index` failed.
    #[error("{kind} index {index}: {} failure(s)", .errors.len())]
    Index {
        index: usize,
        kind: Kind,
        errors: Box<DecodeErrors<E>>,
    },
}

/// A rejected leaf together with its location, as produced by
/// [`DecodeError::leaves`].
#[derive(Debug, Clone, PartialEq)]
pub struct LeafFailure<'a, E> {
    /// Keys and indices crossed from the root down to the leaf.
    pub path: ErrorPath,
    /// The rejected input value.
    pub actual: &'a Value,
    /// Why the value was rejected.
    pub error: &'a E,
}

impl<E> DecodeError<E> {
    /// Creates a leaf failure: `actual` was rejected for `error`.
    pub fn leaf(actual: Value, error: E) -> Self {
        DecodeError::Leaf { actual, error }
    }

    /// Creates a failure for the field `key`, holding the failures found in its value.
    pub fn key(key: impl Into<String>, kind: Kind, errors: DecodeErrors<E>) -> Self {
        DecodeError::Key {
            key: key.into(),
            kind,
            errors: Box::new(errors),
        }
    }

    /// Creates a failure for the element at `index`, holding the failures found in it.
    pub fn index(index: usize, kind: Kind, errors: DecodeErrors<E>) -> Self {
        DecodeError::Index {
            index,
            kind,
            errors: Box::new(errors),
        }
    }

    /// Dispatches on the variant, calling exactly one of the handlers.
    ///
    /// Each handler receives the fields of its variant. Nested failures are
    /// not visited; a handler that wants them folds `errors` itself.
    pub fn fold<R>(
        &self,
        on_leaf: impl FnOnce(&Value, &E) -> R,
        on_key: impl FnOnce(&str, Kind, &DecodeErrors<E>) -> R,
        on_index: impl FnOnce(usize, Kind, &DecodeErrors<E>) -> R,
    ) -> R {
        match self {
            DecodeError::Leaf { actual, error } => on_leaf(actual, error),
            DecodeError::Key { key, kind, errors } => on_key(key, *kind, &**errors),
            DecodeError::Index {
                index,
                kind,
                errors,
            } => on_index(*index, *kind, &**errors),
        }
    }

    /// The kind of a composite node, `None` for a leaf.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            DecodeError::Leaf { .. } => None,
            DecodeError::Key { kind, .. } | DecodeError::Index { kind, .. } => Some(*kind),
        }
    }

    /// The nested failures of a composite node, `None` for a leaf.
    pub fn errors(&self) -> Option<&DecodeErrors<E>> {
        match self {
            DecodeError::Leaf { .. } => None,
            DecodeError::Key { errors, .. } | DecodeError::Index { errors, .. } => Some(&**errors),
        }
    }

    /// Rewrites every leaf reason with `f`, keeping the shape of the tree.
    pub fn map_error<F>(&self, mut f: impl FnMut(&E) -> F) -> DecodeError<F> {
        self.map_error_with(&mut f)
    }

    fn map_error_with<F>(&self, f: &mut dyn FnMut(&E) -> F) -> DecodeError<F> {
        match self {
            DecodeError::Leaf { actual, error } => DecodeError::leaf(actual.clone(), f(error)),
            DecodeError::Key { key, kind, errors } => {
                DecodeError::key(key.clone(), *kind, (**errors).map(|e| e.map_error_with(f)))
            }
            DecodeError::Index {
                index,
                kind,
                errors,
            } => DecodeError::index(*index, *kind, (**errors).map(|e| e.map_error_with(f))),
        }
    }

    /// Flattens the tree into its leaves, in the order they were reported.
    ///
    /// # Example
    ///
    /// ```rust
    /// use faultline::{DecodeError, DecodeErrors, Kind};
    /// use serde_json::json;
    ///
    /// let error = DecodeError::key(
    ///     "users",
    ///     Kind::Required,
    ///     DecodeErrors::of(DecodeError::index(
    ///         0,
    ///         Kind::Required,
    ///         DecodeErrors::of(DecodeError::leaf(json!(null), "expected object")),
    ///     )),
    /// );
    ///
    /// let leaves = error.leaves();
    /// assert_eq!(leaves.len(), 1);
    /// assert_eq!(leaves[0].path.to_string(), "users[0]");
    /// assert_eq!(*leaves[0].error, "expected object");
    /// ```
    pub fn leaves(&self) -> Vec<LeafFailure<'_, E>> {
        collect_leaves(vec![(ErrorPath::root(), self)])
    }
}

impl<E> DecodeErrors<E> {
    /// Flattens every tree in the aggregate into its leaves, left to right.
    pub fn leaves(&self) -> Vec<LeafFailure<'_, E>> {
        let mut roots: Vec<_> = self.iter().map(|e| (ErrorPath::root(), e)).collect();
        roots.reverse();
        collect_leaves(roots)
    }
}

/// Depth-first walk over `pending`, which is used as a stack (last item first).
fn collect_leaves<'a, E>(
    mut pending: Vec<(ErrorPath, &'a DecodeError<E>)>,
) -> Vec<LeafFailure<'a, E>> {
    let mut leaves = Vec::new();

    while let Some((path, node)) = pending.pop() {
        match node {
            DecodeError::Leaf { actual, error } => leaves.push(LeafFailure {
                path,
                actual,
                error,
            }),
            DecodeError::Key { key, errors, .. } => {
                let child = path.push_key(key.as_str());
                let start = pending.len();
                pending.extend(errors.iter().map(|e| (child.clone(), e)));
                pending[start..].reverse();
            }
            DecodeError::Index { index, errors, .. } => {
                let child = path.push_index(*index);
                let start = pending.len();
                pending.extend(errors.iter().map(|e| (child.clone(), e)));
                pending[start..].reverse();
            }
        }
    }

    leaves
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<DecodeError<String>>();
    assert_sync::<DecodeError<String>>();
    assert_send::<DecodeErrors<String>>();
    assert_sync::<DecodeErrors<String>>();
};
