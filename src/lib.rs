//! # Faultline
//!
//! A failure report for decoders that keeps EVERY failure found in a single
//! pass over the input, instead of stopping at the first one.
//!
//! ## Overview
//!
//! While a decoder walks an input value against a schema, each rejected value
//! becomes a [`DecodeError::Leaf`]. Failures found inside a field or an array
//! element are nested under a [`DecodeError::Key`] or [`DecodeError::Index`]
//! node. Sibling failures are collected in a [`FreeSemigroup`], a non-empty
//! tree whose concatenation is O(1), so merging the reports of wide records
//! nested in wide records never copies anything. The tree is flattened once,
//! when the caller folds it into whatever report it needs.
//!
//! ## Core Types
//!
//! - [`DecodeError`]: One node of the report (leaf, key or index)
//! - [`DecodeErrors`]: A non-empty set of sibling failures
//! - [`FreeSemigroup`]: The lazily combined aggregate behind [`DecodeErrors`]
//! - [`Kind`]: Whether a failing key or index was required or optional
//! - [`ErrorPath`]: The location of a leaf once the tree is flattened
//! - [`DecodeResult`]: stillwater's `Validation` over [`DecodeErrors`]
//!
//! ## Example
//!
//! ```rust
//! use faultline::{DecodeError, DecodeErrors, Kind};
//! use serde_json::json;
//! use stillwater::prelude::*;
//!
//! let name = DecodeError::key(
//!     "name",
//!     Kind::Required,
//!     DecodeErrors::of(DecodeError::leaf(json!(42), "expected string")),
//! );
//! let age = DecodeError::key(
//!     "age",
//!     Kind::Optional,
//!     DecodeErrors::of(DecodeError::leaf(json!(-1), "expected positive integer")),
//! );
//!
//! // Both failures survive the merge, in the order they were found.
//! let report = DecodeErrors::of(name).combine(DecodeErrors::of(age));
//! let paths: Vec<String> = report.leaves().iter().map(|l| l.path.to_string()).collect();
//! assert_eq!(paths, vec!["name", "age"]);
//! ```

pub mod error;
pub mod free_semigroup;
pub mod parallel;
pub mod path;
pub mod validation;

pub use error::{DecodeError, DecodeErrors, Kind, LeafFailure};
pub use free_semigroup::FreeSemigroup;
pub use path::{ErrorPath, PathSegment};
pub use validation::DecodeResult;
