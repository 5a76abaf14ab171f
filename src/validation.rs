//! Helpers for decoders that report through [`Validation`].
//!
//! A decoder returns [`DecodeResult`]. Independent sibling results accumulate
//! with `Validation::and`, which uses the [`Semigroup`] instance of
//! [`DecodeErrors`], and a child's failures are nested under its parent's key
//! or index with [`within_key`] and [`within_index`].
//!
//! # Example
//!
//! ```rust
//! use faultline::validation::{failure, within_key};
//! use faultline::{DecodeResult, Kind};
//! use serde_json::{json, Value};
//! use stillwater::Validation;
//!
//! fn string(value: &Value) -> DecodeResult<String, &'static str> {
//!     match value.as_str() {
//!         Some(s) => Validation::Success(s.to_string()),
//!         None => failure(value.clone(), "expected string"),
//!     }
//! }
//!
//! let input = json!({"first": 1, "last": "Lovelace"});
//! let first = within_key(string(&input["first"]), "first", Kind::Required);
//! let last = within_key(string(&input["last"]), "last", Kind::Required);
//!
//! match first.and(last) {
//!     Validation::Failure(errors) => assert_eq!(errors.len(), 1),
//!     Validation::Success(_) => panic!("Expected failure"),
//! }
//! ```
//!
//! [`Semigroup`]: stillwater::Semigroup

use serde_json::Value;
use stillwater::Validation;

use crate::error::{DecodeError, DecodeErrors, Kind};

/// The outcome of decoding a value: the decoded `T`, or every failure found.
pub type DecodeResult<T, E> = Validation<T, DecodeErrors<E>>;

/// A failed result holding a single leaf.
pub fn failure<T, E>(actual: Value, error: E) -> DecodeResult<T, E> {
    Validation::Failure(DecodeErrors::of(DecodeError::leaf(actual, error)))
}

/// Nests the failures of a field's result under that field's key.
///
/// A successful result is returned unchanged.
pub fn within_key<T, E>(
    result: DecodeResult<T, E>,
    key: impl Into<String>,
    kind: Kind,
) -> DecodeResult<T, E> {
    match result {
        Validation::Success(value) => Validation::Success(value),
        Validation::Failure(errors) => {
            let key = key.into();
            tracing::trace!(key = %key, %kind, "nesting failures under key");
            Validation::Failure(DecodeErrors::of(DecodeError::key(key, kind, errors)))
        }
    }
}

/// Nests the failures of an element's result under that element's index.
///
/// A successful result is returned unchanged.
pub fn within_index<T, E>(
    result: DecodeResult<T, E>,
    index: usize,
    kind: Kind,
) -> DecodeResult<T, E> {
    match result {
        Validation::Success(value) => Validation::Success(value),
        Validation::Failure(errors) => {
            tracing::trace!(index, %kind, "nesting failures under index");
            Validation::Failure(DecodeErrors::of(DecodeError::index(index, kind, errors)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn number(value: &Value) -> DecodeResult<f64, String> {
        match value.as_f64() {
            Some(n) => Validation::Success(n),
            None => failure(value.clone(), "expected number".to_string()),
        }
    }

    #[test]
    fn test_failure_is_single_leaf() {
        let result: DecodeResult<(), &str> = failure(json!(null), "missing");
        match result {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors.first(), &DecodeError::leaf(json!(null), "missing"));
            }
            Validation::Success(_) => panic!("Expected failure"),
        }
    }

    #[test]
    fn test_within_key_passes_success_through() {
        let result = within_key(number(&json!(2.5)), "price", Kind::Required);
        match result {
            Validation::Success(n) => assert_eq!(n, 2.5),
            Validation::Failure(_) => panic!("Expected success"),
        }
    }

    #[test]
    fn test_within_key_wraps_failure() {
        let result = within_key(number(&json!("cheap")), "price", Kind::Optional);
        match result {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 1);
                let node = errors.first();
                assert_eq!(node.kind(), Some(Kind::Optional));
                let leaves = node.leaves();
                assert_eq!(leaves[0].path.to_string(), "price");
                assert_eq!(leaves[0].actual, &json!("cheap"));
            }
            Validation::Success(_) => panic!("Expected failure"),
        }
    }

    #[test]
    fn test_within_index_wraps_failure() {
        let result = within_index(number(&json!(false)), 7, Kind::Required);
        match result {
            Validation::Failure(errors) => {
                let index = errors.first().fold(
                    |_, _| None,
                    |_, _, _| None,
                    |index, _, _| Some(index),
                );
                assert_eq!(index, Some(7));
            }
            Validation::Success(_) => panic!("Expected failure"),
        }
    }

    #[test]
    fn test_and_accumulates_siblings() {
        let input = json!([1, "two", 3, "four"]);
        let items = input.as_array().unwrap();

        let combined = items.iter().enumerate().fold(
            Validation::Success(()),
            |acc: DecodeResult<(), String>, (i, item)| {
                acc.and(within_index(number(item), i, Kind::Required))
                    .map(|_| ())
            },
        );

        match combined {
            Validation::Failure(errors) => {
                let paths: Vec<String> =
                    errors.leaves().iter().map(|l| l.path.to_string()).collect();
                assert_eq!(paths, vec!["[1]", "[3]"]);
            }
            Validation::Success(_) => panic!("Expected failure"),
        }
    }
}
