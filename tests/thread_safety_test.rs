//! Tests for sharing failure trees across threads.

use faultline::parallel::par_concat_all;
use faultline::validation::{failure, within_index};
use faultline::{DecodeError, DecodeErrors, DecodeResult, Kind};
use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;
use stillwater::prelude::*;
use stillwater::Validation;

fn shared_report() -> DecodeErrors<String> {
    DecodeErrors::of(DecodeError::key(
        "name",
        Kind::Required,
        DecodeErrors::of(DecodeError::leaf(json!(1), "expected string".to_string())),
    ))
    .combine(DecodeErrors::of(DecodeError::index(
        3,
        Kind::Optional,
        DecodeErrors::of(DecodeError::leaf(json!(null), "expected number".to_string())),
    )))
}

#[test]
fn test_concurrent_reads_of_shared_report() {
    let report = Arc::new(shared_report());

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let report = Arc::clone(&report);
            thread::spawn(move || {
                let paths: Vec<String> =
                    report.leaves().iter().map(|l| l.path.to_string()).collect();
                assert_eq!(paths, vec!["name", "[3]"]);
                report.len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
}

#[test]
fn test_reports_built_on_threads_merge_in_order() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                DecodeErrors::of(DecodeError::index(
                    i,
                    Kind::Required,
                    DecodeErrors::of(DecodeError::leaf(json!(i), format!("element {}", i))),
                ))
            })
        })
        .collect();

    let parts: Vec<DecodeErrors<String>> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();
    let merged = DecodeErrors::concat_all(parts).unwrap();

    let reasons: Vec<&String> = merged.leaves().into_iter().map(|l| l.error).collect();
    let expected: Vec<String> = (0..8).map(|i| format!("element {}", i)).collect();
    assert_eq!(reasons, expected.iter().collect::<Vec<_>>());
}

#[test]
fn test_parallel_array_decoding() {
    fn even(value: &Value) -> DecodeResult<u64, String> {
        match value.as_u64() {
            Some(n) if n % 2 == 0 => Validation::Success(n),
            _ => failure(value.clone(), "expected even number".to_string()),
        }
    }

    let input: Vec<Value> = (0..1_000u64).map(|n| json!(n)).collect();

    let failures: Vec<DecodeErrors<String>> = input
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match within_index(even(item), i, Kind::Required) {
            Validation::Success(_) => None,
            Validation::Failure(errors) => Some(errors),
        })
        .collect();

    let report = par_concat_all(failures).unwrap();

    assert_eq!(report.len(), 500);
    let first = report.first().fold(
        |_, _| None,
        |_, _, _| None,
        |index, _, _| Some(index),
    );
    assert_eq!(first, Some(1));

    let indices: Vec<String> = report.leaves().iter().map(|l| l.path.to_string()).collect();
    let expected: Vec<String> = (0..1_000)
        .filter(|n| n % 2 == 1)
        .map(|n| format!("[{}]", n))
        .collect();
    assert_eq!(indices, expected);
}
