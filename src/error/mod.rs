//! Decode failure types.
//!
//! This module provides the failure tree a decoder builds while it walks an
//! input value: where each failure happened, and why.

mod decode_error;

pub use decode_error::{DecodeError, DecodeErrors, Kind, LeafFailure};
