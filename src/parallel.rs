//! Parallel merging of failure aggregates.
//!
//! Decoders that check the elements of a large array on several threads end
//! up with one aggregate per failing element. [`par_concat_all`] joins them
//! with rayon while keeping the elements' original order.

use rayon::prelude::*;

use crate::free_semigroup::FreeSemigroup;

/// Concatenates `aggregates` in order, splitting the work across rayon's pool.
///
/// Returns `None` for an empty input. Because concatenation is associative,
/// the result flattens to the same sequence as
/// [`FreeSemigroup::concat_all`]; only the grouping of the tree differs.
///
/// # Example
///
/// ```rust
/// use faultline::parallel::par_concat_all;
/// use faultline::FreeSemigroup;
///
/// let parts: Vec<_> = (0..1_000).map(FreeSemigroup::of).collect();
/// let joined = par_concat_all(parts).unwrap();
///
/// assert_eq!(joined.into_vec(), (0..1_000).collect::<Vec<_>>());
/// ```
pub fn par_concat_all<A>(aggregates: Vec<FreeSemigroup<A>>) -> Option<FreeSemigroup<A>>
where
    A: Send,
{
    tracing::debug!(count = aggregates.len(), "merging aggregates in parallel");
    aggregates.into_par_iter().reduce_with(FreeSemigroup::concat)
}
