//! A non-empty collection with constant-time concatenation.
//!
//! This module provides [`FreeSemigroup`], the aggregate used to collect
//! sibling failures while a value is being decoded. Combining two aggregates
//! only allocates a new branch node; flattening is deferred until the tree is
//! consumed with [`FreeSemigroup::fold`] or one of the iterators built on it.

use stillwater::prelude::*;

/// A non-empty binary tree of values, combined lazily.
///
/// `FreeSemigroup` has exactly two shapes: a single value ([`Of`]) or two
/// aggregates joined together ([`Concat`]). There is no empty shape, so every
/// aggregate holds at least one value by construction.
///
/// Concatenation is O(1) and never inspects either side. The observable
/// content of an aggregate is the left-to-right sequence of its `Of` leaves,
/// which makes concatenation associative: different groupings of the same
/// operands produce different trees but identical sequences.
///
/// # Example
///
/// ```rust
/// use faultline::FreeSemigroup;
/// use stillwater::prelude::*;
///
/// let errors = FreeSemigroup::of("name is required")
///     .combine(FreeSemigroup::of("age must be positive"));
///
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors.to_vec(), vec![&"name is required", &"age must be positive"]);
/// ```
///
/// # Depth
///
/// Traversals ([`fold`], [`iter`], [`into_vec`]) use an explicit work stack
/// and handle trees of any depth. Dropping an aggregate, as well as the
/// derived `Clone`, `PartialEq` and `Debug`, recurse once per level of
/// nesting. A tree is as deep as the longest run of combines in one
/// direction, so a report built by combining failures one at a time is as
/// deep as it is long. On a default 2 MiB thread stack, dropping a tree a
/// million levels deep overflows; keep implicit drops to trees of at most a
/// few hundred thousand levels, and release deeper ones with [`into_vec`].
///
/// [`Of`]: FreeSemigroup::Of
/// [`Concat`]: FreeSemigroup::Concat
/// [`fold`]: FreeSemigroup::fold
/// [`iter`]: FreeSemigroup::iter
/// [`into_vec`]: FreeSemigroup::into_vec
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreeSemigroup<A> {
    /// A single value.
    Of(A),
    /// Two aggregates joined left to right.
    Concat(Box<FreeSemigroup<A>>, Box<FreeSemigroup<A>>),
}

/// Pending work for the iterative fold.
enum Step<'a, A> {
    Visit(&'a FreeSemigroup<A>),
    Join,
}

impl<A> FreeSemigroup<A> {
    /// Wraps a single value.
    pub fn of(value: A) -> Self {
        FreeSemigroup::Of(value)
    }

    /// Joins two aggregates, `left` first.
    ///
    /// This is the semigroup operation; [`Semigroup::combine`] delegates here.
    pub fn concat(left: Self, right: Self) -> Self {
        FreeSemigroup::Concat(Box::new(left), Box::new(right))
    }

    /// Builds an aggregate from a vector, or `None` if the vector is empty.
    ///
    /// The resulting sequence preserves the vector's order.
    pub fn from_vec(values: Vec<A>) -> Option<Self> {
        Self::concat_all(values.into_iter().map(FreeSemigroup::of))
    }

    /// Concatenates every aggregate yielded by `aggregates`, in order.
    ///
    /// Returns `None` when the iterator is empty; an empty aggregate cannot
    /// be represented.
    pub fn concat_all<I>(aggregates: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        aggregates.into_iter().reduce(Self::concat)
    }

    /// Reduces the tree to a single value.
    ///
    /// `on_of` is applied to every leaf and `on_concat` to the results of the
    /// left and right subtrees of every branch. Leaves are visited depth-first
    /// from left to right, so `on_of` observes values in insertion order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use faultline::FreeSemigroup;
    ///
    /// let numbers = FreeSemigroup::concat(
    ///     FreeSemigroup::of(1),
    ///     FreeSemigroup::concat(FreeSemigroup::of(2), FreeSemigroup::of(3)),
    /// );
    ///
    /// let rendered = numbers.fold(|n| n.to_string(), |l, r| format!("({} {})", l, r));
    /// assert_eq!(rendered, "(1 (2 3))");
    /// ```
    pub fn fold<R, F, G>(&self, mut on_of: F, mut on_concat: G) -> R
    where
        F: FnMut(&A) -> R,
        G: FnMut(R, R) -> R,
    {
        let mut steps = vec![Step::Visit(self)];
        let mut results: Vec<R> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(FreeSemigroup::Of(value)) => results.push(on_of(value)),
                Step::Visit(FreeSemigroup::Concat(left, right)) => {
                    steps.push(Step::Join);
                    steps.push(Step::Visit(&**right));
                    steps.push(Step::Visit(&**left));
                }
                Step::Join => match (results.pop(), results.pop()) {
                    (Some(right), Some(left)) => results.push(on_concat(left, right)),
                    _ => unreachable!("a join always follows both of its subtrees"),
                },
            }
        }

        match results.pop() {
            Some(result) => result,
            None => unreachable!("a non-empty tree always folds to a value"),
        }
    }

    /// Returns an iterator over the values, left to right.
    pub fn iter(&self) -> Iter<'_, A> {
        Iter {
            pending: vec![self],
        }
    }

    /// Returns the number of values in the aggregate.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns false since an aggregate is never empty.
    ///
    /// This method exists for API consistency but always returns false.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the leftmost value.
    pub fn first(&self) -> &A {
        let mut node = self;
        loop {
            match node {
                FreeSemigroup::Of(value) => return value,
                FreeSemigroup::Concat(left, _) => node = &**left,
            }
        }
    }

    /// Collects references to the values, left to right.
    pub fn to_vec(&self) -> Vec<&A> {
        self.iter().collect()
    }

    /// Flattens the aggregate into its values, left to right.
    ///
    /// Each branch is taken apart as it is visited, so this also releases a
    /// tree of any depth without recursion.
    pub fn into_vec(self) -> Vec<A> {
        let mut values = Vec::new();
        let mut pending = vec![self];

        while let Some(node) = pending.pop() {
            match node {
                FreeSemigroup::Of(value) => values.push(value),
                FreeSemigroup::Concat(left, right) => {
                    pending.push(*right);
                    pending.push(*left);
                }
            }
        }

        values
    }

    /// Applies `f` to every value, keeping the shape of the tree.
    pub fn map<B, F>(&self, mut f: F) -> FreeSemigroup<B>
    where
        F: FnMut(&A) -> B,
    {
        self.fold(|value| FreeSemigroup::of(f(value)), FreeSemigroup::concat)
    }
}

impl<A> Semigroup for FreeSemigroup<A> {
    fn combine(self, other: Self) -> Self {
        FreeSemigroup::concat(self, other)
    }
}

impl<A> From<A> for FreeSemigroup<A> {
    fn from(value: A) -> Self {
        FreeSemigroup::of(value)
    }
}

/// Borrowing iterator over the values of a [`FreeSemigroup`].
///
/// Created by [`FreeSemigroup::iter`].
pub struct Iter<'a, A> {
    pending: Vec<&'a FreeSemigroup<A>>,
}

impl<'a, A> Iterator for Iter<'a, A> {
    type Item = &'a A;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.pending.pop() {
            match node {
                FreeSemigroup::Of(value) => return Some(value),
                FreeSemigroup::Concat(left, right) => {
                    self.pending.push(&**right);
                    self.pending.push(&**left);
                }
            }
        }
        None
    }
}

impl<A> IntoIterator for FreeSemigroup<A> {
    type Item = A;
    type IntoIter = std::vec::IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a, A> IntoIterator for &'a FreeSemigroup<A> {
    type Item = &'a A;
    type IntoIter = Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<FreeSemigroup<String>>();
    assert_sync::<FreeSemigroup<String>>();
};
