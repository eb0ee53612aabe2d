//! Matching rules and the searchers that apply them to a haystack.
//!
//! A [`Pattern`] is a stateless rule. Applying it to a haystack produces a [`Searcher`] which
//! walks the haystack and yields [`Match`]es, and the rejected ranges in between, by offset.
//! Searchers that can also walk from the end implement [`ReverseSearcher`]; when both directions
//! are guaranteed to find the same matches they also implement [`DoubleEndedSearcher`].

use crate::haystack::Haystack;
use crate::result::Match;

pub(crate) mod empty;
pub mod element;
pub mod masked;
pub(crate) mod parser;
pub mod sequence;
pub mod text;
pub mod tokenizer;

pub use element::{AnyOf, Element, ElementMatcher, ElementSearcher, Predicate};
pub use masked::{MaskedPattern, MaskedSearcher};
pub use sequence::{Sequence, SequenceSearcher};
pub use text::{
    Ascii,
    AsciiSearcher,
    CharPredicate,
    CharPredicateSearcher,
    CharSearcher,
    SubstringSearcher,
};

pub trait Pattern<H: Haystack>: Sized {
    type Searcher: Searcher<H>;

    fn into_searcher(self, haystack: H) -> Self::Searcher;

    /// Whether the pattern matches at the very start of the haystack.
    fn is_prefix_of(self, haystack: H) -> bool {
        matches!(self.into_searcher(haystack).next_match(), Some(m) if m.start == 0)
    }

    /// Whether the pattern matches at the very end of the haystack.
    fn is_suffix_of(self, haystack: H) -> bool
        where Self::Searcher: ReverseSearcher<H>
    {
        let mut searcher = self.into_searcher(haystack);
        let len = H::raw_len(&searcher.haystack());

        matches!(searcher.next_match_back(), Some(m) if m.end == len)
    }

    fn is_contained_in(self, haystack: H) -> bool {
        self.into_searcher(haystack).next_match().is_some()
    }
}

/// Walks a haystack front to back.
///
/// # Safety
///
/// Every range returned must lie within the haystack, start and end on boundaries, and come
/// after every range returned before it from this end of the searcher. Ranges returned from the
/// front never overlap ranges returned from the back.
pub unsafe trait Searcher<H: Haystack> {
    /// Storage handle of the haystack being searched.
    fn haystack(&self) -> H::Raw;

    fn next_match(&mut self) -> Option<Match>;

    /// Next range that does not match. Adjacent rejects may or may not be merged.
    fn next_reject(&mut self) -> Option<Match>;
}

/// Walks a haystack back to front.
///
/// # Safety
///
/// Same requirements as [`Searcher`], mirrored.
pub unsafe trait ReverseSearcher<H: Haystack>: Searcher<H> {
    fn next_match_back(&mut self) -> Option<Match>;

    fn next_reject_back(&mut self) -> Option<Match>;
}

/// Marker for searchers that find the same matches in both directions.
///
/// A single element can not overlap itself so element searchers qualify. `"aa"` in `"aaa"` is
/// found at `0` from the front and at `1` from the back, so sub-sequence searchers don't.
pub trait DoubleEndedSearcher<H: Haystack>: ReverseSearcher<H> {}
