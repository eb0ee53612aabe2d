//! Pattern search over linear haystacks.
//!
//! A haystack is `&str`, `&[T]` or `&mut [T]`. Patterns range from single elements and
//! predicates to sub-sequences and masked byte signatures such as `"48 8B [?? ??] 05"`.
//! Searches yield half-open [`Match`] ranges and can also split the haystack between matches.
//!
//! ```
//! use seek_pattern::{search, Element, Match};
//!
//! let matches = search::search(&b"banana"[..], Element(b'a')).collect::<Vec<_>>();
//! assert_eq!(matches, vec![Match::new(1, 2), Match::new(3, 4), Match::new(5, 6)]);
//! ```

pub mod cell;
pub mod cursor;
pub mod error;
pub mod haystack;
pub mod iter;
pub mod pattern;
pub mod result;
pub mod search;

pub use cell::{
    CellMatches,
    ExclusiveMatches,
    HaystackCell,
    SearchGuard,
    SearchGuardMut,
    SharedMatches,
};
pub use cursor::SearchCursor;
pub use error::{Access, AliasingError, ConfigurationError};
pub use haystack::{Haystack, RawSliceMut, SliceHaystack};
pub use pattern::tokenizer::TokenizationError;
pub use pattern::{
    AnyOf,
    Ascii,
    CharPredicate,
    DoubleEndedSearcher,
    Element,
    MaskedPattern,
    Pattern,
    Predicate,
    ReverseSearcher,
    Searcher,
    Sequence,
};
pub use result::Match;
pub use search::{search, search_from_end, split};
