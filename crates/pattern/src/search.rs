//! Entry points tying a haystack and a pattern together.
//!
//! All of these consume the haystack. Passing `&mut [T]` moves the exclusive borrow into the
//! returned iterator, so the borrow checker rejects any other access to the same memory for as
//! long as the search is alive.

use crate::haystack::Haystack;
use crate::iter::{MatchIndices, Matches, RMatches, RSplit, Split};
use crate::pattern::{Pattern, ReverseSearcher, Searcher};
use crate::result::Match;

/// Every non-overlapping match of `pattern`, leftmost first.
///
/// Iterating from the back is available when the searcher finds the same matches in both
/// directions.
pub fn search<H, P>(haystack: H, pattern: P) -> Matches<H, P::Searcher>
where
    H: Haystack,
    P: Pattern<H>,
{
    Matches::new(pattern.into_searcher(haystack))
}

/// Every non-overlapping match of `pattern`, rightmost first.
///
/// For sub-sequence patterns this can differ from [`search`] reversed: `"aa"` in `"aaa"` is
/// found at `1..3` here.
pub fn search_from_end<H, P>(haystack: H, pattern: P) -> RMatches<H, P::Searcher>
where
    H: Haystack,
    P: Pattern<H>,
    P::Searcher: ReverseSearcher<H>,
{
    RMatches::new(pattern.into_searcher(haystack))
}

/// Like [`search`], yielding the offset and the matched part of the haystack itself.
pub fn match_indices<H, P>(haystack: H, pattern: P) -> MatchIndices<H, P::Searcher>
where
    H: Haystack,
    P: Pattern<H>,
{
    MatchIndices::new(pattern.into_searcher(haystack))
}

/// The parts of the haystack between matches.
///
/// `n` matches always produce `n + 1` parts; a haystack without matches yields itself once.
pub fn split<H, P>(haystack: H, pattern: P) -> Split<H, P::Searcher>
where
    H: Haystack,
    P: Pattern<H>,
{
    Split::new(pattern.into_searcher(haystack))
}

/// The parts of the haystack between matches, last part first.
pub fn rsplit<H, P>(haystack: H, pattern: P) -> RSplit<H, P::Searcher>
where
    H: Haystack,
    P: Pattern<H>,
    P::Searcher: ReverseSearcher<H>,
{
    RSplit::new(pattern.into_searcher(haystack))
}

pub fn find<H, P>(haystack: H, pattern: P) -> Option<Match>
where
    H: Haystack,
    P: Pattern<H>,
{
    pattern.into_searcher(haystack).next_match()
}

pub fn rfind<H, P>(haystack: H, pattern: P) -> Option<Match>
where
    H: Haystack,
    P: Pattern<H>,
    P::Searcher: ReverseSearcher<H>,
{
    pattern.into_searcher(haystack).next_match_back()
}

pub fn contains<H, P>(haystack: H, pattern: P) -> bool
where
    H: Haystack,
    P: Pattern<H>,
{
    pattern.is_contained_in(haystack)
}

pub fn starts_with<H, P>(haystack: H, pattern: P) -> bool
where
    H: Haystack,
    P: Pattern<H>,
{
    pattern.is_prefix_of(haystack)
}

pub fn ends_with<H, P>(haystack: H, pattern: P) -> bool
where
    H: Haystack,
    P: Pattern<H>,
    P::Searcher: ReverseSearcher<H>,
{
    pattern.is_suffix_of(haystack)
}

/// Haystack with every leading match of `pattern` removed.
pub fn trim_start_matches<H, P>(haystack: H, pattern: P) -> H
where
    H: Haystack,
    P: Pattern<H>,
{
    let mut searcher = pattern.into_searcher(haystack);
    let raw = searcher.haystack();
    let len = H::raw_len(&raw);
    let start = searcher.next_reject().map_or(len, |r| r.start);
    drop(searcher);

    log::trace!("Trimmed {} leading elements", start);
    unsafe { H::range_to_self(raw, start, len) }
}

/// Haystack with every trailing match of `pattern` removed.
pub fn trim_end_matches<H, P>(haystack: H, pattern: P) -> H
where
    H: Haystack,
    P: Pattern<H>,
    P::Searcher: ReverseSearcher<H>,
{
    let mut searcher = pattern.into_searcher(haystack);
    let raw = searcher.haystack();
    let len = H::raw_len(&raw);
    let end = searcher.next_reject_back().map_or(0, |r| r.end);
    drop(searcher);

    log::trace!("Trimmed {} trailing elements", len - end);
    unsafe { H::range_to_self(raw, 0, end) }
}

#[cfg(test)]
mod tests {
    use crate::pattern::{Element, MaskedPattern, Predicate, Sequence};
    use crate::result::Match;
    use crate::search;

    #[test]
    fn search_yields_leftmost_non_overlapping_matches() {
        let haystack: &[u8] = b"abcabc";
        let matches = search::search(haystack, Sequence(b"bc")).collect::<Vec<_>>();

        assert_eq!(matches, vec![Match::new(1, 3), Match::new(4, 6)]);
    }

    #[test]
    fn matches_increase_and_satisfy_the_pattern() {
        let haystack: &[u8] = b"abababa-aba-ab-bab";
        let needle: &[u8] = b"aba";
        let matches = search::search(haystack, Sequence(needle)).collect::<Vec<_>>();

        assert_eq!(matches.len(), 3);
        for m in &matches {
            assert!(m.end <= haystack.len());
            assert_eq!(&haystack[m.range()], needle);
        }
        for pair in matches.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn search_from_end_yields_rightmost_first() {
        let haystack: &[u8] = b"abcabc";
        let matches = search::search_from_end(haystack, Sequence(b"bc")).collect::<Vec<_>>();

        assert_eq!(matches, vec![Match::new(4, 6), Match::new(1, 3)]);
    }

    #[test]
    fn search_without_matches_is_empty() {
        let haystack: &[u8] = b"abc";

        assert_eq!(search::search(haystack, Element(b'z')).count(), 0);
        assert_eq!(search::find(haystack, Element(b'z')), None);
        assert_eq!(search::rfind(haystack, Element(b'z')), None);
    }

    #[test]
    fn find_and_rfind_pick_the_outermost_matches() {
        let haystack: &[u8] = b"xaxax";

        assert_eq!(search::find(haystack, Element(b'a')), Some(Match::new(1, 2)));
        assert_eq!(search::rfind(haystack, Element(b'a')), Some(Match::new(3, 4)));
    }

    #[test]
    fn split_and_matches_rebuild_the_haystack() {
        let haystack: &[u8] = b"key=value==x=";
        let parts = search::split(haystack, Element(b'=')).collect::<Vec<_>>();
        let matches = search::search(haystack, Element(b'=')).collect::<Vec<_>>();

        assert_eq!(parts.len(), matches.len() + 1);

        let mut rebuilt = Vec::new();
        for (i, part) in parts.iter().enumerate() {
            rebuilt.extend_from_slice(part);
            if let Some(m) = matches.get(i) {
                rebuilt.extend_from_slice(&haystack[m.range()]);
            }
        }
        assert_eq!(rebuilt, haystack);
    }

    #[test]
    fn split_yields_empty_segments_at_the_edges() {
        let haystack: &[u8] = b",a,";
        let parts = search::split(haystack, Element(b',')).collect::<Vec<_>>();

        assert_eq!(parts, vec![&b""[..], &b"a"[..], &b""[..]]);
    }

    #[test]
    fn split_of_empty_haystack_yields_one_empty_segment() {
        let haystack: &[u8] = b"";

        assert_eq!(search::split(haystack, Sequence(b"ab")).collect::<Vec<_>>(), vec![&b""[..]]);
    }

    #[test]
    fn match_indices_patch_mutable_haystacks() {
        let mut data = *b"banana";

        for (_, part) in search::match_indices(&mut data[..], Element(b'a')) {
            part[0] = b'i';
        }

        assert_eq!(&data, b"binini");
    }

    #[test]
    fn split_on_mutable_haystack_with_masked_pattern() {
        let pattern = MaskedPattern::from_pattern_str("00 ??").unwrap();
        let mut data = [1, 2, 0, 9, 3, 0, 9];

        let mut lengths = Vec::new();
        for part in search::split(&mut data[..], &pattern) {
            lengths.push(part.len());
            part.iter_mut().for_each(|b| *b *= 10);
        }

        assert_eq!(lengths, vec![2, 1, 0]);
        assert_eq!(data, [10, 20, 0, 9, 30, 0, 9]);
    }

    #[test]
    fn trim_removes_runs_of_matches() {
        let haystack: &[i32] = &[0, 0, 1, 2, 0];
        let zero = |n: &i32| *n == 0;

        assert_eq!(search::trim_start_matches(haystack, Predicate(zero)), &[1, 2, 0]);
        assert_eq!(search::trim_end_matches(haystack, Predicate(zero)), &[0, 0, 1, 2]);
    }

    #[test]
    fn trim_of_all_matching_haystack_is_empty() {
        let haystack: &[u8] = b"aaaa";

        assert!(search::trim_start_matches(haystack, Element(b'a')).is_empty());
        assert!(search::trim_end_matches(haystack, Element(b'a')).is_empty());
    }

    #[test]
    fn trim_on_mutable_haystack_leaves_the_rest_writable() {
        let mut data = *b"--ab--";

        let middle = search::trim_start_matches(&mut data[..], Element(b'-'));
        let middle = search::trim_end_matches(middle, Element(b'-'));
        middle.copy_from_slice(b"AB");

        assert_eq!(&data, b"--AB--");
    }

    #[test]
    fn affix_checks_on_empty_haystack() {
        let haystack: &[u8] = b"";

        assert!(!search::starts_with(haystack, Element(b'a')));
        assert!(!search::ends_with(haystack, Sequence(b"a")));
        assert!(search::starts_with(haystack, Sequence(b"")));
        assert!(search::contains(haystack, Sequence(b"")));
        assert!(!search::contains(haystack, Sequence(b"a")));
    }
}
