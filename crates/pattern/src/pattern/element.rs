use crate::cursor::SearchCursor;
use crate::haystack::{Haystack, SliceHaystack};
use crate::pattern::{DoubleEndedSearcher, Pattern, ReverseSearcher, Searcher};
use crate::result::Match;

/// Rule deciding whether a single element matches.
pub trait ElementMatcher<T> {
    fn matches(&mut self, element: &T) -> bool;
}

/// Matches one element equal to the wrapped value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element<T>(pub T);

/// Matches one element contained in the wrapped set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnyOf<'p, T>(pub &'p [T]);

/// Matches one element the wrapped function accepts.
#[derive(Debug, Clone, Copy)]
pub struct Predicate<F>(pub F);

impl<T: PartialEq> ElementMatcher<T> for Element<T> {
    fn matches(&mut self, element: &T) -> bool {
        self.0 == *element
    }
}

impl<'p, T: PartialEq> ElementMatcher<T> for AnyOf<'p, T> {
    fn matches(&mut self, element: &T) -> bool {
        self.0.contains(element)
    }
}

impl<T, F: FnMut(&T) -> bool> ElementMatcher<T> for Predicate<F> {
    fn matches(&mut self, element: &T) -> bool {
        (self.0)(element)
    }
}

pub struct ElementSearcher<H: Haystack, M> {
    raw: H::Raw,
    cursor: SearchCursor,
    matcher: M,
}

impl<H: SliceHaystack, M: ElementMatcher<H::Element>> ElementSearcher<H, M> {
    pub fn new(haystack: H, matcher: M) -> Self {
        let raw = haystack.into_raw();

        Self {
            cursor: SearchCursor::new(H::raw_len(&raw)),
            raw,
            matcher,
        }
    }

    /// Position of the first element in the unsearched window for which the matcher returns
    /// `expected`, and moves the front past it.
    fn scan_front(&mut self, expected: bool) -> Option<Match> {
        let raw = self.raw;
        let front = self.cursor.front();
        let window = unsafe { H::elements(&raw, front, self.cursor.back()) };

        match window.iter().position(|e| self.matcher.matches(e) == expected) {
            Some(position) => {
                let found = Match::new(front + position, front + position + 1);
                self.cursor.advance_front_to(found.end);
                Some(found)
            },
            None => {
                self.cursor.exhaust_front();
                None
            },
        }
    }

    fn scan_back(&mut self, expected: bool) -> Option<Match> {
        let raw = self.raw;
        let front = self.cursor.front();
        let window = unsafe { H::elements(&raw, front, self.cursor.back()) };

        match window.iter().rposition(|e| self.matcher.matches(e) == expected) {
            Some(position) => {
                let found = Match::new(front + position, front + position + 1);
                self.cursor.retreat_back_to(found.start);
                Some(found)
            },
            None => {
                self.cursor.exhaust_back();
                None
            },
        }
    }
}

unsafe impl<H: SliceHaystack, M: ElementMatcher<H::Element>> Searcher<H> for ElementSearcher<H, M> {
    fn haystack(&self) -> H::Raw {
        self.raw
    }

    fn next_match(&mut self) -> Option<Match> {
        self.scan_front(true)
    }

    fn next_reject(&mut self) -> Option<Match> {
        self.scan_front(false)
    }
}

unsafe impl<H: SliceHaystack, M: ElementMatcher<H::Element>> ReverseSearcher<H> for ElementSearcher<H, M> {
    fn next_match_back(&mut self) -> Option<Match> {
        self.scan_back(true)
    }

    fn next_reject_back(&mut self) -> Option<Match> {
        self.scan_back(false)
    }
}

impl<H: SliceHaystack, M: ElementMatcher<H::Element>> DoubleEndedSearcher<H> for ElementSearcher<H, M> {}

macro_rules! element_pattern {
    ($ty:ty, $($bounds:tt)*) => {
        impl<$($bounds)*> Pattern<H> for $ty {
            type Searcher = ElementSearcher<H, Self>;

            fn into_searcher(self, haystack: H) -> Self::Searcher {
                ElementSearcher::new(haystack, self)
            }

            fn is_prefix_of(mut self, haystack: H) -> bool {
                let raw = haystack.into_raw();
                let window = unsafe { H::elements(&raw, 0, H::raw_len(&raw)) };
                window.first().is_some_and(|e| self.matches(e))
            }

            fn is_suffix_of(mut self, haystack: H) -> bool {
                let raw = haystack.into_raw();
                let window = unsafe { H::elements(&raw, 0, H::raw_len(&raw)) };
                window.last().is_some_and(|e| self.matches(e))
            }
        }
    };
}

element_pattern!(Element<T>, T: PartialEq, H: SliceHaystack<Element = T>);
element_pattern!(AnyOf<'p, T>, 'p, T: PartialEq, H: SliceHaystack<Element = T>);
element_pattern!(Predicate<F>, T, F: FnMut(&T) -> bool, H: SliceHaystack<Element = T>);

#[cfg(test)]
mod tests {
    use crate::pattern::{AnyOf, Element, Predicate};
    use crate::result::Match;
    use crate::search;

    #[test]
    fn element_search_finds_every_occurrence() {
        let haystack: &[u8] = b"banana";
        let result = search::search(haystack, Element(b'a')).collect::<Vec<_>>();

        assert_eq!(result, vec![Match::new(1, 2), Match::new(3, 4), Match::new(5, 6)]);
    }

    #[test]
    fn element_search_behaves_with_empty_slice() {
        let haystack: &[u32] = &[];

        assert_eq!(search::find(haystack, Element(7)), None);
        assert!(!search::starts_with(haystack, Element(7)));
        assert!(!search::ends_with(haystack, Element(7)));
    }

    #[test]
    fn element_search_meets_in_the_middle() {
        let haystack: &[i32] = &[1, 0, 1, 0, 1];
        let mut matches = search::search(haystack, Element(1));

        assert_eq!(matches.next(), Some(Match::new(0, 1)));
        assert_eq!(matches.next_back(), Some(Match::new(4, 5)));
        assert_eq!(matches.next_back(), Some(Match::new(2, 3)));
        assert_eq!(matches.next(), None);
        assert_eq!(matches.next_back(), None);
    }

    #[test]
    fn any_of_matches_set_members() {
        let haystack: &[char] = &['x', 'a', 'y', 'b', 'z'];
        let result = search::search(haystack, AnyOf(&['a', 'b'])).map(|m| m.start).collect::<Vec<_>>();

        assert_eq!(result, vec![1, 3]);
    }

    #[test]
    fn predicate_runs_against_each_element() {
        let haystack: &[i64] = &[3, -1, 4, -1, -5, 9];
        let result = search::search_from_end(haystack, Predicate(|n: &i64| *n < 0))
            .map(|m| m.start)
            .collect::<Vec<_>>();

        assert_eq!(result, vec![4, 3, 1]);
    }

    #[test]
    fn element_prefix_and_suffix_checks() {
        let haystack: &[u8] = b"abca";

        assert!(search::starts_with(haystack, Element(b'a')));
        assert!(search::ends_with(haystack, Element(b'a')));
        assert!(!search::starts_with(haystack, Element(b'b')));
        assert!(search::contains(haystack, Element(b'c')));
        assert!(!search::contains(haystack, Element(b'd')));
    }

    #[test]
    fn element_trim_skips_matching_ends() {
        let haystack: &[u8] = b"  hi  ";

        assert_eq!(search::trim_start_matches(haystack, Element(b' ')), b"hi  ");
        assert_eq!(search::trim_end_matches(haystack, Element(b' ')), b"  hi");
        assert_eq!(search::trim_start_matches(&b"    "[..], Element(b' ')), b"");
    }

    #[test]
    fn element_split_on_mutable_slices_hands_out_disjoint_parts() {
        let mut data = *b"hangman";

        for part in search::split(&mut data[..], Element(b'a')) {
            for byte in part {
                *byte = b'-';
            }
        }

        assert_eq!(&data, b"-a---a-");
    }
}
