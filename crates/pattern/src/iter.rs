use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::haystack::Haystack;
use crate::pattern::{DoubleEndedSearcher, ReverseSearcher, Searcher};
use crate::result::Match;

/// Matches of a pattern, front to back.
pub struct Matches<H, S> {
    searcher: S,
    _haystack: PhantomData<H>,
}

impl<H: Haystack, S: Searcher<H>> Matches<H, S> {
    pub(crate) fn new(searcher: S) -> Self {
        Self { searcher, _haystack: PhantomData }
    }
}

impl<H: Haystack, S: Searcher<H>> Iterator for Matches<H, S> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        self.searcher.next_match()
    }
}

impl<H: Haystack, S: DoubleEndedSearcher<H>> DoubleEndedIterator for Matches<H, S> {
    fn next_back(&mut self) -> Option<Match> {
        self.searcher.next_match_back()
    }
}

impl<H: Haystack, S: Searcher<H>> FusedIterator for Matches<H, S> {}

/// Matches of a pattern, back to front.
pub struct RMatches<H, S> {
    searcher: S,
    _haystack: PhantomData<H>,
}

impl<H: Haystack, S: ReverseSearcher<H>> RMatches<H, S> {
    pub(crate) fn new(searcher: S) -> Self {
        Self { searcher, _haystack: PhantomData }
    }
}

impl<H: Haystack, S: ReverseSearcher<H>> Iterator for RMatches<H, S> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        self.searcher.next_match_back()
    }
}

impl<H: Haystack, S: DoubleEndedSearcher<H>> DoubleEndedIterator for RMatches<H, S> {
    fn next_back(&mut self) -> Option<Match> {
        self.searcher.next_match()
    }
}

impl<H: Haystack, S: ReverseSearcher<H>> FusedIterator for RMatches<H, S> {}

/// Offset and sub-haystack of every match, front to back.
///
/// For `&mut [T]` haystacks the sub-slices are mutable; they never overlap each other.
pub struct MatchIndices<H, S> {
    searcher: S,
    _haystack: PhantomData<H>,
}

impl<H: Haystack, S: Searcher<H>> MatchIndices<H, S> {
    pub(crate) fn new(searcher: S) -> Self {
        Self { searcher, _haystack: PhantomData }
    }

    fn rebuild(&self, found: Match) -> (usize, H) {
        // Searchers only hand out non-overlapping ranges on boundaries
        let part = unsafe { H::range_to_self(self.searcher.haystack(), found.start, found.end) };
        (found.start, part)
    }
}

impl<H: Haystack, S: Searcher<H>> Iterator for MatchIndices<H, S> {
    type Item = (usize, H);

    fn next(&mut self) -> Option<(usize, H)> {
        let found = self.searcher.next_match()?;
        Some(self.rebuild(found))
    }
}

impl<H: Haystack, S: DoubleEndedSearcher<H>> DoubleEndedIterator for MatchIndices<H, S> {
    fn next_back(&mut self) -> Option<(usize, H)> {
        let found = self.searcher.next_match_back()?;
        Some(self.rebuild(found))
    }
}

impl<H: Haystack, S: Searcher<H>> FusedIterator for MatchIndices<H, S> {}

/// Segments between matches, front to back.
///
/// Adjacent matches and matches touching either end produce empty segments, so `n` matches
/// always give `n + 1` segments.
pub struct Split<H, S> {
    searcher: S,
    start: usize,
    end: usize,
    finished: bool,
    _haystack: PhantomData<H>,
}

impl<H: Haystack, S: Searcher<H>> Split<H, S> {
    pub(crate) fn new(searcher: S) -> Self {
        let end = H::raw_len(&searcher.haystack());

        Self {
            searcher,
            start: 0,
            end,
            finished: false,
            _haystack: PhantomData,
        }
    }

    fn segment(&self, start: usize, end: usize) -> H {
        // Segments lie between matches and never overlap each other
        unsafe { H::range_to_self(self.searcher.haystack(), start, end) }
    }

    fn remainder(&mut self) -> Option<H> {
        if self.finished {
            return None;
        }

        self.finished = true;
        Some(self.segment(self.start, self.end))
    }

    fn next_segment(&mut self) -> Option<H> {
        if self.finished {
            return None;
        }

        match self.searcher.next_match() {
            Some(found) => {
                let part = self.segment(self.start, found.start);
                self.start = found.end;
                Some(part)
            },
            None => self.remainder(),
        }
    }
}

impl<H: Haystack, S: ReverseSearcher<H>> Split<H, S> {
    fn next_segment_back(&mut self) -> Option<H> {
        if self.finished {
            return None;
        }

        match self.searcher.next_match_back() {
            Some(found) => {
                let part = self.segment(found.end, self.end);
                self.end = found.start;
                Some(part)
            },
            None => self.remainder(),
        }
    }
}

impl<H: Haystack, S: Searcher<H>> Iterator for Split<H, S> {
    type Item = H;

    fn next(&mut self) -> Option<H> {
        self.next_segment()
    }
}

impl<H: Haystack, S: DoubleEndedSearcher<H>> DoubleEndedIterator for Split<H, S> {
    fn next_back(&mut self) -> Option<H> {
        self.next_segment_back()
    }
}

impl<H: Haystack, S: Searcher<H>> FusedIterator for Split<H, S> {}

/// Segments between matches, back to front.
pub struct RSplit<H, S> {
    inner: Split<H, S>,
}

impl<H: Haystack, S: ReverseSearcher<H>> RSplit<H, S> {
    pub(crate) fn new(searcher: S) -> Self {
        Self { inner: Split::new(searcher) }
    }
}

impl<H: Haystack, S: ReverseSearcher<H>> Iterator for RSplit<H, S> {
    type Item = H;

    fn next(&mut self) -> Option<H> {
        self.inner.next_segment_back()
    }
}

impl<H: Haystack, S: DoubleEndedSearcher<H>> DoubleEndedIterator for RSplit<H, S> {
    fn next_back(&mut self) -> Option<H> {
        self.inner.next_segment()
    }
}

impl<H: Haystack, S: ReverseSearcher<H>> FusedIterator for RSplit<H, S> {}

#[cfg(test)]
mod tests {
    use crate::pattern::{Element, Sequence};
    use crate::search;

    #[test]
    fn split_meets_in_the_middle() {
        let haystack: &[u8] = b"a,b,c,d";
        let mut parts = search::split(haystack, Element(b','));

        assert_eq!(parts.next(), Some(&b"a"[..]));
        assert_eq!(parts.next_back(), Some(&b"d"[..]));
        assert_eq!(parts.next(), Some(&b"b"[..]));
        assert_eq!(parts.next_back(), Some(&b"c"[..]));
        assert_eq!(parts.next(), None);
        assert_eq!(parts.next_back(), None);
    }

    #[test]
    fn split_without_matches_yields_the_whole_haystack() {
        let haystack: &[u8] = b"abc";

        assert_eq!(search::split(haystack, Element(b',')).collect::<Vec<_>>(), vec![&b"abc"[..]]);
        assert_eq!(search::split(&b""[..], Element(b',')).collect::<Vec<_>>(), vec![&b""[..]]);
    }

    #[test]
    fn split_stays_exhausted() {
        let haystack: &[u8] = b"a,b";
        let mut parts = search::split(haystack, Element(b','));

        assert_eq!(parts.by_ref().count(), 2);
        assert_eq!(parts.next(), None);
        assert_eq!(parts.next(), None);
    }

    #[test]
    fn rsplit_reverses_to_split() {
        let haystack: &[u8] = b"x--y----z";
        let mut forward = search::split(haystack, Sequence(b"--")).collect::<Vec<_>>();
        let backward = search::rsplit(haystack, Sequence(b"--")).collect::<Vec<_>>();

        forward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn match_indices_on_mutable_slices_allow_patching() {
        let mut slice = *b"banana";

        {
            let indices = search::match_indices(&mut slice[..], Element(b'a')).collect::<Vec<_>>();
            assert_eq!(indices.iter().map(|x| x.0).collect::<Vec<_>>(), vec![1, 3, 5]);

            for (_, part) in indices {
                part[0] = b'i';
            }
        }

        assert_eq!(&slice, b"binini");
    }

    #[test]
    fn match_indices_from_both_ends_hand_out_disjoint_slices() {
        let mut values = [1, 0, 1, 0, 1];
        let mut indices = search::match_indices(&mut values[..], Element(1));

        let (first, front) = indices.next().unwrap();
        let (last, back) = indices.next_back().unwrap();
        front[0] = 10;
        back[0] = 50;

        assert_eq!((first, last), (0, 4));
        assert_eq!(indices.count(), 1);
        assert_eq!(values, [10, 0, 1, 0, 50]);
    }

    #[test]
    fn reverse_matches_can_turn_around() {
        let haystack: &[u8] = b"xaxbx";
        let mut matches = search::search_from_end(haystack, Element(b'x'));

        assert_eq!(matches.next().map(|m| m.start), Some(4));
        assert_eq!(matches.next_back().map(|m| m.start), Some(0));
        assert_eq!(matches.next().map(|m| m.start), Some(2));
        assert_eq!(matches.next(), None);
    }
}
