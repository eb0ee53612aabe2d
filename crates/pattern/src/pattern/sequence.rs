use crate::cursor::SearchCursor;
use crate::haystack::{Haystack, SliceHaystack};
use crate::pattern::empty::EmptyNeedle;
use crate::pattern::{Pattern, ReverseSearcher, Searcher};
use crate::result::Match;

/// Matches a run of elements equal to the wrapped sub-sequence.
///
/// An empty sub-sequence matches the empty range at every offset, both ends included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequence<'p, T>(pub &'p [T]);

pub struct SequenceSearcher<'p, H: Haystack> {
    raw: H::Raw,
    cursor: SearchCursor,
    needle: &'p [H::Element],
    empty: Option<EmptyNeedle>,
}

impl<'p, T, H> Pattern<H> for Sequence<'p, T>
where
    T: PartialEq,
    H: SliceHaystack<Element = T>,
{
    type Searcher = SequenceSearcher<'p, H>;

    fn into_searcher(self, haystack: H) -> Self::Searcher {
        let raw = haystack.into_raw();
        log::trace!("Sequence search for {} elements in {}", self.0.len(), H::raw_len(&raw));

        SequenceSearcher {
            cursor: SearchCursor::new(H::raw_len(&raw)),
            raw,
            needle: self.0,
            empty: self.0.is_empty().then(EmptyNeedle::new),
        }
    }

    fn is_prefix_of(self, haystack: H) -> bool {
        let raw = haystack.into_raw();
        unsafe { H::elements(&raw, 0, H::raw_len(&raw)) }.starts_with(self.0)
    }

    fn is_suffix_of(self, haystack: H) -> bool {
        let raw = haystack.into_raw();
        unsafe { H::elements(&raw, 0, H::raw_len(&raw)) }.ends_with(self.0)
    }
}

unsafe impl<'p, T, H> Searcher<H> for SequenceSearcher<'p, H>
where
    T: PartialEq,
    H: SliceHaystack<Element = T>,
{
    fn haystack(&self) -> H::Raw {
        self.raw
    }

    fn next_match(&mut self) -> Option<Match> {
        let raw = self.raw;
        if let Some(empty) = self.empty.as_mut() {
            return empty.next_match::<H>(&raw, &mut self.cursor);
        }

        let front = self.cursor.front();
        let window = unsafe { H::elements(&raw, front, self.cursor.back()) };

        match window.windows(self.needle.len()).position(|w| w == self.needle) {
            Some(position) => {
                let found = Match::new(front + position, front + position + self.needle.len());
                self.cursor.advance_front_to(found.end);
                Some(found)
            },
            None => {
                self.cursor.exhaust_front();
                None
            },
        }
    }

    fn next_reject(&mut self) -> Option<Match> {
        let raw = self.raw;
        if let Some(empty) = self.empty.as_mut() {
            return empty.next_reject::<H>(&raw, &mut self.cursor);
        }

        while !self.cursor.is_exhausted() {
            let front = self.cursor.front();
            let window = unsafe { H::elements(&raw, front, self.cursor.back()) };

            if window.starts_with(self.needle) {
                self.cursor.advance_front_to(front + self.needle.len());
                continue;
            }

            self.cursor.advance_front_to(front + 1);
            return Some(Match::new(front, front + 1));
        }

        None
    }
}

unsafe impl<'p, T, H> ReverseSearcher<H> for SequenceSearcher<'p, H>
where
    T: PartialEq,
    H: SliceHaystack<Element = T>,
{
    fn next_match_back(&mut self) -> Option<Match> {
        let raw = self.raw;
        if let Some(empty) = self.empty.as_mut() {
            return empty.next_match_back::<H>(&raw, &mut self.cursor);
        }

        let front = self.cursor.front();
        let window = unsafe { H::elements(&raw, front, self.cursor.back()) };

        match window.windows(self.needle.len()).rposition(|w| w == self.needle) {
            Some(position) => {
                let found = Match::new(front + position, front + position + self.needle.len());
                self.cursor.retreat_back_to(found.start);
                Some(found)
            },
            None => {
                self.cursor.exhaust_back();
                None
            },
        }
    }

    fn next_reject_back(&mut self) -> Option<Match> {
        let raw = self.raw;
        if let Some(empty) = self.empty.as_mut() {
            return empty.next_reject_back::<H>(&raw, &mut self.cursor);
        }

        while !self.cursor.is_exhausted() {
            let back = self.cursor.back();
            let window = unsafe { H::elements(&raw, self.cursor.front(), back) };

            if window.ends_with(self.needle) {
                self.cursor.retreat_back_to(back - self.needle.len());
                continue;
            }

            self.cursor.retreat_back_to(back - 1);
            return Some(Match::new(back - 1, back));
        }

        None
    }
}
