use crate::cursor::SearchCursor;
use crate::haystack::{next_boundary, previous_boundary, Haystack};
use crate::result::Match;

pub(crate) enum SearchStep {
    Match(Match),
    Reject(Match),
    Done,
}

/// State of an empty needle, which matches the empty range at every boundary including both
/// ends. Matches and single-boundary rejects alternate.
///
/// A flag is `false` right after its end matched and before it moved, which is how the boundary
/// where both ends meet is only matched once.
#[derive(Debug, Clone)]
pub(crate) struct EmptyNeedle {
    is_match_fw: bool,
    is_match_bw: bool,
    is_finished: bool,
}

impl EmptyNeedle {
    pub(crate) fn new() -> Self {
        Self {
            is_match_fw: true,
            is_match_bw: true,
            is_finished: false,
        }
    }

    pub(crate) fn next<H: Haystack>(&mut self, raw: &H::Raw, cursor: &mut SearchCursor) -> SearchStep {
        if self.is_finished {
            return SearchStep::Done;
        }

        let is_match = self.is_match_fw;
        self.is_match_fw = !self.is_match_fw;

        let position = cursor.front();
        if is_match {
            // The back already matched here when the ends met
            if cursor.is_exhausted() && !self.is_match_bw {
                self.is_finished = true;
                return SearchStep::Done;
            }

            return SearchStep::Match(Match::new(position, position));
        }

        if cursor.is_exhausted() {
            self.is_finished = true;
            return SearchStep::Done;
        }

        let next = next_boundary::<H>(raw, position, cursor.back());
        cursor.advance_front_to(next);
        SearchStep::Reject(Match::new(position, next))
    }

    pub(crate) fn next_back<H: Haystack>(&mut self, raw: &H::Raw, cursor: &mut SearchCursor) -> SearchStep {
        if self.is_finished {
            return SearchStep::Done;
        }

        let is_match = self.is_match_bw;
        self.is_match_bw = !self.is_match_bw;

        let position = cursor.back();
        if is_match {
            if cursor.is_exhausted() && !self.is_match_fw {
                self.is_finished = true;
                return SearchStep::Done;
            }

            return SearchStep::Match(Match::new(position, position));
        }

        if cursor.is_exhausted() {
            self.is_finished = true;
            return SearchStep::Done;
        }

        let previous = previous_boundary::<H>(raw, position, cursor.front());
        cursor.retreat_back_to(previous);
        SearchStep::Reject(Match::new(previous, position))
    }

    pub(crate) fn next_match<H: Haystack>(&mut self, raw: &H::Raw, cursor: &mut SearchCursor) -> Option<Match> {
        loop {
            match self.next::<H>(raw, cursor) {
                SearchStep::Match(m) => return Some(m),
                SearchStep::Reject(_) => continue,
                SearchStep::Done => return None,
            }
        }
    }

    pub(crate) fn next_reject<H: Haystack>(&mut self, raw: &H::Raw, cursor: &mut SearchCursor) -> Option<Match> {
        loop {
            match self.next::<H>(raw, cursor) {
                SearchStep::Reject(r) => return Some(r),
                SearchStep::Match(_) => continue,
                SearchStep::Done => return None,
            }
        }
    }

    pub(crate) fn next_match_back<H: Haystack>(&mut self, raw: &H::Raw, cursor: &mut SearchCursor) -> Option<Match> {
        loop {
            match self.next_back::<H>(raw, cursor) {
                SearchStep::Match(m) => return Some(m),
                SearchStep::Reject(_) => continue,
                SearchStep::Done => return None,
            }
        }
    }

    pub(crate) fn next_reject_back<H: Haystack>(&mut self, raw: &H::Raw, cursor: &mut SearchCursor) -> Option<Match> {
        loop {
            match self.next_back::<H>(raw, cursor) {
                SearchStep::Reject(r) => return Some(r),
                SearchStep::Match(_) => continue,
                SearchStep::Done => return None,
            }
        }
    }
}
