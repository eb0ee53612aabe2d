use std::ops::Range;

/// The part of a haystack a searcher has not consumed yet.
///
/// Forward searching moves `front` up, reverse searching moves `back` down. The two never cross
/// and both stay within `0..=len` of the haystack the cursor was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchCursor {
    front: usize,
    back: usize,
}

impl SearchCursor {
    pub fn new(len: usize) -> Self {
        Self { front: 0, back: len }
    }

    pub fn front(&self) -> usize {
        self.front
    }

    pub fn back(&self) -> usize {
        self.back
    }

    pub fn range(&self) -> Range<usize> {
        self.front..self.back
    }

    pub fn remaining(&self) -> usize {
        self.back - self.front
    }

    pub fn is_exhausted(&self) -> bool {
        self.front == self.back
    }

    pub(crate) fn advance_front_to(&mut self, position: usize) {
        debug_assert!(position >= self.front && position <= self.back);
        self.front = position;
    }

    pub(crate) fn retreat_back_to(&mut self, position: usize) {
        debug_assert!(position >= self.front && position <= self.back);
        self.back = position;
    }

    /// Marks everything as searched from the front.
    pub(crate) fn exhaust_front(&mut self) {
        self.front = self.back;
    }

    /// Marks everything as searched from the back.
    pub(crate) fn exhaust_back(&mut self) {
        self.back = self.front;
    }
}

#[cfg(test)]
mod tests {
    use crate::cursor::SearchCursor;

    #[test]
    fn cursor_starts_covering_the_whole_haystack() {
        let cursor = SearchCursor::new(9);

        assert_eq!(cursor.range(), 0..9);
        assert_eq!(cursor.remaining(), 9);
        assert!(!cursor.is_exhausted());
    }

    #[test]
    fn cursor_ends_meet_when_exhausted() {
        let mut cursor = SearchCursor::new(9);
        cursor.advance_front_to(3);
        cursor.retreat_back_to(6);

        assert_eq!(cursor.range(), 3..6);

        cursor.exhaust_back();
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.front(), 3);
        assert_eq!(cursor.back(), 3);
    }

    #[test]
    fn empty_haystack_is_exhausted_immediately() {
        let mut cursor = SearchCursor::new(0);
        assert!(cursor.is_exhausted());

        cursor.exhaust_front();
        assert_eq!(cursor.range(), 0..0);
    }
}
