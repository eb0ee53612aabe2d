use std::ops::Range;

use crate::cursor::SearchCursor;
use crate::error::ConfigurationError;
use crate::haystack::{Haystack, SliceHaystack};
use crate::pattern::{parser, Pattern, ReverseSearcher, Searcher};
use crate::result::Match;

/// Byte signature with wildcards and capture groups, e.g. `"48 8B [?? ??] 05"`.
///
/// Each position holds an expected byte and a mask; a haystack byte matches when it equals the
/// expected byte under the mask, so a zero mask is a wildcard.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedPattern {
    bytes: Vec<u8>,
    mask: Vec<u8>,
    capture_groups: Vec<Range<usize>>,
}

impl MaskedPattern {
    /// Parses a pattern string to a pattern used for searching.
    pub fn from_pattern_str(pattern: &str) -> Result<Self, ConfigurationError> {
        parser::parse_pattern(pattern)
    }

    /// Constructs a pattern from a byte vec. Assumes a mask where all bytes are matched.
    pub fn from_byte_vec(bytes: Vec<u8>) -> Result<Self, ConfigurationError> {
        let mask = vec![0xFFu8; bytes.len()];
        Self::new(bytes, mask, vec![])
    }

    /// Wraps `from_byte_vec` and copies the `bytes` slice.
    pub fn from_byte_slice(bytes: &[u8]) -> Result<Self, ConfigurationError> {
        Self::from_byte_vec(bytes.to_vec())
    }

    pub(crate) fn new(
        mut bytes: Vec<u8>,
        mask: Vec<u8>,
        capture_groups: Vec<Range<usize>>,
    ) -> Result<Self, ConfigurationError> {
        debug_assert_eq!(bytes.len(), mask.len());

        if bytes.is_empty() {
            return Err(ConfigurationError::EmptyPattern);
        }

        if mask.iter().all(|m| *m == 0) {
            return Err(ConfigurationError::NoMatchableBytes);
        }

        // Keep the expected bytes pre-masked so comparing is a single AND per byte
        for (b, m) in bytes.iter_mut().zip(mask.iter()) {
            *b &= *m;
        }

        Ok(Self { bytes, mask, capture_groups })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mask(&self) -> &[u8] {
        &self.mask
    }

    pub fn capture_groups(&self) -> &[Range<usize>] {
        &self.capture_groups
    }

    /// Whether `candidate` starts with bytes satisfying this pattern.
    pub fn matches_at(&self, candidate: &[u8]) -> bool {
        candidate.len() >= self.bytes.len() && candidate.iter()
            .zip(self.bytes.iter().zip(self.mask.iter()))
            .all(|(c, (b, m))| *c & *m == *b)
    }

    /// Capture group ranges of `found`, relative to the start of the haystack it was found in.
    pub fn captures(&self, found: Match) -> Vec<Match> {
        self.capture_groups.iter()
            .map(|g| Match::new(g.start, g.end).rebase(found.start))
            .collect()
    }
}

pub struct MaskedSearcher<'p, H: Haystack> {
    raw: H::Raw,
    cursor: SearchCursor,
    pattern: &'p MaskedPattern,
}

impl<'p, H: SliceHaystack<Element = u8>> Pattern<H> for &'p MaskedPattern {
    type Searcher = MaskedSearcher<'p, H>;

    fn into_searcher(self, haystack: H) -> Self::Searcher {
        let raw = haystack.into_raw();
        log::trace!("Masked search for {} bytes in {} bytes", self.len(), H::raw_len(&raw));

        MaskedSearcher {
            cursor: SearchCursor::new(H::raw_len(&raw)),
            raw,
            pattern: self,
        }
    }

    fn is_prefix_of(self, haystack: H) -> bool {
        let raw = haystack.into_raw();
        let window = unsafe { H::elements(&raw, 0, H::raw_len(&raw)) };
        self.matches_at(window)
    }

    fn is_suffix_of(self, haystack: H) -> bool {
        let raw = haystack.into_raw();
        let len = H::raw_len(&raw);
        let window = unsafe { H::elements(&raw, 0, len) };
        len >= self.len() && self.matches_at(&window[len - self.len()..])
    }
}

unsafe impl<'p, H: SliceHaystack<Element = u8>> Searcher<H> for MaskedSearcher<'p, H> {
    fn haystack(&self) -> H::Raw {
        self.raw
    }

    fn next_match(&mut self) -> Option<Match> {
        let raw = self.raw;
        let window = unsafe { H::elements(&raw, self.cursor.front(), self.cursor.back()) };

        match window.windows(self.pattern.len()).position(|w| self.pattern.matches_at(w)) {
            Some(position) => {
                let found = Match::new(position, position + self.pattern.len())
                    .rebase(self.cursor.front());

                // Move cursor to the end of the match
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

        while !self.cursor.is_exhausted() {
            let front = self.cursor.front();
            let window = unsafe { H::elements(&raw, front, self.cursor.back()) };

            if self.pattern.matches_at(window) {
                self.cursor.advance_front_to(front + self.pattern.len());
                continue;
            }

            self.cursor.advance_front_to(front + 1);
            return Some(Match::new(front, front + 1));
        }

        None
    }
}

unsafe impl<'p, H: SliceHaystack<Element = u8>> ReverseSearcher<H> for MaskedSearcher<'p, H> {
    fn next_match_back(&mut self) -> Option<Match> {
        let raw = self.raw;
        let window = unsafe { H::elements(&raw, self.cursor.front(), self.cursor.back()) };

        match window.windows(self.pattern.len()).rposition(|w| self.pattern.matches_at(w)) {
            Some(position) => {
                let found = Match::new(position, position + self.pattern.len())
                    .rebase(self.cursor.front());

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
        let len = self.pattern.len();

        while !self.cursor.is_exhausted() {
            let back = self.cursor.back();
            let front = self.cursor.front();

            if back - front >= len {
                let window = unsafe { H::elements(&raw, back - len, back) };
                if self.pattern.matches_at(window) {
                    self.cursor.retreat_back_to(back - len);
                    continue;
                }
            }

            self.cursor.retreat_back_to(back - 1);
            return Some(Match::new(back - 1, back));
        }

        None
    }
}
