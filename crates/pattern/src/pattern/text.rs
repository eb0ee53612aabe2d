//! Patterns for `&str` haystacks. [`Ascii`] also searches byte slices.
//!
//! Every range these searchers produce starts and ends on a char boundary, rejects included, so
//! splitting a string never cuts through a UTF-8 sequence.

use memchr::memmem;

use crate::cursor::SearchCursor;
use crate::error::ConfigurationError;
use crate::haystack::{next_boundary, previous_boundary, SliceHaystack};
use crate::pattern::empty::EmptyNeedle;
use crate::pattern::{
    DoubleEndedSearcher,
    Element,
    ElementSearcher,
    Pattern,
    ReverseSearcher,
    Searcher,
};
use crate::result::Match;

/// Substring search, `&str` in `&str`.
pub struct SubstringSearcher<'a, 'p> {
    raw: &'a str,
    cursor: SearchCursor,
    needle: &'p str,
    finder: memmem::Finder<'p>,
    finder_rev: memmem::FinderRev<'p>,
    empty: Option<EmptyNeedle>,
}

impl<'a, 'p> Pattern<&'a str> for &'p str {
    type Searcher = SubstringSearcher<'a, 'p>;

    fn into_searcher(self, haystack: &'a str) -> Self::Searcher {
        log::trace!("Substring search for {:?} in {} bytes", self, haystack.len());

        SubstringSearcher {
            raw: haystack,
            cursor: SearchCursor::new(haystack.len()),
            needle: self,
            finder: memmem::Finder::new(self),
            finder_rev: memmem::FinderRev::new(self),
            empty: self.is_empty().then(EmptyNeedle::new),
        }
    }

    fn is_prefix_of(self, haystack: &'a str) -> bool {
        haystack.as_bytes().starts_with(self.as_bytes())
    }

    fn is_suffix_of(self, haystack: &'a str) -> bool {
        haystack.as_bytes().ends_with(self.as_bytes())
    }
}

unsafe impl<'a, 'p> Searcher<&'a str> for SubstringSearcher<'a, 'p> {
    fn haystack(&self) -> &'a str {
        self.raw
    }

    fn next_match(&mut self) -> Option<Match> {
        let raw = self.raw;
        if let Some(empty) = self.empty.as_mut() {
            return empty.next_match::<&str>(&raw, &mut self.cursor);
        }

        let front = self.cursor.front();
        let window = &raw.as_bytes()[self.cursor.range()];

        match self.finder.find(window) {
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
            return empty.next_reject::<&str>(&raw, &mut self.cursor);
        }

        while !self.cursor.is_exhausted() {
            let front = self.cursor.front();
            if raw.as_bytes()[self.cursor.range()].starts_with(self.needle.as_bytes()) {
                self.cursor.advance_front_to(front + self.needle.len());
                continue;
            }

            let next = next_boundary::<&str>(&raw, front, self.cursor.back());
            self.cursor.advance_front_to(next);
            return Some(Match::new(front, next));
        }

        None
    }
}

unsafe impl<'a, 'p> ReverseSearcher<&'a str> for SubstringSearcher<'a, 'p> {
    fn next_match_back(&mut self) -> Option<Match> {
        let raw = self.raw;
        if let Some(empty) = self.empty.as_mut() {
            return empty.next_match_back::<&str>(&raw, &mut self.cursor);
        }

        let front = self.cursor.front();
        let window = &raw.as_bytes()[self.cursor.range()];

        match self.finder_rev.rfind(window) {
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
            return empty.next_reject_back::<&str>(&raw, &mut self.cursor);
        }

        while !self.cursor.is_exhausted() {
            let back = self.cursor.back();
            if raw.as_bytes()[self.cursor.range()].ends_with(self.needle.as_bytes()) {
                self.cursor.retreat_back_to(back - self.needle.len());
                continue;
            }

            let previous = previous_boundary::<&str>(&raw, back, self.cursor.front());
            self.cursor.retreat_back_to(previous);
            return Some(Match::new(previous, back));
        }

        None
    }
}

/// Single `char` search in `&str`.
pub struct CharSearcher<'a> {
    raw: &'a str,
    cursor: SearchCursor,
    encoded: [u8; 4],
    encoded_len: usize,
}

impl<'a> CharSearcher<'a> {
    fn needle(&self) -> &[u8] {
        &self.encoded[..self.encoded_len]
    }
}

impl<'a> Pattern<&'a str> for char {
    type Searcher = CharSearcher<'a>;

    fn into_searcher(self, haystack: &'a str) -> Self::Searcher {
        let mut encoded = [0u8; 4];
        let encoded_len = self.encode_utf8(&mut encoded).len();

        CharSearcher {
            raw: haystack,
            cursor: SearchCursor::new(haystack.len()),
            encoded,
            encoded_len,
        }
    }

    fn is_prefix_of(self, haystack: &'a str) -> bool {
        haystack.chars().next() == Some(self)
    }

    fn is_suffix_of(self, haystack: &'a str) -> bool {
        haystack.chars().next_back() == Some(self)
    }
}

unsafe impl<'a> Searcher<&'a str> for CharSearcher<'a> {
    fn haystack(&self) -> &'a str {
        self.raw
    }

    fn next_match(&mut self) -> Option<Match> {
        let front = self.cursor.front();
        let window = &self.raw.as_bytes()[self.cursor.range()];

        match memmem::find(window, self.needle()) {
            Some(position) => {
                let found = Match::new(front + position, front + position + self.encoded_len);
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
        while !self.cursor.is_exhausted() {
            let front = self.cursor.front();
            let next = next_boundary::<&str>(&self.raw, front, self.cursor.back());
            self.cursor.advance_front_to(next);

            if self.raw.as_bytes()[front..next] != *self.needle() {
                return Some(Match::new(front, next));
            }
        }

        None
    }
}

unsafe impl<'a> ReverseSearcher<&'a str> for CharSearcher<'a> {
    fn next_match_back(&mut self) -> Option<Match> {
        let front = self.cursor.front();
        let window = &self.raw.as_bytes()[self.cursor.range()];

        match memmem::rfind(window, self.needle()) {
            Some(position) => {
                let found = Match::new(front + position, front + position + self.encoded_len);
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
        while !self.cursor.is_exhausted() {
            let back = self.cursor.back();
            let previous = previous_boundary::<&str>(&self.raw, back, self.cursor.front());
            self.cursor.retreat_back_to(previous);

            if self.raw.as_bytes()[previous..back] != *self.needle() {
                return Some(Match::new(previous, back));
            }
        }

        None
    }
}

impl<'a> DoubleEndedSearcher<&'a str> for CharSearcher<'a> {}

/// A single ASCII byte.
///
/// Bytes below `0x80` never occur inside a multi-byte UTF-8 sequence, which makes a plain byte
/// scan safe on `&str`. Anything else is refused at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ascii(u8);

impl Ascii {
    pub fn new(byte: u8) -> Result<Self, ConfigurationError> {
        if !byte.is_ascii() {
            return Err(ConfigurationError::NonAsciiByte(byte));
        }

        Ok(Self(byte))
    }

    pub fn byte(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Ascii {
    type Error = ConfigurationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

pub struct AsciiSearcher<'a> {
    raw: &'a str,
    cursor: SearchCursor,
    ascii: u8,
}

impl<'a> Pattern<&'a str> for Ascii {
    type Searcher = AsciiSearcher<'a>;

    fn into_searcher(self, haystack: &'a str) -> Self::Searcher {
        AsciiSearcher {
            raw: haystack,
            cursor: SearchCursor::new(haystack.len()),
            ascii: self.0,
        }
    }

    fn is_prefix_of(self, haystack: &'a str) -> bool {
        haystack.as_bytes().first() == Some(&self.0)
    }

    fn is_suffix_of(self, haystack: &'a str) -> bool {
        haystack.as_bytes().last() == Some(&self.0)
    }
}

unsafe impl<'a> Searcher<&'a str> for AsciiSearcher<'a> {
    fn haystack(&self) -> &'a str {
        self.raw
    }

    fn next_match(&mut self) -> Option<Match> {
        let front = self.cursor.front();
        let window = &self.raw.as_bytes()[self.cursor.range()];

        match memchr::memchr(self.ascii, window) {
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

    fn next_reject(&mut self) -> Option<Match> {
        while !self.cursor.is_exhausted() {
            let front = self.cursor.front();
            if self.raw.as_bytes()[front] == self.ascii {
                self.cursor.advance_front_to(front + 1);
                continue;
            }

            let next = next_boundary::<&str>(&self.raw, front, self.cursor.back());
            self.cursor.advance_front_to(next);
            return Some(Match::new(front, next));
        }

        None
    }
}

unsafe impl<'a> ReverseSearcher<&'a str> for AsciiSearcher<'a> {
    fn next_match_back(&mut self) -> Option<Match> {
        let front = self.cursor.front();
        let window = &self.raw.as_bytes()[self.cursor.range()];

        match memchr::memrchr(self.ascii, window) {
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

    fn next_reject_back(&mut self) -> Option<Match> {
        while !self.cursor.is_exhausted() {
            let back = self.cursor.back();
            if self.raw.as_bytes()[back - 1] == self.ascii {
                self.cursor.retreat_back_to(back - 1);
                continue;
            }

            let previous = previous_boundary::<&str>(&self.raw, back, self.cursor.front());
            self.cursor.retreat_back_to(previous);
            return Some(Match::new(previous, back));
        }

        None
    }
}

impl<'a> DoubleEndedSearcher<&'a str> for AsciiSearcher<'a> {}

/// On byte slices every offset is a boundary, so an ASCII byte is a plain element match.
impl<H: SliceHaystack<Element = u8>> Pattern<H> for Ascii {
    type Searcher = ElementSearcher<H, Element<u8>>;

    fn into_searcher(self, haystack: H) -> Self::Searcher {
        ElementSearcher::new(haystack, Element(self.0))
    }
}

/// Matches one `char` the wrapped function accepts.
#[derive(Debug, Clone, Copy)]
pub struct CharPredicate<F>(pub F);

pub struct CharPredicateSearcher<'a, F> {
    raw: &'a str,
    cursor: SearchCursor,
    predicate: F,
}

impl<'a, F: FnMut(char) -> bool> CharPredicateSearcher<'a, F> {
    fn scan_front(&mut self, expected: bool) -> Option<Match> {
        let front = self.cursor.front();
        let window = &self.raw[self.cursor.range()];

        match window.char_indices().find(|(_, c)| (self.predicate)(*c) == expected) {
            Some((position, c)) => {
                let found = Match::new(front + position, front + position + c.len_utf8());
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
        let front = self.cursor.front();
        let window = &self.raw[self.cursor.range()];

        match window.char_indices().rev().find(|(_, c)| (self.predicate)(*c) == expected) {
            Some((position, c)) => {
                let found = Match::new(front + position, front + position + c.len_utf8());
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

impl<'a, F: FnMut(char) -> bool> Pattern<&'a str> for CharPredicate<F> {
    type Searcher = CharPredicateSearcher<'a, F>;

    fn into_searcher(self, haystack: &'a str) -> Self::Searcher {
        CharPredicateSearcher {
            raw: haystack,
            cursor: SearchCursor::new(haystack.len()),
            predicate: self.0,
        }
    }

    fn is_prefix_of(mut self, haystack: &'a str) -> bool {
        haystack.chars().next().is_some_and(&mut self.0)
    }

    fn is_suffix_of(mut self, haystack: &'a str) -> bool {
        haystack.chars().next_back().is_some_and(&mut self.0)
    }
}

unsafe impl<'a, F: FnMut(char) -> bool> Searcher<&'a str> for CharPredicateSearcher<'a, F> {
    fn haystack(&self) -> &'a str {
        self.raw
    }

    fn next_match(&mut self) -> Option<Match> {
        self.scan_front(true)
    }

    fn next_reject(&mut self) -> Option<Match> {
        self.scan_front(false)
    }
}

unsafe impl<'a, F: FnMut(char) -> bool> ReverseSearcher<&'a str> for CharPredicateSearcher<'a, F> {
    fn next_match_back(&mut self) -> Option<Match> {
        self.scan_back(true)
    }

    fn next_reject_back(&mut self) -> Option<Match> {
        self.scan_back(false)
    }
}

impl<'a, F: FnMut(char) -> bool> DoubleEndedSearcher<&'a str> for CharPredicateSearcher<'a, F> {}

#[cfg(test)]
mod tests {
    use crate::error::ConfigurationError;
    use crate::pattern::{Ascii, CharPredicate};
    use crate::result::Match;
    use crate::search;

    fn ranges(matches: impl Iterator<Item = Match>) -> Vec<(usize, usize)> {
        matches.map(|m| (m.start, m.end)).collect()
    }

    #[test]
    fn substring_search_finds_every_occurrence() {
        assert_eq!(ranges(search::search("abcabcabc", "abc")), vec![(0, 3), (3, 6), (6, 9)]);
    }

    #[test]
    fn substring_search_does_not_overlap() {
        assert_eq!(ranges(search::search("aaaa", "aa")), vec![(0, 2), (2, 4)]);
        assert_eq!(ranges(search::search_from_end("aaa", "aa")), vec![(1, 3)]);
    }

    #[test]
    fn empty_substring_matches_every_char_boundary() {
        assert_eq!(ranges(search::search("abc", "")), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
        assert_eq!(ranges(search::search("añ", "")), vec![(0, 0), (1, 1), (3, 3)]);
        assert_eq!(ranges(search::search("", "")), vec![(0, 0)]);
    }

    #[test]
    fn empty_substring_splits_into_characters() {
        let parts = search::split("añb", "").collect::<Vec<_>>();

        assert_eq!(parts, vec!["", "a", "ñ", "b", ""]);
    }

    #[test]
    fn substring_search_behaves_with_too_long_of_a_needle() {
        assert_eq!(search::find("abc", "abcd"), None);
        assert_eq!(search::rfind("abc", "abcd"), None);
        assert!(!search::starts_with("abc", "abcd"));
    }

    #[test]
    fn substring_match_indices_yield_sub_slices() {
        let result = search::match_indices("one two one", "one").collect::<Vec<_>>();

        assert_eq!(result, vec![(0, "one"), (8, "one")]);
    }

    #[test]
    fn substring_split_reconstructs_the_haystack() {
        let haystack = "a, b,, c, ";
        let parts = search::split(haystack, ", ").collect::<Vec<_>>();
        let matches = search::search(haystack, ", ").collect::<Vec<_>>();

        assert_eq!(parts, vec!["a", "b,", "c", ""]);

        let mut rebuilt = String::new();
        for (i, part) in parts.iter().enumerate() {
            rebuilt.push_str(part);
            if let Some(m) = matches.get(i) {
                rebuilt.push_str(&haystack[m.range()]);
            }
        }
        assert_eq!(rebuilt, haystack);
    }

    #[test]
    fn substring_trim_keeps_multibyte_characters_whole() {
        assert_eq!(search::trim_start_matches("xyxyéxy", "xy"), "éxy");
        assert_eq!(search::trim_end_matches("xyéxyxy", "xy"), "xyé");
    }

    #[test]
    fn char_search_handles_multibyte_characters() {
        let haystack = "näïve naïf";

        assert_eq!(ranges(search::search(haystack, 'ï')), vec![(3, 5), (10, 12)]);
        assert_eq!(search::split(haystack, 'ï').collect::<Vec<_>>(), vec!["nä", "ve na", "f"]);
        assert_eq!(search::split(haystack, 'ï').rev().collect::<Vec<_>>(), vec!["f", "ve na", "nä"]);
    }

    #[test]
    fn char_trim_and_affix_checks() {
        assert_eq!(search::trim_start_matches("ééabé", 'é'), "abé");
        assert_eq!(search::trim_end_matches("ééabé", 'é'), "ééab");
        assert!(search::starts_with("ébc", 'é'));
        assert!(search::ends_with("abé", 'é'));
    }

    #[test]
    fn ascii_refuses_non_ascii_bytes() {
        assert_eq!(Ascii::new(0xC3), Err(ConfigurationError::NonAsciiByte(0xC3)));
        assert_eq!(Ascii::try_from(b'a').map(|a| a.byte()), Ok(b'a'));
    }

    #[test]
    fn ascii_search_matches_bytes_and_rejects_characters() {
        let a = Ascii::new(b'a').unwrap();

        assert_eq!(search::match_indices("banana", a).collect::<Vec<_>>(), vec![(1, "a"), (3, "a"), (5, "a")]);
        assert_eq!(search::split("hangman", a).collect::<Vec<_>>(), vec!["h", "ngm", "n"]);
        assert_eq!(search::trim_start_matches("aaéa", a), "éa");
        assert_eq!(search::trim_end_matches("aéaa", a), "aé");
    }

    #[test]
    fn ascii_search_on_byte_slices() {
        let a = Ascii::new(b'a').unwrap();
        let haystack: &[u8] = b"hangman";

        assert_eq!(search::split(haystack, a).collect::<Vec<_>>(), vec![&b"h"[..], &b"ngm"[..], &b"n"[..]]);
        assert_eq!(search::rfind(haystack, a), Some(Match::new(5, 6)));
        assert!(search::starts_with(&b"abc"[..], a));
        assert!(search::ends_with(&b"cba"[..], a));
    }

    #[test]
    fn ascii_search_patches_mutable_byte_slices() {
        let a = Ascii::new(b'a').unwrap();
        let mut data = *b"banana";

        {
            let indices = search::match_indices(&mut data[..], a).collect::<Vec<_>>();
            assert_eq!(indices.iter().map(|x| x.0).collect::<Vec<_>>(), vec![1, 3, 5]);

            for (_, part) in indices {
                part[0] = b'i';
            }
        }

        assert_eq!(&data, b"binini");

        let mut data = *b"hangman";
        for part in search::split(&mut data[..], a) {
            part.fill(b'-');
        }

        assert_eq!(&data, b"-a---a-");
    }

    #[test]
    fn char_predicate_search_works_both_ways() {
        let haystack = "a1b22c";
        let mut matches = search::search(haystack, CharPredicate(|c: char| c.is_ascii_digit()));

        assert_eq!(matches.next(), Some(Match::new(1, 2)));
        assert_eq!(matches.next_back(), Some(Match::new(4, 5)));
        assert_eq!(matches.next(), Some(Match::new(3, 4)));
        assert_eq!(matches.next(), None);
    }

    #[test]
    fn char_predicate_trims_whitespace() {
        let trimmed = search::trim_start_matches(" \t\u{a0}hi ", CharPredicate(char::is_whitespace));

        assert_eq!(trimmed, "hi ");
        assert!(search::ends_with("hi ", CharPredicate(char::is_whitespace)));
    }
}
