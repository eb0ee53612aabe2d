use std::fmt;

use crate::pattern::tokenizer::TokenizationError;

/// Raised while building a pattern, before any search runs.
#[derive(Debug, PartialEq)]
pub enum ConfigurationError {
    Tokenizer(TokenizationError),
    CaptureGroupAlreadyOpened,
    CaptureGroupNotOpened,
    CaptureGroupNotClosed,
    EmptyPattern,
    NoMatchableBytes,
    NonAsciiByte(u8),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tokenizer(e) => write!(f, "could not tokenize pattern: {e}"),
            Self::CaptureGroupAlreadyOpened => write!(f, "capture group opened inside another capture group"),
            Self::CaptureGroupNotOpened => write!(f, "capture group closed without being opened"),
            Self::CaptureGroupNotClosed => write!(f, "capture group was never closed"),
            Self::EmptyPattern => write!(f, "pattern does not contain any bytes"),
            Self::NoMatchableBytes => write!(f, "pattern only consists of wildcards"),
            Self::NonAsciiByte(b) => write!(f, "{b:#04x} is not an ASCII byte"),
        }
    }
}

impl std::error::Error for ConfigurationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Tokenizer(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TokenizationError> for ConfigurationError {
    fn from(value: TokenizationError) -> Self {
        Self::Tokenizer(value)
    }
}

/// Kind of borrow a search holds on its haystack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Shared,
    Exclusive,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared => write!(f, "shared"),
            Self::Exclusive => write!(f, "exclusive"),
        }
    }
}

/// Raised when a search is requested on a haystack that another, conflicting search holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasingError {
    pub requested: Access,
    pub held: Access,
}

impl fmt::Display for AliasingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot start {} search while {} search is active on the same haystack",
            self.requested, self.held,
        )
    }
}

impl std::error::Error for AliasingError {}
