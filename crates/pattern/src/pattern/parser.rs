use std::ops::Range;

use crate::error::ConfigurationError;
use crate::pattern::masked::MaskedPattern;
use crate::pattern::tokenizer;

pub type ParserResult = Result<MaskedPattern, ConfigurationError>;

pub(crate) fn parse_pattern(input: &str) -> ParserResult {
    let mut bytes = Vec::new();
    let mut mask = Vec::new();
    let mut capture_groups = Vec::<Range<usize>>::new();
    let mut current_capture_group_start = None as Option<usize>;

    for token in tokenizer::tokenize_pattern(input)?.iter() {
        match token {
            tokenizer::Token::ByteValue(b, m) => {
                bytes.push(*b);
                mask.push(*m);
            },
            tokenizer::Token::CaptureGroupOpen => {
                match current_capture_group_start {
                    None => current_capture_group_start = Some(bytes.len()),

                    // Ensure we're not already in a group
                    Some(_) => return Err(ConfigurationError::CaptureGroupAlreadyOpened),
                }
            },
            tokenizer::Token::CaptureGroupClose => {
                match current_capture_group_start.take() {
                    Some(start) => capture_groups.push(Range { start, end: bytes.len() }),

                    // Bail if capture group was never opened
                    None => return Err(ConfigurationError::CaptureGroupNotOpened),
                }
            },
        }
    }

    // Guard against unclosed capture groups as otherwise it'll silently not capture the input.
    if current_capture_group_start.is_some() {
        return Err(ConfigurationError::CaptureGroupNotClosed);
    }

    log::debug!(
        "Parsed pattern {:?} into {} bytes with {} capture groups",
        input,
        bytes.len(),
        capture_groups.len(),
    );

    MaskedPattern::new(bytes, mask, capture_groups)
}

#[cfg(test)]
mod tests {
    use crate::error::ConfigurationError;
    use crate::pattern::parser::parse_pattern;
    use crate::pattern::tokenizer::TokenizationError;

    #[test]
    fn parse_collects_bytes_mask_and_groups() {
        let pattern = parse_pattern("AA [?? BB] CC").unwrap();

        assert_eq!(pattern.bytes(), &[0xAA, 0x00, 0xBB, 0xCC]);
        assert_eq!(pattern.mask(), &[0xFF, 0x00, 0xFF, 0xFF]);
        assert_eq!(pattern.capture_groups(), &[1..3]);
    }

    #[test]
    fn parse_reports_unclosed_capture_group() {
        assert_eq!(parse_pattern("AA [BB CC").unwrap_err(), ConfigurationError::CaptureGroupNotClosed);
    }

    #[test]
    fn parse_passes_tokenizer_errors_through() {
        assert_eq!(
            parse_pattern("AA B").unwrap_err(),
            ConfigurationError::Tokenizer(TokenizationError::IncompleteByte),
        );
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert_eq!(parse_pattern("  ").unwrap_err(), ConfigurationError::EmptyPattern);
        assert_eq!(parse_pattern("[]").unwrap_err(), ConfigurationError::EmptyPattern);
    }
}
