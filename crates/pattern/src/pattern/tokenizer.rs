use std::fmt;

#[derive(Debug, PartialEq)]
pub(crate) enum Token {
    CaptureGroupOpen,
    CaptureGroupClose,
    /// Expected value and the mask it's compared under.
    ByteValue(u8, u8),
}

#[derive(Debug, PartialEq)]
pub enum TokenizationError {
    UnknownInput(char),
    IncompleteByte,
}

impl fmt::Display for TokenizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownInput(c) => write!(f, "unexpected character {c:?}"),
            Self::IncompleteByte => write!(f, "byte is missing its second hex digit"),
        }
    }
}

impl std::error::Error for TokenizationError {}

pub(crate) fn tokenize_pattern(input: &str) -> Result<Vec<Token>, TokenizationError> {
    let mut input_iter = input.chars().peekable();

    let mut tokens = Vec::new();
    while let Some(current_character) = input_iter.next() {
        match current_character {
            ' ' | '\t' | '\n' | '\r' => { },
            '[' => tokens.push(Token::CaptureGroupOpen),
            ']' => tokens.push(Token::CaptureGroupClose),
            '?' => {
                // Collapse double question marks
                if input_iter.peek() == Some(&'?') {
                    input_iter.next();
                }

                tokens.push(Token::ByteValue(0x00, 0x00))
            },
            _ => {
                let high = current_character.to_digit(16)
                    .ok_or(TokenizationError::UnknownInput(current_character))?;

                // Bytes are always written as two digits
                let low = input_iter.next()
                    .and_then(|c| c.to_digit(16))
                    .ok_or(TokenizationError::IncompleteByte)?;

                tokens.push(Token::ByteValue(((high << 4) | low) as u8, 0xFF))
            }
        };
    }

    Ok(tokens)
}
