//! Cursor primitives for the trigger and record grammars

use crate::config::compile_time::lexical::{MAX_INPUT_LENGTH, MAX_QUOTED_STRING_SIZE};
use crate::logging::{codes, Code};
use crate::utils::{Position, Span};

/// Lexical errors with compile-time input boundaries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Unterminated quoted string starting at {span}")]
    UnterminatedString { span: Span },

    #[error("Expected digits at {span}")]
    MissingDigits { span: Span },

    #[error("Quoted string too large: {size} bytes (max {MAX_QUOTED_STRING_SIZE})")]
    StringTooLarge { size: usize },

    #[error("Input too long: {length} bytes (max {MAX_INPUT_LENGTH})")]
    InputTooLong { length: usize },
}

impl LexerError {
    pub fn error_code(&self) -> Code {
        match self {
            LexerError::UnterminatedString { .. } => codes::lexical::UNTERMINATED_STRING,
            LexerError::MissingDigits { .. } => codes::lexical::MISSING_DIGITS,
            LexerError::StringTooLarge { .. } => codes::lexical::STRING_TOO_LARGE,
            LexerError::InputTooLong { .. } => codes::lexical::INPUT_TOO_LONG,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            LexerError::UnterminatedString { span } | LexerError::MissingDigits { span } => {
                Some(*span)
            }
            LexerError::StringTooLarge { .. } | LexerError::InputTooLong { .. } => None,
        }
    }
}

/// A cursor over a single line of input.
///
/// The cursor position always lies on a character boundary; every scan
/// advances monotonically, so all reads terminate at end of input.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: Position,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: Position::start(),
        }
    }

    /// Reject input exceeding the compile-time length bound
    pub fn check_input_length(input: &str) -> Result<(), LexerError> {
        if input.len() > MAX_INPUT_LENGTH {
            Err(LexerError::InputTooLong {
                length: input.len(),
            })
        } else {
            Ok(())
        }
    }

    pub fn end_of_input(&self) -> bool {
        self.pos.offset >= self.input.len()
    }

    /// Returns the next character without advancing
    pub fn peek_char(&self) -> Option<char> {
        self.input[self.pos.offset..].chars().next()
    }

    /// Returns the character `n` positions ahead without advancing
    pub fn peek_char_at(&self, n: usize) -> Option<char> {
        self.input[self.pos.offset..].chars().nth(n)
    }

    /// Byte offset of the cursor
    pub fn offset(&self) -> usize {
        self.pos.offset
    }

    /// Full position of the cursor, for spans and save/restore
    pub fn save_position(&self) -> Position {
        self.pos
    }

    /// Restore a position previously returned by `save_position`
    pub fn restore_position(&mut self, position: Position) {
        debug_assert!(position.offset <= self.input.len());
        self.pos = position;
    }

    /// Span from a saved position to the cursor
    pub fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.pos)
    }

    /// Single-character span at the cursor
    pub fn span_here(&self) -> Span {
        if self.end_of_input() {
            Span::new(self.pos, self.pos)
        } else {
            Span::single(self.pos)
        }
    }

    /// Consume one character and return it
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos = self.pos.advance(ch);
        Some(ch)
    }

    /// If the next character is `expected`, advance over it
    pub fn consume(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Advance to the next occurrence of `stop`, or to end of input
    pub fn advance_to(&mut self, stop: char) {
        while let Some(ch) = self.peek_char() {
            if ch == stop {
                break;
            }
            self.advance();
        }
    }

    /// Advance to `stop` and return the characters advanced over
    pub fn read_to(&mut self, stop: char) -> &'a str {
        let start = self.pos.offset;
        self.advance_to(stop);
        &self.input[start..self.pos.offset]
    }

    /// Advance to `stop`, treating occurrences whose preceding character
    /// satisfies `guard` as content rather than a delimiter.
    ///
    /// This is the scan-until-delimiter-with-lookback primitive: an
    /// unquoted trigger field may itself contain `:` after a flag letter,
    /// so a `:` only terminates the field when the character before it is
    /// not a flag letter.
    pub fn read_to_guarded<F>(&mut self, stop: char, guard: F) -> &'a str
    where
        F: Fn(char) -> bool,
    {
        let start = self.pos.offset;
        while let Some(ch) = self.peek_char() {
            if ch == stop {
                let preceding = self.input[..self.pos.offset].chars().next_back();
                match preceding {
                    Some(prev) if guard(prev) => {}
                    _ => break,
                }
            }
            self.advance();
        }
        &self.input[start..self.pos.offset]
    }

    /// Everything from the cursor to end of input, consuming it
    pub fn read_remaining(&mut self) -> &'a str {
        let start = self.pos.offset;
        while self.advance().is_some() {}
        &self.input[start..]
    }

    /// Read a quoted string, unescaping `\"` and `\\`.
    ///
    /// Expects the cursor on the opening quote.
    pub fn read_quoted_string(&mut self) -> Result<String, LexerError> {
        let start = self.pos;
        if !self.consume('"') {
            return Err(LexerError::UnterminatedString {
                span: Span::new(start, start),
            });
        }

        let mut content = String::new();
        loop {
            match self.advance() {
                Some('"') => return Ok(content),
                Some('\\') => match self.advance() {
                    Some(escaped) => content.push(escaped),
                    None => {
                        return Err(LexerError::UnterminatedString {
                            span: self.span_from(start),
                        })
                    }
                },
                Some(ch) => {
                    content.push(ch);
                    if content.len() > MAX_QUOTED_STRING_SIZE {
                        return Err(LexerError::StringTooLarge {
                            size: content.len(),
                        });
                    }
                }
                None => {
                    return Err(LexerError::UnterminatedString {
                        span: self.span_from(start),
                    })
                }
            }
        }
    }

    /// Read consecutive decimal digits; fails if none are present.
    pub fn read_unsigned(&mut self) -> Result<u32, LexerError> {
        self.read_number_wrapping(10)
    }

    /// Read consecutive digits in the given radix with 32-bit wrapping
    /// accumulation.
    ///
    /// Oversized payloads truncate silently to their low 32 bits. This is
    /// a compatibility leniency for historical inputs, not a bug.
    pub fn read_number_wrapping(&mut self, radix: u32) -> Result<u32, LexerError> {
        let mut value: u32 = 0;
        let mut digits = 0usize;

        while let Some(ch) = self.peek_char() {
            match ch.to_digit(radix) {
                Some(digit) => {
                    value = value.wrapping_mul(radix).wrapping_add(digit);
                    digits += 1;
                    self.advance();
                }
                None => break,
            }
        }

        if digits == 0 {
            Err(LexerError::MissingDigits {
                span: self.span_here(),
            })
        } else {
            Ok(value)
        }
    }

    /// Number of digit characters available at the cursor in the given radix
    pub fn count_digits(&self, radix: u32) -> usize {
        self.input[self.pos.offset..]
            .chars()
            .take_while(|ch| ch.to_digit(radix).is_some())
            .count()
    }
}
