//! Operand reader
//!
//! An operand is either a memory reference (`d0xH1234`, `0x 2345`,
//! `p0xXcafe`) or a literal constant (`42`, `h2a`). A type-prefix letter
//! is only a prefix when `0x` follows it; otherwise the field is read as
//! a literal.

use super::error::{SyntaxResult, TriggerParseError};
use crate::grammar::{tables, MemSize, Operand, OperandKind};
use crate::lexical::Tokenizer;

/// Read one operand at the cursor.
pub fn read_operand(tok: &mut Tokenizer) -> SyntaxResult<Operand> {
    let start = tok.save_position();

    let first = match tok.peek_char() {
        Some(ch) => ch,
        None => {
            return Err(TriggerParseError::MissingOperand {
                span: tok.span_here(),
            })
        }
    };

    let kind = match first.to_ascii_lowercase() {
        'd' if hex_intro_follows(tok, 1) => OperandKind::Delta,
        'p' if hex_intro_follows(tok, 1) => OperandKind::Prior,
        'b' if hex_intro_follows(tok, 1) => OperandKind::Bcd,
        'f' if hex_intro_follows(tok, 1) => OperandKind::Float,
        _ => OperandKind::Address,
    };

    if kind != OperandKind::Address {
        tok.advance();
    }

    if hex_intro_follows(tok, 0) {
        tok.advance();
        tok.advance();
        let size = read_size_letter(tok);
        let address = tok
            .read_number_wrapping(16)
            .map_err(|_| TriggerParseError::MissingNumericPayload {
                span: tok.span_from(start),
            })?;
        return Ok(Operand::memory(kind, size, address));
    }

    // literal: 'h' selects a hex payload, otherwise decimal
    if matches!(first, 'h' | 'H') {
        tok.advance();
        let value = tok
            .read_number_wrapping(16)
            .map_err(|_| TriggerParseError::MissingNumericPayload {
                span: tok.span_from(start),
            })?;
        return Ok(Operand::literal(value));
    }

    if !first.is_ascii_digit() {
        return Err(TriggerParseError::MissingOperand {
            span: tok.span_here(),
        });
    }

    let value = tok
        .read_number_wrapping(10)
        .map_err(TriggerParseError::from)?;
    Ok(Operand::literal(value))
}

/// Whether `0x` (or `0X`) begins `at` characters ahead of the cursor
fn hex_intro_follows(tok: &Tokenizer, at: usize) -> bool {
    tok.peek_char_at(at) == Some('0') && matches!(tok.peek_char_at(at + 1), Some('x') | Some('X'))
}

/// Read the optional size letter after `0x`.
///
/// A space is consumed as the historical explicit 16-bit marker. Size
/// letters never collide with hex digits, so an absent letter leaves the
/// payload untouched and selects the 16-bit default.
fn read_size_letter(tok: &mut Tokenizer) -> MemSize {
    match tok.peek_char() {
        Some(' ') => {
            tok.advance();
            MemSize::SixteenBit
        }
        Some(letter) => match tables::size_for_letter(letter) {
            Some(size) => {
                tok.advance();
                size
            }
            None => MemSize::SixteenBit,
        },
        None => MemSize::SixteenBit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn parse(text: &str) -> SyntaxResult<Operand> {
        let mut tok = Tokenizer::new(text);
        read_operand(&mut tok)
    }

    #[test]
    fn test_address_sizes() {
        let op = parse("0xH1234").unwrap();
        assert_eq!(op.kind(), OperandKind::Address);
        assert_eq!(op.size(), Some(MemSize::EightBit));
        assert_eq!(op.value(), 0x1234);

        assert_eq!(parse("0xX1234").unwrap().size(), Some(MemSize::ThirtyTwoBit));
        assert_eq!(parse("0xW1234").unwrap().size(), Some(MemSize::TwentyFourBit));
        assert_eq!(parse("0xL1234").unwrap().size(), Some(MemSize::NibbleLower));
        assert_eq!(parse("0xU1234").unwrap().size(), Some(MemSize::NibbleUpper));
        assert_eq!(parse("0xM1234").unwrap().size(), Some(MemSize::Bit0));
        assert_eq!(parse("0xT1234").unwrap().size(), Some(MemSize::Bit7));
        assert_eq!(parse("0xK1234").unwrap().size(), Some(MemSize::BitCount));
    }

    #[test]
    fn test_sixteen_bit_default() {
        // no size letter
        let op = parse("0x1234").unwrap();
        assert_eq!(op.size(), Some(MemSize::SixteenBit));
        assert_eq!(op.value(), 0x1234);

        // historical explicit space marker
        let op = parse("0x 1234").unwrap();
        assert_eq!(op.size(), Some(MemSize::SixteenBit));
        assert_eq!(op.value(), 0x1234);
    }

    #[test]
    fn test_type_prefixes() {
        assert_eq!(parse("d0xH1234").unwrap().kind(), OperandKind::Delta);
        assert_eq!(parse("p0xH1234").unwrap().kind(), OperandKind::Prior);
        assert_eq!(parse("b0xH1234").unwrap().kind(), OperandKind::Bcd);
        assert_eq!(parse("f0xH1234").unwrap().kind(), OperandKind::Float);

        // upper case accepted
        assert_eq!(parse("D0XH1234").unwrap().kind(), OperandKind::Delta);
    }

    #[test]
    fn test_literals() {
        let op = parse("42").unwrap();
        assert!(op.is_literal());
        assert_eq!(op.size(), None);
        assert_eq!(op.value(), 42);

        // 'h' prefix selects hex
        assert_eq!(parse("h2a").unwrap().value(), 0x2a);
        assert_eq!(parse("H2A").unwrap().value(), 0x2a);
    }

    #[test]
    fn test_hex_payload_with_lowercase_letters() {
        let op = parse("0xHab").unwrap();
        assert_eq!(op.size(), Some(MemSize::EightBit));
        assert_eq!(op.value(), 0xab);
    }

    #[test]
    fn test_wrapping_truncation_policy() {
        // payload wider than 32 bits keeps its low 32 bits
        let op = parse("0xH123456789a").unwrap();
        assert_eq!(op.value(), 0x3456789a);
    }

    #[test]
    fn test_missing_payload() {
        assert_matches!(
            parse("0xH"),
            Err(TriggerParseError::MissingNumericPayload { .. })
        );
        assert_matches!(
            parse("h"),
            Err(TriggerParseError::MissingNumericPayload { .. })
        );
    }

    #[test]
    fn test_unreadable_operand() {
        assert_matches!(parse(""), Err(TriggerParseError::MissingOperand { .. }));
        assert_matches!(parse("?"), Err(TriggerParseError::MissingOperand { .. }));

        // 'd' without a hex introducer is not a delta prefix
        assert_matches!(parse("dead"), Err(TriggerParseError::MissingOperand { .. }));
    }

    #[test]
    fn test_cursor_stops_after_operand() {
        let mut tok = Tokenizer::new("0xH1234=5");
        let op = read_operand(&mut tok).unwrap();
        assert_eq!(op.value(), 0x1234);
        assert_eq!(tok.peek_char(), Some('='));
    }
}
