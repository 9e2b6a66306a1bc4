//! Condition reader
//!
//! One condition is an optional flag prefix, a left operand, an optional
//! comparator and right operand, and an optional hit-count suffix.

use super::error::{SyntaxResult, TriggerParseError};
use super::operand::read_operand;
use crate::config::compile_time::syntax::MAX_HIT_TARGET_DIGITS;
use crate::grammar::{tables, Comparator, Comparison, Condition, ConditionFlag};
use crate::lexical::Tokenizer;

/// Read one condition at the cursor.
pub fn read_condition(tok: &mut Tokenizer) -> SyntaxResult<Condition> {
    let flag = read_flag_prefix(tok);
    let lhs = read_operand(tok)?;

    let comparison = match read_comparator(tok) {
        Some(op) => {
            let rhs = read_operand(tok)?;
            Some(Comparison::new(op, rhs))
        }
        // absence of a comparator is legal for some flags; whether the
        // flag permits it is a validator concern, not a parse error
        None => None,
    };

    let hit_target = read_hit_target(tok)?;

    Ok(Condition::new(flag, lhs, comparison, hit_target))
}

/// Read the optional one-letter flag prefix.
///
/// A, B, C and D are also hex digits, so a letter is only a flag prefix
/// when the character immediately after it is `:`. The lookahead never
/// consumes the letter speculatively.
fn read_flag_prefix(tok: &mut Tokenizer) -> ConditionFlag {
    match tok.peek_char().and_then(tables::flag_for_letter) {
        Some(flag) if tok.peek_char_at(1) == Some(':') => {
            tok.advance();
            tok.advance();
            flag
        }
        _ => ConditionFlag::Standard,
    }
}

/// Read the optional comparator token.
///
/// `==` is accepted as a historical spelling of `=`.
fn read_comparator(tok: &mut Tokenizer) -> Option<Comparator> {
    match tok.peek_char()? {
        '=' => {
            tok.advance();
            tok.consume('=');
            Some(Comparator::Equals)
        }
        '!' if tok.peek_char_at(1) == Some('=') => {
            tok.advance();
            tok.advance();
            Some(Comparator::NotEqualTo)
        }
        '<' => {
            tok.advance();
            if tok.consume('=') {
                Some(Comparator::LessThanOrEqual)
            } else {
                Some(Comparator::LessThan)
            }
        }
        '>' => {
            tok.advance();
            if tok.consume('=') {
                Some(Comparator::GreaterThanOrEqual)
            } else {
                Some(Comparator::GreaterThan)
            }
        }
        _ => None,
    }
}

/// Read the optional `.` digits `.` hit-count suffix.
///
/// `.` digits without the closing `.` is a legacy equivalent. A target of
/// zero historically meant hit-tracking disabled and normalizes to none.
fn read_hit_target(tok: &mut Tokenizer) -> SyntaxResult<Option<u32>> {
    if !tok.consume('.') {
        return Ok(None);
    }

    if tok.count_digits(10) > MAX_HIT_TARGET_DIGITS {
        return Err(TriggerParseError::HitCountTooLong {
            span: tok.span_here(),
        });
    }

    let hits = tok.read_unsigned().map_err(TriggerParseError::from)?;
    tok.consume('.');

    Ok(if hits == 0 { None } else { Some(hits) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{MemSize, OperandKind};
    use assert_matches::assert_matches;

    fn parse(text: &str) -> SyntaxResult<Condition> {
        let mut tok = Tokenizer::new(text);
        read_condition(&mut tok)
    }

    #[test]
    fn test_plain_condition() {
        let cond = parse("0xH1234=5").unwrap();
        assert_eq!(cond.flag(), ConditionFlag::Standard);
        assert_eq!(cond.comparator(), Some(Comparator::Equals));
        assert_eq!(cond.hit_target(), None);
    }

    #[test]
    fn test_flag_prefixes() {
        assert_eq!(parse("R:0xH1=2").unwrap().flag(), ConditionFlag::ResetIf);
        assert_eq!(parse("P:0xH1=2").unwrap().flag(), ConditionFlag::PauseIf);
        assert_eq!(parse("A:0xH1=2").unwrap().flag(), ConditionFlag::AddSource);
        assert_eq!(parse("B:0xH1=2").unwrap().flag(), ConditionFlag::SubSource);
        assert_eq!(parse("C:0xH1=2").unwrap().flag(), ConditionFlag::AddHits);
        assert_eq!(parse("D:0xH1=2").unwrap().flag(), ConditionFlag::SubHits);
        assert_eq!(parse("N:0xH1=2").unwrap().flag(), ConditionFlag::AndNext);
        assert_eq!(parse("O:0xH1=2").unwrap().flag(), ConditionFlag::OrNext);
        assert_eq!(parse("M:0xH1=2").unwrap().flag(), ConditionFlag::Measured);
        assert_eq!(parse("G:0xH1=2").unwrap().flag(), ConditionFlag::MeasuredIf);
        assert_eq!(parse("T:0xH1=2").unwrap().flag(), ConditionFlag::Trigger);
        assert_eq!(parse("I:0xH1=2").unwrap().flag(), ConditionFlag::AddAddress);
        assert_eq!(parse("Z:0xH1=2").unwrap().flag(), ConditionFlag::ResetNextIf);

        // lower case accepted
        assert_eq!(parse("r:0xH1=2").unwrap().flag(), ConditionFlag::ResetIf);
    }

    #[test]
    fn test_flag_letter_without_colon_is_content() {
        // 'd' is a delta prefix here, not a SubHits flag
        let cond = parse("d0xH1234=5").unwrap();
        assert_eq!(cond.flag(), ConditionFlag::Standard);
        assert_eq!(cond.lhs().kind(), OperandKind::Delta);
    }

    #[test]
    fn test_all_comparators() {
        assert_eq!(parse("1=2").unwrap().comparator(), Some(Comparator::Equals));
        assert_eq!(
            parse("1==2").unwrap().comparator(),
            Some(Comparator::Equals)
        );
        assert_eq!(
            parse("1!=2").unwrap().comparator(),
            Some(Comparator::NotEqualTo)
        );
        assert_eq!(
            parse("1<2").unwrap().comparator(),
            Some(Comparator::LessThan)
        );
        assert_eq!(
            parse("1<=2").unwrap().comparator(),
            Some(Comparator::LessThanOrEqual)
        );
        assert_eq!(
            parse("1>2").unwrap().comparator(),
            Some(Comparator::GreaterThan)
        );
        assert_eq!(
            parse("1>=2").unwrap().comparator(),
            Some(Comparator::GreaterThanOrEqual)
        );
    }

    #[test]
    fn test_missing_comparator_is_legal() {
        // address composition carries no comparison at parse time
        let cond = parse("I:0xX1234").unwrap();
        assert_eq!(cond.flag(), ConditionFlag::AddAddress);
        assert!(cond.comparison().is_none());
        assert!(cond.rhs().is_none());
    }

    #[test]
    fn test_hit_targets() {
        assert_eq!(parse("0xH1=2.10.").unwrap().hit_target(), Some(10));

        // legacy form without the closing dot
        assert_eq!(parse("0xH1=2.10").unwrap().hit_target(), Some(10));

        // zero normalizes to none
        assert_eq!(parse("0xH1=2.0.").unwrap().hit_target(), None);
    }

    #[test]
    fn test_hit_target_errors() {
        assert_matches!(parse("0xH1=2.."), Err(TriggerParseError::Lexical(_)));
        assert_matches!(
            parse("0xH1=2.99999999999."),
            Err(TriggerParseError::HitCountTooLong { .. })
        );
    }

    #[test]
    fn test_sizes_in_both_operands() {
        let cond = parse("0xU10<p0xL10").unwrap();
        assert_eq!(cond.lhs().size(), Some(MemSize::NibbleUpper));
        let rhs = cond.rhs().unwrap();
        assert_eq!(rhs.kind(), OperandKind::Prior);
        assert_eq!(rhs.size(), Some(MemSize::NibbleLower));
    }

    #[test]
    fn test_cursor_stops_at_separator() {
        let mut tok = Tokenizer::new("0xH1=2_0xH3=4");
        let first = read_condition(&mut tok).unwrap();
        assert_eq!(first.lhs().value(), 1);
        assert_eq!(tok.peek_char(), Some('_'));
    }
}
