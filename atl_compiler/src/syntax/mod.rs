//! Trigger text parsing
//!
//! Parsing is layered the same way the grammar is: the operand reader
//! interprets one memory-reference or literal field, the condition reader
//! combines two operand reads with a comparator, flag prefix, and hit
//! count, and the trigger parser assembles `_`-separated conditions into
//! groups and `S`-separated groups into the full trigger.
//!
//! Parsing is deliberately permissive: historical inputs were authored
//! under looser rules, so oversized payloads truncate and `==` is
//! accepted. Only structurally unreadable input produces an error.

pub mod condition;
pub mod error;
pub mod operand;
pub mod parser;

pub use error::{SyntaxResult, TriggerParseError};
pub use parser::{ParserMetrics, TriggerParser};

use crate::grammar::Trigger;
use crate::logging::codes;
use crate::{log_error, log_success};

/// Parse a trigger definition string into its structural model.
pub fn parse_trigger(text: &str) -> SyntaxResult<Trigger> {
    parse_trigger_with_metrics(text).map(|(trigger, _)| trigger)
}

/// Parse a trigger definition, also returning parser metrics.
pub fn parse_trigger_with_metrics(text: &str) -> SyntaxResult<(Trigger, ParserMetrics)> {
    let parser = TriggerParser::new(text)?;
    match parser.parse() {
        Ok((trigger, metrics)) => {
            log_success!(codes::success::PARSE_COMPLETE, "Trigger definition parsed",
                "groups" => metrics.groups,
                "conditions" => metrics.conditions
            );
            Ok((trigger, metrics))
        }
        Err(error) => {
            match error.span() {
                Some(span) => log_error!(error.error_code(), &error.to_string(), span = span),
                None => log_error!(error.error_code(), &error.to_string()),
            }
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Comparator, ConditionFlag, MemSize, OperandKind};
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_empty_input() {
        let trigger = parse_trigger("").unwrap();
        assert!(trigger.is_empty());
        assert!(trigger.core().is_empty());
        assert!(trigger.alts().is_empty());
    }

    #[test]
    fn test_parse_single_condition() {
        let trigger = parse_trigger("0xH1234=5").unwrap();
        assert_eq!(trigger.group_count(), 1);
        assert_eq!(trigger.core().len(), 1);

        let cond = &trigger.core().conditions()[0];
        assert_eq!(cond.flag(), ConditionFlag::Standard);
        assert_eq!(cond.lhs().kind(), OperandKind::Address);
        assert_eq!(cond.lhs().size(), Some(MemSize::EightBit));
        assert_eq!(cond.lhs().value(), 0x1234);
        assert_eq!(cond.comparator(), Some(Comparator::Equals));
        assert_eq!(cond.rhs().map(|rhs| rhs.value()), Some(5));
        assert_eq!(cond.hit_target(), None);
    }

    #[test]
    fn test_parse_core_and_alts() {
        let trigger = parse_trigger("0xH1234=1S0xH2345=2S0xH3456=3").unwrap();
        assert_eq!(trigger.group_count(), 3);
        assert_eq!(trigger.core().len(), 1);
        assert_eq!(trigger.alts().len(), 2);
        assert_eq!(trigger.alts()[1].conditions()[0].lhs().value(), 0x3456);
    }

    #[test]
    fn test_parse_empty_alt_groups() {
        // two consecutive separators leave an empty alt group
        let trigger = parse_trigger("0xH1234=1SS0xH2345=2").unwrap();
        assert_eq!(trigger.group_count(), 3);
        assert!(trigger.alts()[0].is_empty());
        assert_eq!(trigger.alts()[1].len(), 1);

        // a trailing separator leaves an empty trailing alt group
        let trigger = parse_trigger("0xH1234=1S").unwrap();
        assert_eq!(trigger.group_count(), 2);
        assert!(trigger.alts()[0].is_empty());
    }

    #[test]
    fn test_parse_multiple_conditions() {
        let trigger = parse_trigger("0xH1234=1_0xH2345>d0xH2345_R:0xH3456=1").unwrap();
        let conditions = trigger.core().conditions();
        assert_eq!(conditions.len(), 3);
        assert_eq!(conditions[1].rhs().map(|r| r.kind()), Some(OperandKind::Delta));
        assert_eq!(conditions[2].flag(), ConditionFlag::ResetIf);
    }

    #[test]
    fn test_parse_trailing_garbage_fails() {
        assert_matches!(
            parse_trigger("0xH1234=5?"),
            Err(TriggerParseError::UnexpectedCharacter { found: '?', .. })
        );
    }

    #[test]
    fn test_parse_metrics() {
        let (_, metrics) = parse_trigger_with_metrics("A:0xH1234=1_0xH2345=2.3.S0x3456=1").unwrap();
        assert_eq!(metrics.groups, 2);
        assert_eq!(metrics.conditions, 3);
        assert_eq!(metrics.flagged_conditions, 1);
        assert_eq!(metrics.hit_targets, 1);
    }
}
