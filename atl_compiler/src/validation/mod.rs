//! Structural validation of chain-combination rules
//!
//! The validator walks a parsed trigger group by group and reports the
//! first violation as a single human-readable, group-qualified message.
//! It operates on the structural model only, so triggers built
//! programmatically validate exactly like parsed ones. First-error-only
//! is deliberate: the interactive authoring workflow fixes one problem at
//! a time and re-validates from scratch.

pub mod chains;
pub mod error;

pub use error::{GroupRef, ValidationError, ValidationErrorKind};

use crate::config::runtime::ValidationPreferences;
use crate::grammar::Trigger;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};

/// Report the first chain-combination violation in a trigger, if any.
pub fn validate_trigger(trigger: &Trigger) -> Option<ValidationError> {
    let group_count = trigger.group_count();

    if let Some(error) = chains::check_group(trigger.core(), GroupRef::Core, group_count) {
        return Some(error);
    }

    for (index, alt) in trigger.alts().iter().enumerate() {
        if let Some(error) = chains::check_group(alt, GroupRef::Alt(index + 1), group_count) {
            return Some(error);
        }
    }

    None
}

/// Validate and log the outcome through the global logging system.
pub fn validate_trigger_logged(
    trigger: &Trigger,
    preferences: &ValidationPreferences,
) -> Option<ValidationError> {
    if preferences.log_validation_details {
        log_debug!("Validating trigger",
            "groups" => trigger.group_count(),
            "conditions" => trigger.condition_count()
        );
    }

    match validate_trigger(trigger) {
        Some(error) => {
            log_error!(error.error_code(), &error.to_string(),
                "group" => error.group(),
                "conditions" => trigger.condition_count()
            );
            Some(error)
        }
        None => {
            log_success!(codes::success::VALIDATION_PASSED, "Trigger validation passed",
                "groups" => trigger.group_count()
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_trigger;

    fn validate(text: &str) -> Option<String> {
        let trigger = parse_trigger(text).unwrap();
        validate_trigger(&trigger).map(|error| error.to_string())
    }

    #[test]
    fn test_empty_trigger_is_valid() {
        assert_eq!(validate(""), None);
        assert_eq!(validate_trigger(&Trigger::empty()), None);
    }

    #[test]
    fn test_plain_conditions_are_valid() {
        assert_eq!(validate("0xH1234=5"), None);
        assert_eq!(validate("0xH1234=5_R:0xH2345=1_P:0xH3456=1"), None);
    }

    #[test]
    fn test_final_combinator_rule() {
        assert_eq!(
            validate("A:0xH1234=1"),
            Some("Final condition type expects another condition to follow.".to_string())
        );

        // followed by another condition the same flag is fine
        assert_eq!(validate("A:0xH1234=1_0xH2345=2"), None);
    }

    #[test]
    fn test_all_final_combinators_error() {
        for flag in ["A", "B", "N", "O", "Z"] {
            let text = format!("0xH1234=1_{}:0xH2345=2", flag);
            assert_eq!(
                validate(&text),
                Some("Final condition type expects another condition to follow.".to_string()),
                "flag {}",
                flag
            );
        }
    }

    #[test]
    fn test_non_chaining_flags_valid_in_final_position() {
        for flag in ["P", "R", "M", "G", "T", "I"] {
            let text = format!("0xH1234=1_{}:0xH2345=2", flag);
            assert_eq!(validate(&text), None, "flag {}", flag);
        }
    }

    #[test]
    fn test_group_qualification() {
        // single group: no prefix
        assert_eq!(
            validate("A:0xH1234=2"),
            Some("Final condition type expects another condition to follow.".to_string())
        );

        // Core error with an alt group present
        assert_eq!(
            validate("A:0xH1234=2S0x3456=1"),
            Some("Core: Final condition type expects another condition to follow.".to_string())
        );

        // same condition in Alt 1
        assert_eq!(
            validate("0x3456=1SA:0xH1234=2"),
            Some("Alt 1: Final condition type expects another condition to follow.".to_string())
        );

        // and in Alt 2
        assert_eq!(
            validate("0x3456=1S0x3456=1SA:0xH1234=2"),
            Some("Alt 2: Final condition type expects another condition to follow.".to_string())
        );
    }

    #[test]
    fn test_addhits_chain_target_rule() {
        assert_eq!(
            validate("C:0xH1234=1_0xH2345=2"),
            Some("Condition 2: Final condition in AddHits chain must have a hit target.".to_string())
        );
        assert_eq!(
            validate("D:0xH1234=1_0xH2345=2"),
            Some("Condition 2: Final condition in AddHits chain must have a hit target.".to_string())
        );

        // trailing hit target satisfies the chain
        assert_eq!(validate("C:0xH1234=1_0xH2345=2.1."), None);
    }

    #[test]
    fn test_addhits_chain_continues_through_links() {
        // the chain is not required to carry a target until its final link
        assert_eq!(
            validate("C:0xH1=1_N:0xH2=2_0xH3=3"),
            Some("Condition 3: Final condition in AddHits chain must have a hit target.".to_string())
        );
        assert_eq!(validate("C:0xH1=1_N:0xH2=2_0xH3=3.5."), None);
    }

    #[test]
    fn test_chain_rule_is_group_qualified() {
        assert_eq!(
            validate("C:0xH1234=1_0xH2345=2S0x3456=1"),
            Some(
                "Core: Condition 2: Final condition in AddHits chain must have a hit target."
                    .to_string()
            )
        );
        assert_eq!(
            validate("0x3456=1SC:0xH1234=1_0xH2345=2"),
            Some(
                "Alt 1: Condition 2: Final condition in AddHits chain must have a hit target."
                    .to_string()
            )
        );
    }

    #[test]
    fn test_final_position_rule_wins_at_same_condition() {
        // the chain ends on a condition that is also a dangling combinator;
        // the final-condition rule reports first
        assert_eq!(
            validate("C:0xH1=1_A:0xH2=2"),
            Some("Final condition type expects another condition to follow.".to_string())
        );
    }

    #[test]
    fn test_first_error_wins_across_groups() {
        // both Core and Alt 1 are invalid; Core reports
        assert_eq!(
            validate("A:0xH1=1SN:0xH2=2"),
            Some("Core: Final condition type expects another condition to follow.".to_string())
        );
    }

    #[test]
    fn test_middle_position_combinators_never_error() {
        // any combinator followed by at least one more condition is fine
        // at its own position
        for flag in ["A", "B", "N", "O", "Z"] {
            let text = format!("{}:0xH1234=1_0xH2345=2", flag);
            assert_eq!(validate(&text), None, "flag {}", flag);
        }
        for flag in ["C", "D"] {
            let text = format!("{}:0xH1234=1_0xH2345=2.1.", flag);
            assert_eq!(validate(&text), None, "flag {}", flag);
        }
    }

    #[test]
    fn test_validation_is_idempotent() {
        let trigger = parse_trigger("C:0xH1234=1_0xH2345=2").unwrap();
        let first = validate_trigger(&trigger);
        let second = validate_trigger(&trigger);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_alt_groups_are_valid() {
        assert_eq!(validate("0xH1234=1S"), None);
        assert_eq!(validate("0xH1234=1SS0xH2=2"), None);
    }

    #[test]
    fn test_logged_validation_matches_pure_validation() {
        let trigger = parse_trigger("A:0xH1234=1").unwrap();
        let preferences = ValidationPreferences::default();
        assert_eq!(
            validate_trigger_logged(&trigger, &preferences),
            validate_trigger(&trigger)
        );
    }
}
