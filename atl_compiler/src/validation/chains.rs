//! Per-group chain scanning
//!
//! A single left-to-right pass with explicit in-chain state. The
//! final-condition rule is checked before the chain rule when both apply
//! to the same condition, preserving the first-error-wins contract.

use super::error::{GroupRef, ValidationError, ValidationErrorKind};
use crate::grammar::ConditionGroup;

/// Scan one group for the first chain-combination violation.
pub(super) fn check_group(
    group: &ConditionGroup,
    group_ref: GroupRef,
    group_count: usize,
) -> Option<ValidationError> {
    let conditions = group.conditions();
    let mut chain_active = false;

    for (index, condition) in conditions.iter().enumerate() {
        let flag = condition.flag();
        let is_last = index + 1 == conditions.len();

        if is_last && flag.requires_following_condition() {
            return Some(ValidationError::new(
                group_ref,
                ValidationErrorKind::DanglingCombinator { flag },
                group_count,
            ));
        }

        if flag.starts_hit_chain() {
            chain_active = true;
        }

        // the chain ends at the first condition not carrying a
        // chain-continuing flag; only there is the target required
        if chain_active && !flag.continues_hit_chain() {
            if condition.hit_target().is_none() {
                return Some(ValidationError::new(
                    group_ref,
                    ValidationErrorKind::MissingChainTarget {
                        position: index + 1,
                    },
                    group_count,
                ));
            }
            chain_active = false;
        }
    }

    None
}
