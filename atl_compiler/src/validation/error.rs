//! Validation error type with group-qualified messages

use crate::grammar::ConditionFlag;
use crate::logging::{codes, Code};
use std::fmt;

/// Which group of the trigger an error was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRef {
    Core,
    /// Alt groups are indexed from 1
    Alt(usize),
}

impl fmt::Display for GroupRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupRef::Core => write!(f, "Core"),
            GroupRef::Alt(index) => write!(f, "Alt {}", index),
        }
    }
}

/// The structural rule that was violated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A combinator flag that attaches to the following condition sits on
    /// the last condition of its group
    DanglingCombinator { flag: ConditionFlag },
    /// A hit chain's final link (1-based position within the group) has
    /// no hit target
    MissingChainTarget { position: usize },
}

/// First structural violation found in a trigger.
///
/// `Display` renders the exact user-facing message, qualified with the
/// group when the trigger has more than one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    group: GroupRef,
    kind: ValidationErrorKind,
    group_count: usize,
}

impl ValidationError {
    pub(crate) fn new(group: GroupRef, kind: ValidationErrorKind, group_count: usize) -> Self {
        Self {
            group,
            kind,
            group_count,
        }
    }

    pub fn group(&self) -> GroupRef {
        self.group
    }

    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }

    /// The full group-qualified message
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn error_code(&self) -> Code {
        match self.kind {
            ValidationErrorKind::DanglingCombinator { .. } => codes::validation::DANGLING_COMBINATOR,
            ValidationErrorKind::MissingChainTarget { .. } => codes::validation::MISSING_CHAIN_TARGET,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.group {
            GroupRef::Core if self.group_count > 1 => write!(f, "Core: ")?,
            GroupRef::Alt(index) => write!(f, "Alt {}: ", index)?,
            GroupRef::Core => {}
        }

        match &self.kind {
            ValidationErrorKind::DanglingCombinator { .. } => {
                write!(f, "Final condition type expects another condition to follow.")
            }
            ValidationErrorKind::MissingChainTarget { position } => write!(
                f,
                "Condition {}: Final condition in AddHits chain must have a hit target.",
                position
            ),
        }
    }
}

impl std::error::Error for ValidationError {}
