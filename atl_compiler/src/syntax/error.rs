//! Error types for trigger text parsing

use crate::config::compile_time::syntax::{
    MAX_ALT_GROUPS, MAX_CONDITIONS_PER_GROUP, MAX_HIT_TARGET_DIGITS,
};
use crate::lexical::LexerError;
use crate::logging::{codes, Code};
use crate::utils::Span;

pub type SyntaxResult<T> = Result<T, TriggerParseError>;

/// Structurally unreadable trigger text.
///
/// Parsing is tolerant by design; these errors only cover input that
/// cannot be given any structure at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriggerParseError {
    #[error("Unexpected character '{found}' at {span}")]
    UnexpectedCharacter { found: char, span: Span },

    #[error("Expected an operand at {span}")]
    MissingOperand { span: Span },

    #[error("Operand prefix without a numeric payload at {span}")]
    MissingNumericPayload { span: Span },

    #[error("Hit count at {span} has too many digits (max {MAX_HIT_TARGET_DIGITS})")]
    HitCountTooLong { span: Span },

    #[error("Too many conditions in group: {count} (max {MAX_CONDITIONS_PER_GROUP})")]
    TooManyConditions { count: usize },

    #[error("Too many alt groups: {count} (max {MAX_ALT_GROUPS})")]
    TooManyAltGroups { count: usize },

    #[error(transparent)]
    Lexical(#[from] LexerError),
}

impl TriggerParseError {
    /// Get error code for the global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedCharacter { .. } => codes::syntax::UNEXPECTED_CHARACTER,
            Self::MissingOperand { .. } => codes::syntax::MISSING_OPERAND,
            Self::MissingNumericPayload { .. } => codes::syntax::MISSING_NUMERIC_PAYLOAD,
            Self::HitCountTooLong { .. } => codes::syntax::HIT_COUNT_TOO_LONG,
            Self::TooManyConditions { .. } => codes::syntax::TOO_MANY_CONDITIONS,
            Self::TooManyAltGroups { .. } => codes::syntax::TOO_MANY_ALT_GROUPS,
            Self::Lexical(inner) => inner.error_code(),
        }
    }

    /// Get span if available
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnexpectedCharacter { span, .. }
            | Self::MissingOperand { span }
            | Self::MissingNumericPayload { span }
            | Self::HitCountTooLong { span } => Some(*span),
            Self::TooManyConditions { .. } | Self::TooManyAltGroups { .. } => None,
            Self::Lexical(inner) => inner.span(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    #[test]
    fn test_error_code_mapping() {
        let span = Span::single(Position::start());

        let unexpected = TriggerParseError::UnexpectedCharacter { found: '?', span };
        assert_eq!(unexpected.error_code().as_str(), "E040");
        assert_eq!(unexpected.span(), Some(span));

        let missing = TriggerParseError::MissingOperand { span };
        assert_eq!(missing.error_code().as_str(), "E041");

        let overflow = TriggerParseError::TooManyConditions { count: 5000 };
        assert_eq!(overflow.error_code().as_str(), "E044");
        assert_eq!(overflow.span(), None);
    }

    #[test]
    fn test_lexical_error_wrapping() {
        let inner = LexerError::MissingDigits {
            span: Span::from_offsets(3, 4),
        };
        let wrapped = TriggerParseError::from(inner.clone());
        assert_eq!(wrapped.error_code(), inner.error_code());
        assert_eq!(wrapped.span(), inner.span());
    }
}
