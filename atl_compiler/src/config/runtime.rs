// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProcessorPreferences {
    /// Whether to require the .txt extension on record files (user preference, not a hard rule)
    pub require_txt_extension: bool,

    /// Whether to log per-file timing information
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_txt_extension: env_flag("ATL_REQUIRE_TXT_EXTENSION", false),
            enable_performance_logging: env_flag("ATL_ENABLE_PERFORMANCE_LOGGING", true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalPreferences {
    /// Whether to include cursor position information in logged parse errors
    pub include_position_in_errors: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            include_position_in_errors: env_flag("ATL_LEXICAL_INCLUDE_POSITIONS", true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationPreferences {
    /// Whether to log per-group detail while validating
    pub log_validation_details: bool,
}

impl Default for ValidationPreferences {
    fn default() -> Self {
        Self {
            log_validation_details: env_flag("ATL_VALIDATION_LOG_DETAILS", false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializationPreferences {
    /// Whether the record serializer always quotes the trigger field
    pub quote_trigger_field: bool,

    /// Whether short badge identifiers are zero-padded on read
    pub pad_badge_ids: bool,
}

impl Default for SerializationPreferences {
    fn default() -> Self {
        Self {
            quote_trigger_field: env_flag("ATL_QUOTE_TRIGGER_FIELD", true),
            pad_badge_ids: env_flag("ATL_PAD_BADGE_IDS", true),
        }
    }
}

/// Runtime log level selector, convertible to the event system's level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    pub fn to_events_log_level(self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }

    fn from_env(name: &str, default: Self) -> Self {
        match env::var(name).ok().as_deref() {
            Some("error") => LogLevel::Error,
            Some("warning") => LogLevel::Warning,
            Some("info") => LogLevel::Info,
            Some("debug") => LogLevel::Debug,
            _ => default,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Minimum level of events that get logged
    pub min_log_level: LogLevel,

    /// Whether events are emitted as JSON lines
    pub use_structured_logging: bool,

    /// Whether console output is enabled at all
    pub enable_console_logging: bool,

    /// Whether the cargo-style error summary is printed
    pub enable_cargo_style_output: bool,

    /// Whether events carry the current file context
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            min_log_level: LogLevel::from_env("ATL_MIN_LOG_LEVEL", LogLevel::Info),
            use_structured_logging: env_flag("ATL_STRUCTURED_LOGGING", false),
            enable_console_logging: env_flag("ATL_CONSOLE_LOGGING", true),
            enable_cargo_style_output: env_flag("ATL_CARGO_STYLE_OUTPUT", true),
            include_file_context: env_flag("ATL_INCLUDE_FILE_CONTEXT", true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let file_prefs = FileProcessorPreferences::default();
        assert!(file_prefs.enable_performance_logging);

        let lex_prefs = LexicalPreferences::default();
        assert!(lex_prefs.include_position_in_errors);

        let ser_prefs = SerializationPreferences::default();
        assert!(ser_prefs.quote_trigger_field);
        assert!(ser_prefs.pad_badge_ids);
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            LogLevel::Debug.to_events_log_level(),
            crate::logging::events::LogLevel::Debug
        );
        assert_eq!(
            LogLevel::Error.to_events_log_level(),
            crate::logging::events::LogLevel::Error
        );
    }
}
