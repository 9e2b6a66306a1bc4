//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and
//! classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const TOO_MANY_LINES: Code = Code::new("E012");
}

/// Lexical error codes
pub mod lexical {
    use super::Code;

    pub const UNTERMINATED_STRING: Code = Code::new("E020");
    pub const MISSING_DIGITS: Code = Code::new("E021");
    pub const STRING_TOO_LARGE: Code = Code::new("E022");
    pub const INPUT_TOO_LONG: Code = Code::new("E023");
}

/// Trigger syntax error codes
pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_CHARACTER: Code = Code::new("E040");
    pub const MISSING_OPERAND: Code = Code::new("E041");
    pub const MISSING_NUMERIC_PAYLOAD: Code = Code::new("E042");
    pub const HIT_COUNT_TOO_LONG: Code = Code::new("E043");
    pub const TOO_MANY_CONDITIONS: Code = Code::new("E044");
    pub const TOO_MANY_ALT_GROUPS: Code = Code::new("E045");
}

/// Chain validation error codes
pub mod validation {
    use super::Code;

    pub const DANGLING_COMBINATOR: Code = Code::new("E060");
    pub const MISSING_CHAIN_TARGET: Code = Code::new("E061");
}

/// Achievement record codec error codes
pub mod record {
    use super::Code;

    pub const MISSING_FIELD: Code = Code::new("E080");
    pub const UNTERMINATED_FIELD: Code = Code::new("E081");
    pub const INVALID_NUMBER: Code = Code::new("E082");
    pub const RECORD_TOO_LONG: Code = Code::new("E083");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const PARSE_COMPLETE: Code = Code::new("I020");
    pub const SERIALIZATION_COMPLETE: Code = Code::new("I040");
    pub const VALIDATION_PASSED: Code = Code::new("I060");
    pub const RECORD_DECODED: Code = Code::new("I080");
    pub const FILE_REPORT_COMPLETE: Code = Code::new("I081");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        registry.insert(
            "ERR001",
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report",
            ),
        );
        registry.insert(
            "ERR002",
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check configuration and dependencies",
            ),
        );

        // File processing errors
        registry.insert(
            "E005",
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File not found at specified path",
                "Check file path and ensure file exists",
            ),
        );
        registry.insert(
            "E006",
            ErrorMetadata::new(
                "E006",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "File does not have the expected .txt extension",
                "Rename the record file with a .txt extension or verify its type",
            ),
        );
        registry.insert(
            "E007",
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File exceeds maximum size limit",
                "Reduce file size or increase processing limits",
            ),
        );
        registry.insert(
            "E008",
            ErrorMetadata::new(
                "E008",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File is empty when content expected",
                "Provide a file with content or check file integrity",
            ),
        );
        registry.insert(
            "E010",
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Invalid UTF-8 encoding in file",
                "Convert file to UTF-8 encoding or fix encoding issues",
            ),
        );
        registry.insert(
            "E011",
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "I/O error during file operation",
                "Check disk space, permissions, and file system integrity",
            ),
        );
        registry.insert(
            "E012",
            ErrorMetadata::new(
                "E012",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File contains too many lines",
                "Split the record file or increase processing limits",
            ),
        );

        // Lexical errors
        registry.insert(
            "E020",
            ErrorMetadata::new(
                "E020",
                "Lexical",
                Severity::Medium,
                true,
                false,
                "Quoted string not properly terminated",
                "Add closing quote to the field",
            ),
        );
        registry.insert(
            "E021",
            ErrorMetadata::new(
                "E021",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Expected digits where none were found",
                "Supply a numeric value",
            ),
        );
        registry.insert(
            "E022",
            ErrorMetadata::new(
                "E022",
                "Lexical",
                Severity::Medium,
                true,
                false,
                "Quoted string exceeds maximum size limit",
                "Reduce the field size",
            ),
        );
        registry.insert(
            "E023",
            ErrorMetadata::new(
                "E023",
                "Lexical",
                Severity::High,
                false,
                true,
                "Input exceeds maximum length",
                "Reduce trigger definition length or increase limits",
            ),
        );

        // Syntax errors
        registry.insert(
            "E040",
            ErrorMetadata::new(
                "E040",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Unexpected character in trigger definition",
                "Check the trigger text near the reported position",
            ),
        );
        registry.insert(
            "E041",
            ErrorMetadata::new(
                "E041",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Expected an operand",
                "Supply a memory reference or literal value",
            ),
        );
        registry.insert(
            "E042",
            ErrorMetadata::new(
                "E042",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Operand prefix without a numeric payload",
                "Supply the address or value digits after the prefix",
            ),
        );
        registry.insert(
            "E043",
            ErrorMetadata::new(
                "E043",
                "Syntax",
                Severity::Low,
                true,
                false,
                "Hit count has too many digits",
                "Reduce the hit target value",
            ),
        );
        registry.insert(
            "E044",
            ErrorMetadata::new(
                "E044",
                "Syntax",
                Severity::High,
                false,
                true,
                "Too many conditions in one group",
                "Split the group or increase limits",
            ),
        );
        registry.insert(
            "E045",
            ErrorMetadata::new(
                "E045",
                "Syntax",
                Severity::High,
                false,
                true,
                "Too many alt groups",
                "Reduce the number of alt groups or increase limits",
            ),
        );

        // Validation errors
        registry.insert(
            "E060",
            ErrorMetadata::new(
                "E060",
                "Validation",
                Severity::Medium,
                true,
                false,
                "Combinator flag on the final condition of a group",
                "Add a following condition or change the flag",
            ),
        );
        registry.insert(
            "E061",
            ErrorMetadata::new(
                "E061",
                "Validation",
                Severity::Medium,
                true,
                false,
                "Hit chain terminates without a hit target",
                "Add a hit target to the final condition of the chain",
            ),
        );

        // Record codec errors
        registry.insert(
            "E080",
            ErrorMetadata::new(
                "E080",
                "Record",
                Severity::Medium,
                true,
                false,
                "Achievement record field missing or malformed",
                "Check the record line against the expected field layout",
            ),
        );
        registry.insert(
            "E081",
            ErrorMetadata::new(
                "E081",
                "Record",
                Severity::Medium,
                true,
                false,
                "Quoted record field not terminated",
                "Add the closing quote to the field",
            ),
        );
        registry.insert(
            "E082",
            ErrorMetadata::new(
                "E082",
                "Record",
                Severity::Medium,
                true,
                false,
                "Record number field is not a valid integer",
                "Fix the numeric field",
            ),
        );
        registry.insert(
            "E083",
            ErrorMetadata::new(
                "E083",
                "Record",
                Severity::Medium,
                true,
                false,
                "Serialized record exceeds length limit",
                "Shorten the trigger definition or text fields",
            ),
        );

        // Success codes
        registry.insert(
            "I001",
            ErrorMetadata::new(
                "I001",
                "System",
                Severity::Low,
                true,
                false,
                "Operation completed successfully",
                "Continue normal operation",
            ),
        );
        registry.insert(
            "I004",
            ErrorMetadata::new(
                "I004",
                "System",
                Severity::Low,
                true,
                false,
                "System initialization completed successfully",
                "Continue normal operation",
            ),
        );
        registry.insert(
            "I006",
            ErrorMetadata::new(
                "I006",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "File processing completed successfully",
                "Continue to next processing stage",
            ),
        );
        registry.insert(
            "I020",
            ErrorMetadata::new(
                "I020",
                "Syntax",
                Severity::Low,
                true,
                false,
                "Trigger definition parsed successfully",
                "Continue to validation",
            ),
        );
        registry.insert(
            "I040",
            ErrorMetadata::new(
                "I040",
                "Serialization",
                Severity::Low,
                true,
                false,
                "Trigger serialization completed",
                "Continue normal operation",
            ),
        );
        registry.insert(
            "I060",
            ErrorMetadata::new(
                "I060",
                "Validation",
                Severity::Low,
                true,
                false,
                "Trigger validation passed",
                "Continue normal operation",
            ),
        );
        registry.insert(
            "I080",
            ErrorMetadata::new(
                "I080",
                "Record",
                Severity::Low,
                true,
                false,
                "Achievement record decoded successfully",
                "Continue to trigger parsing",
            ),
        );
        registry.insert(
            "I081",
            ErrorMetadata::new(
                "I081",
                "Record",
                Severity::Low,
                true,
                false,
                "Record file report completed",
                "Review per-line outcomes",
            ),
        );

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
