//! Pipeline result types

use super::error::PipelineError;
use crate::file_processor::FileMetadata;
use crate::grammar::Trigger;
use crate::serialization::AchievementRecord;
use crate::validation::ValidationError;
use std::time::Duration;

/// Outcome of processing one trigger definition string
#[derive(Debug, Clone)]
pub struct TriggerReport {
    pub trigger: Trigger,
    /// Canonical re-serialization of the parsed trigger
    pub canonical: String,
    /// First chain-combination violation, if any
    pub validation: Option<ValidationError>,
    pub group_count: usize,
    pub condition_count: usize,
    pub duration: Duration,
}

impl TriggerReport {
    pub fn is_valid(&self) -> bool {
        self.validation.is_none()
    }
}

/// One successfully decoded record line
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    pub line_number: usize,
    pub record: AchievementRecord,
    pub validation: Option<ValidationError>,
}

/// One record line that failed to decode or parse
#[derive(Debug, Clone)]
pub struct RecordFailure {
    pub line_number: usize,
    pub error: PipelineError,
}

/// Per-line outcomes for one record file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub metadata: FileMetadata,
    pub records: Vec<RecordOutcome>,
    pub failures: Vec<RecordFailure>,
    pub skipped_lines: usize,
    pub duration: Duration,
}

impl FileReport {
    pub fn new(metadata: FileMetadata) -> Self {
        Self {
            metadata,
            records: Vec::new(),
            failures: Vec::new(),
            skipped_lines: 0,
            duration: Duration::ZERO,
        }
    }

    /// Decoded records whose trigger failed validation
    pub fn invalid_trigger_count(&self) -> usize {
        self.records
            .iter()
            .filter(|outcome| outcome.validation.is_some())
            .count()
    }

    /// True when every line decoded and every trigger validated
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.invalid_trigger_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn metadata() -> FileMetadata {
        FileMetadata {
            path: PathBuf::from("records.txt"),
            size: 100,
            line_count: 3,
        }
    }

    #[test]
    fn test_empty_report_is_clean() {
        let report = FileReport::new(metadata());
        assert!(report.is_clean());
        assert_eq!(report.invalid_trigger_count(), 0);
    }

    #[test]
    fn test_failures_make_report_dirty() {
        let mut report = FileReport::new(metadata());
        report.failures.push(RecordFailure {
            line_number: 2,
            error: PipelineError::pipeline_error("bad line"),
        });
        assert!(!report.is_clean());
    }
}
