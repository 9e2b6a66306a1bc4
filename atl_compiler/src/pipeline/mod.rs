//! Orchestration: text in, structured outcomes out
//!
//! Two entry points: `process_trigger` runs one definition string through
//! parse, validation, and canonical re-serialization; `process_record_file`
//! decodes a local achievement record file line by line and collects
//! per-line outcomes into a report. One bad line never aborts a file.

pub mod error;
pub mod result;

pub use error::PipelineError;
pub use result::{FileReport, RecordFailure, RecordOutcome, TriggerReport};

use crate::config::runtime::{LexicalPreferences, ValidationPreferences};
use crate::grammar::Trigger;
use crate::logging;
use crate::logging::codes;
use crate::serialization::{serialize_trigger, AchievementRecord};
use crate::syntax::parse_trigger_with_metrics;
use crate::validation::{validate_trigger_logged, ValidationError};
use crate::{log_debug, log_error, log_info, log_success};
use std::path::PathBuf;
use std::time::Instant;

/// Verify that the pipeline's error codes are wired into the registry.
pub fn validate_pipeline() -> Result<(), String> {
    let required = [
        codes::syntax::UNEXPECTED_CHARACTER,
        codes::validation::DANGLING_COMBINATOR,
        codes::validation::MISSING_CHAIN_TARGET,
        codes::record::MISSING_FIELD,
        codes::success::PARSE_COMPLETE,
        codes::success::VALIDATION_PASSED,
    ];

    for code in &required {
        if codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!(
                "Pipeline error code {} not properly configured",
                code.as_str()
            ));
        }
    }

    Ok(())
}

/// Process one trigger definition string: parse, validate, re-serialize.
pub fn process_trigger(text: &str) -> Result<TriggerReport, PipelineError> {
    let start_time = Instant::now();
    let lexical_preferences = LexicalPreferences::default();

    log_info!("Processing trigger definition", "length" => text.len());

    let (trigger, metrics) = match parse_trigger_with_metrics(text) {
        Ok(parsed) => parsed,
        Err(error) => {
            if lexical_preferences.include_position_in_errors {
                if let Some(span) = error.span() {
                    log_debug!("Parse failure position", "span" => span);
                }
            }
            return Err(PipelineError::from(error));
        }
    };

    let validation = validate_trigger_logged(&trigger, &ValidationPreferences::default());

    let canonical = serialize_trigger(&trigger);
    log_success!(codes::success::SERIALIZATION_COMPLETE, "Canonical form rendered",
        "length" => canonical.len()
    );

    Ok(TriggerReport {
        trigger,
        canonical,
        validation,
        group_count: metrics.groups,
        condition_count: metrics.conditions,
        duration: start_time.elapsed(),
    })
}

/// Decode one record line and validate its trigger chain.
pub fn process_record_line(
    line: &str,
) -> Result<(AchievementRecord, Trigger, Option<ValidationError>), PipelineError> {
    let record = AchievementRecord::deserialize(line)?;
    log_debug!("Record decoded", "id" => record.id, "title" => record.title.as_str());

    let trigger = crate::syntax::parse_trigger(&record.trigger)?;
    let validation = validate_trigger_logged(&trigger, &ValidationPreferences::default());

    Ok((record, trigger, validation))
}

/// Process a local achievement record file line by line.
pub fn process_record_file(path: &str) -> Result<FileReport, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(PathBuf::from(path), 0, || {
        log_info!("Starting record file processing", "file" => path);

        let file = crate::file_processor::process_file(path)?;
        let mut report = FileReport::new(file.metadata.clone());

        for (index, raw_line) in file.source.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();

            // blank lines and comment lines are not records
            if line.is_empty() || line.starts_with('/') || line.starts_with('\\') {
                report.skipped_lines += 1;
                continue;
            }

            // header lines (version, game title) do not start with an id
            if !line.chars().next().is_some_and(|ch| ch.is_ascii_digit()) {
                log_debug!("Skipping header line", "line" => line_number);
                report.skipped_lines += 1;
                continue;
            }

            match process_record_line(line) {
                Ok((record, _, validation)) => {
                    if let Some(error) = &validation {
                        log_error!(error.error_code(), &error.to_string(),
                            "line" => line_number,
                            "achievement" => record.id
                        );
                    } else {
                        log_success!(codes::success::RECORD_DECODED, "Record processed",
                            "line" => line_number,
                            "achievement" => record.id
                        );
                    }
                    report.records.push(RecordOutcome {
                        line_number,
                        record,
                        validation,
                    });
                }
                Err(error) => {
                    log_error!(error.error_code(), &error.to_string(), "line" => line_number);
                    report.failures.push(RecordFailure { line_number, error });
                }
            }
        }

        report.duration = start_time.elapsed();

        log_success!(codes::success::FILE_REPORT_COMPLETE, "Record file processed",
            "file" => path,
            "records" => report.records.len(),
            "failures" => report.failures.len(),
            "invalid_triggers" => report.invalid_trigger_count(),
            "skipped" => report.skipped_lines,
            "duration_ms" => report.duration.as_secs_f64() * 1000.0
        );

        Ok(report)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_validate_pipeline() {
        assert!(validate_pipeline().is_ok());
    }

    #[test]
    fn test_process_trigger_valid() {
        let report = process_trigger("0xH1234=5S0xH2345=2").unwrap();
        assert!(report.is_valid());
        assert_eq!(report.group_count, 2);
        assert_eq!(report.condition_count, 2);
        assert_eq!(report.canonical, "0xH1234=5S0xH2345=2");
    }

    #[test]
    fn test_process_trigger_with_validation_error() {
        let report = process_trigger("A:0xH1234=1").unwrap();
        assert!(!report.is_valid());
        assert_eq!(
            report.validation.as_ref().map(|e| e.to_string()),
            Some("Final condition type expects another condition to follow.".to_string())
        );
    }

    #[test]
    fn test_process_trigger_parse_failure() {
        assert_matches!(
            process_trigger("0xH1234=5#nope"),
            Err(PipelineError::Parse(_))
        );
    }

    #[test]
    fn test_process_record_line() {
        let (record, trigger, validation) =
            process_record_line("1:\"0xH1234=5\":Title:Desc:::author:10:::::badge").unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(trigger.condition_count(), 1);
        assert!(validation.is_none());
    }

    #[test]
    fn test_process_record_file_mixed_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "v0.030").unwrap();
        writeln!(file, "Game Title").unwrap();
        writeln!(file, "// comment").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "1:\"0xH1234=5\":Good:D:::a:5:::::b").unwrap();
        writeln!(file, "2:\"A:0xH1234=1\":Dangling:D:::a:5:::::b").unwrap();
        writeln!(file, "3:\"0xH12=5\":Broken:D").unwrap();

        let report = process_record_file(file.path().to_str().unwrap()).unwrap();

        assert_eq!(report.skipped_lines, 4);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.invalid_trigger_count(), 1);
        assert!(!report.is_clean());

        assert_eq!(report.records[0].line_number, 5);
        assert!(report.records[0].validation.is_none());
        assert_eq!(report.records[1].line_number, 6);
        assert!(report.records[1].validation.is_some());
        assert_eq!(report.failures[0].line_number, 7);
    }

    #[test]
    fn test_process_record_file_missing() {
        assert_matches!(
            process_record_file("/nonexistent/records.txt"),
            Err(PipelineError::FileProcessing(_))
        );
    }
}
