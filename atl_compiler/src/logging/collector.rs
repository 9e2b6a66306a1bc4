//! Per-file error collection for cargo-style batch reporting

use super::events::LogEvent;
use crate::config::compile_time::logging::{MAX_ERROR_COLLECTION, MAX_LOG_EVENTS_PER_FILE};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Context for the file currently being processed on this thread
#[derive(Debug, Clone)]
pub struct FileProcessingContext {
    pub file_path: PathBuf,
    pub file_id: usize,
}

impl FileProcessingContext {
    pub fn new(file_path: PathBuf, file_id: usize) -> Self {
        Self { file_path, file_id }
    }
}

/// Aggregated counts across all processed files
#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

#[derive(Default)]
struct CollectorState {
    files: Vec<PathBuf>,
    events: HashMap<PathBuf, Vec<LogEvent>>,
    total_events: usize,
}

/// Thread-safe collector of error and warning events, grouped per file
pub struct ErrorCollector {
    state: Mutex<CollectorState>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CollectorState::default()),
        }
    }

    /// Register a file so it appears in the summary even with no events
    pub fn record_file_context(&self, context: FileProcessingContext) {
        let mut state = self.state.lock().unwrap();
        if !state.files.contains(&context.file_path) {
            state.files.push(context.file_path.clone());
            state.events.entry(context.file_path).or_default();
        }
    }

    /// Record an error or warning event against a file
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        if !event.is_error() && !event.is_warning() {
            return;
        }

        let mut state = self.state.lock().unwrap();
        if state.total_events >= MAX_ERROR_COLLECTION {
            return;
        }

        let events = state.events.entry(file_path.to_path_buf()).or_default();
        if events.len() >= MAX_LOG_EVENTS_PER_FILE {
            return;
        }

        events.push(event);
        state.total_events += 1;
    }

    /// Get collected events for a specific file
    pub fn get_file_errors(&self, file_path: &Path) -> Vec<LogEvent> {
        self.state
            .lock()
            .unwrap()
            .events
            .get(file_path)
            .cloned()
            .unwrap_or_default()
    }

    /// Get aggregated summary
    pub fn get_summary(&self) -> ProcessingSummary {
        let state = self.state.lock().unwrap();
        let mut summary = ProcessingSummary {
            total_files: state.files.len(),
            ..Default::default()
        };

        for events in state.events.values() {
            summary.total_errors += events.iter().filter(|e| e.is_error()).count();
            summary.total_warnings += events.iter().filter(|e| e.is_warning()).count();
        }

        summary
    }

    /// Remove all collected events
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        state.files.clear();
        state.events.clear();
        state.total_events = 0;
    }

    /// Current usage against the collection capacity
    pub fn get_capacity_info(&self) -> (usize, usize, f64) {
        let state = self.state.lock().unwrap();
        let current = state.total_events;
        (
            current,
            MAX_ERROR_COLLECTION,
            current as f64 / MAX_ERROR_COLLECTION as f64,
        )
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Render collected events in a cargo-like per-file layout
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let state = collector.state.lock().unwrap();
    let mut output = String::new();

    let mut error_total = 0;
    let mut warning_total = 0;

    for file in &state.files {
        let events = match state.events.get(file) {
            Some(events) if !events.is_empty() => events,
            _ => continue,
        };

        for event in events {
            let label = if event.is_error() {
                error_total += 1;
                "error"
            } else {
                warning_total += 1;
                "warning"
            };

            output.push_str(&format!(
                "{}[{}]: {}\n",
                label,
                event.code.as_str(),
                event.message
            ));

            match &event.span {
                Some(span) => output.push_str(&format!(
                    "  --> {}:{}:{}\n",
                    file.display(),
                    span.start().line,
                    span.start().column
                )),
                None => output.push_str(&format!("  --> {}\n", file.display())),
            }
        }
    }

    if error_total == 0 && warning_total == 0 {
        output.push_str("no errors or warnings collected\n");
    } else {
        output.push_str(&format!(
            "\n{} error(s), {} warning(s) across {} file(s)\n",
            error_total,
            warning_total,
            state.files.len()
        ));
    }

    output
}
