//! Record file reader with size and encoding checks

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::{codes, Code};
use crate::{log_debug, log_success, log_warning};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// File processing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("File does not have the expected .txt extension: {path}")]
    InvalidExtension { path: String },

    #[error("File too large: {size} bytes (max {MAX_FILE_SIZE})")]
    TooLarge { size: u64 },

    #[error("File is empty: {path}")]
    Empty { path: String },

    #[error("File is not valid UTF-8: {path}")]
    InvalidEncoding { path: String },

    #[error("File has too many lines: {count} (max {MAX_LINE_COUNT})")]
    TooManyLines { count: usize },

    #[error("I/O error reading {path}: {message}")]
    Io { path: String, message: String },
}

impl FileError {
    pub fn error_code(&self) -> Code {
        match self {
            FileError::NotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileError::InvalidExtension { .. } => codes::file_processing::INVALID_EXTENSION,
            FileError::TooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileError::Empty { .. } => codes::file_processing::EMPTY_FILE,
            FileError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileError::TooManyLines { .. } => codes::file_processing::TOO_MANY_LINES,
            FileError::Io { .. } => codes::file_processing::IO_ERROR,
        }
    }
}

/// Metadata of a processed file
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub path: PathBuf,
    pub size: u64,
    pub line_count: usize,
}

/// Source text plus metadata and timing
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }
}

/// Read a record file with default preferences.
pub fn process_file(path: &str) -> Result<FileProcessingResult, FileError> {
    process_file_with_preferences(path, &FileProcessorPreferences::default())
}

/// Read a record file with explicit preferences.
pub fn process_file_with_preferences(
    path: &str,
    preferences: &FileProcessorPreferences,
) -> Result<FileProcessingResult, FileError> {
    let start_time = Instant::now();
    let file_path = Path::new(path);

    log_debug!("Starting file processing", "file" => path);

    if !file_path.exists() {
        return Err(FileError::NotFound {
            path: path.to_string(),
        });
    }

    if preferences.require_txt_extension
        && file_path.extension().and_then(|ext| ext.to_str()) != Some("txt")
    {
        return Err(FileError::InvalidExtension {
            path: path.to_string(),
        });
    }

    let size = fs::metadata(file_path)
        .map_err(|error| FileError::Io {
            path: path.to_string(),
            message: error.to_string(),
        })?
        .len();

    if size > MAX_FILE_SIZE {
        return Err(FileError::TooLarge { size });
    }
    if size == 0 {
        return Err(FileError::Empty {
            path: path.to_string(),
        });
    }
    if size > LARGE_FILE_THRESHOLD {
        log_warning!("Record file exceeds large-file threshold",
            "size" => size,
            "threshold" => LARGE_FILE_THRESHOLD
        );
    }

    let bytes = fs::read(file_path).map_err(|error| FileError::Io {
        path: path.to_string(),
        message: error.to_string(),
    })?;

    let source = String::from_utf8(bytes).map_err(|_| FileError::InvalidEncoding {
        path: path.to_string(),
    })?;

    let line_count = source.lines().count();
    if line_count > MAX_LINE_COUNT {
        return Err(FileError::TooManyLines { count: line_count });
    }

    let result = FileProcessingResult {
        source,
        metadata: FileMetadata {
            path: file_path.to_path_buf(),
            size,
            line_count,
        },
        processing_duration: start_time.elapsed(),
    };

    if preferences.enable_performance_logging {
        log_success!(codes::success::FILE_PROCESSING_SUCCESS,
            "Record file read successfully",
            "file" => path,
            "size_bytes" => size,
            "lines" => line_count,
            "duration_ms" => result.processing_duration.as_secs_f64() * 1000.0
        );
    }

    Ok(result)
}
