//! Pipeline stage errors

use crate::file_processor::FileError;
use crate::logging::{codes, Code};
use crate::serialization::RecordError;
use crate::syntax::TriggerParseError;

/// Any stage failure surfaced by the pipeline
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileError),

    #[error("Trigger parsing failed: {0}")]
    Parse(#[from] TriggerParseError),

    #[error("Record decoding failed: {0}")]
    Record(#[from] RecordError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::FileProcessing(inner) => inner.error_code(),
            Self::Parse(inner) => inner.error_code(),
            Self::Record(inner) => inner.error_code(),
            Self::Pipeline { .. } => codes::system::INTERNAL_ERROR,
        }
    }
}
