//! Bounded reading of local achievement record files

pub mod processor;

pub use processor::{process_file, process_file_with_preferences, FileError, FileMetadata,
    FileProcessingResult};
