// Internal modules
pub mod config;
pub mod file_processor;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod serialization;
pub mod syntax;
pub mod utils;
pub mod validation;

// Re-export key types for library consumers
pub use grammar::{
    Comparator, Comparison, Condition, ConditionFlag, ConditionGroup, MemSize, Operand,
    OperandKind, Trigger,
};
pub use pipeline::{PipelineError, TriggerReport};
pub use serialization::{serialize_trigger, AchievementRecord, RecordError};
pub use syntax::{parse_trigger, TriggerParseError};
pub use validation::{validate_trigger, ValidationError};
