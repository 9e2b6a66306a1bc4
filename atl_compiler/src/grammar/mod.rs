//! Structural model of trigger definitions
//!
//! A trigger is one Core condition group plus zero or more Alt groups.
//! Conditions compare two operands and carry a combinator flag and an
//! optional hit-count target. The textual encoding is handled by the
//! `syntax` and `serialization` modules; this module only defines the
//! model and the fixed letter tables of the format.

pub mod model;
pub mod tables;

pub use model::{
    Comparator, Comparison, Condition, ConditionFlag, ConditionGroup, MemSize, Operand,
    OperandKind, Trigger,
};
