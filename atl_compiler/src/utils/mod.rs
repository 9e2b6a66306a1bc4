//! Shared utilities for the ATL compiler

pub mod span;

pub use span::{Position, SourceMap, Span};
