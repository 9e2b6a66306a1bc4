//! Lexical layer: a cursor over one line of input
//!
//! No component above this layer touches the raw string directly. The
//! cursor has no knowledge of the trigger grammar; it only provides the
//! character-level primitives the readers are built from.

pub mod cursor;

pub use cursor::{LexerError, Tokenizer};
