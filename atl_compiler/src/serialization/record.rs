//! Legacy one-line achievement record codec
//!
//! One achievement per line:
//!
//! ```text
//! id:"trigger":title:description:::author:points:::::badge
//! ```
//!
//! The empty runs are historical attribute slots (progress, progress max,
//! created, modified, upvotes, downvotes) this core no longer populates.
//! Text fields are quoted only when they contain a delimiter, a quote, or
//! a backslash. The trigger field is written quoted, but an unquoted
//! trigger must still be accepted: its flag prefixes contain `:`, so the
//! field is scanned with the delimiter-with-lookback rule.
//!
//! Deserialization is strict: a malformed line fails whole, with no
//! partial record.

use crate::config::compile_time::serialization::{BADGE_ID_LENGTH, MAX_SERIALIZED_LENGTH};
use crate::config::runtime::SerializationPreferences;
use crate::grammar::tables;
use crate::lexical::Tokenizer;
use crate::logging::{codes, Code};
use serde::{Deserialize, Serialize};

/// Record codec failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("Record field '{field}' is missing or malformed")]
    MissingField { field: &'static str },

    #[error("Quoted record field '{field}' is not terminated")]
    UnterminatedField { field: &'static str },

    #[error("Record number field '{field}' is not a valid integer")]
    InvalidNumber { field: &'static str },

    #[error("Serialized record length {length} exceeds limit {MAX_SERIALIZED_LENGTH}")]
    RecordTooLong { length: usize },
}

impl RecordError {
    pub fn error_code(&self) -> Code {
        match self {
            RecordError::MissingField { .. } => codes::record::MISSING_FIELD,
            RecordError::UnterminatedField { .. } => codes::record::UNTERMINATED_FIELD,
            RecordError::InvalidNumber { .. } => codes::record::INVALID_NUMBER,
            RecordError::RecordTooLong { .. } => codes::record::RECORD_TOO_LONG,
        }
    }
}

/// One achievement's legacy export record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRecord {
    pub id: u32,
    /// Raw trigger chain text, parsed separately by the trigger parser
    pub trigger: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub points: u32,
    pub badge: String,
}

impl AchievementRecord {
    /// Render the record as one line using default preferences.
    pub fn serialize(&self) -> Result<String, RecordError> {
        self.serialize_with_preferences(&SerializationPreferences::default())
    }

    pub fn serialize_with_preferences(
        &self,
        preferences: &SerializationPreferences,
    ) -> Result<String, RecordError> {
        let mut line = String::new();

        line.push_str(&self.id.to_string());
        line.push(':');

        if preferences.quote_trigger_field {
            write_quoted(&mut line, &self.trigger);
        } else {
            line.push_str(&self.trigger);
        }
        line.push(':');

        write_possibly_quoted(&mut line, &self.title);
        line.push(':');
        write_possibly_quoted(&mut line, &self.description);
        line.push(':');
        line.push_str("::"); // progress / progress max
        write_possibly_quoted(&mut line, &self.author);
        line.push(':');
        line.push_str(&self.points.to_string());
        line.push(':');
        line.push_str("::::"); // created / modified / upvotes / downvotes
        write_possibly_quoted(&mut line, &self.badge);

        if line.len() > MAX_SERIALIZED_LENGTH {
            return Err(RecordError::RecordTooLong { length: line.len() });
        }

        Ok(line)
    }

    /// Decode one record line using default preferences.
    pub fn deserialize(line: &str) -> Result<Self, RecordError> {
        Self::deserialize_with_preferences(line, &SerializationPreferences::default())
    }

    pub fn deserialize_with_preferences(
        line: &str,
        preferences: &SerializationPreferences,
    ) -> Result<Self, RecordError> {
        if line.len() > MAX_SERIALIZED_LENGTH {
            return Err(RecordError::RecordTooLong { length: line.len() });
        }

        let mut tok = Tokenizer::new(line);

        // field 1: id
        let id = tok
            .read_unsigned()
            .map_err(|_| RecordError::InvalidNumber { field: "id" })?;
        if !tok.consume(':') {
            return Err(RecordError::MissingField { field: "trigger" });
        }

        // field 2: trigger
        let trigger = if tok.peek_char() == Some('"') {
            tok.read_quoted_string()
                .map_err(|_| RecordError::UnterminatedField { field: "trigger" })?
        } else {
            // unquoted triggers contain ':' after flag letters
            tok.read_to_guarded(':', tables::is_flag_letter).to_string()
        };
        if !tok.consume(':') {
            return Err(RecordError::MissingField { field: "title" });
        }

        // fields 3-4: title, description
        let title = read_possibly_quoted(&mut tok, "title")?;
        let description = read_possibly_quoted(&mut tok, "description")?;

        // fields 5-6: progress, progress max (unused)
        skip_field(&mut tok, "progress")?;
        skip_field(&mut tok, "progress max")?;

        // field 7: author
        let author = read_possibly_quoted(&mut tok, "author")?;

        // field 8: points
        let points = tok
            .read_unsigned()
            .map_err(|_| RecordError::InvalidNumber { field: "points" })?;
        if !tok.consume(':') {
            return Err(RecordError::MissingField { field: "created" });
        }

        // fields 9-12: created, modified, upvotes, downvotes (unused)
        skip_field(&mut tok, "modified")?;
        skip_field(&mut tok, "upvotes")?;
        skip_field(&mut tok, "downvotes")?;
        skip_field(&mut tok, "badge")?;

        // field 13: badge
        let mut badge = if tok.peek_char() == Some('"') {
            tok.read_quoted_string()
                .map_err(|_| RecordError::UnterminatedField { field: "badge" })?
        } else {
            tok.read_to(':').to_string()
        };

        if preferences.pad_badge_ids {
            while badge.len() < BADGE_ID_LENGTH {
                badge.insert(0, '0');
            }
        }

        Ok(Self {
            id,
            trigger,
            title,
            description,
            author,
            points,
            badge,
        })
    }
}

/// Quote a value unconditionally, escaping quotes and backslashes
fn write_quoted(line: &mut String, value: &str) {
    line.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            line.push('\\');
        }
        line.push(ch);
    }
    line.push('"');
}

/// Quote a value only when it contains a character that needs it
fn write_possibly_quoted(line: &mut String, value: &str) {
    if value.contains(':') || value.contains('"') || value.contains('\\') {
        write_quoted(line, value);
    } else {
        line.push_str(value);
    }
}

fn read_possibly_quoted(tok: &mut Tokenizer, field: &'static str) -> Result<String, RecordError> {
    let value = if tok.peek_char() == Some('"') {
        tok.read_quoted_string()
            .map_err(|_| RecordError::UnterminatedField { field })?
    } else {
        tok.read_to(':').to_string()
    };

    if !tok.consume(':') {
        return Err(RecordError::MissingField { field });
    }

    Ok(value)
}

fn skip_field(tok: &mut Tokenizer, field: &'static str) -> Result<(), RecordError> {
    tok.advance_to(':');
    if !tok.consume(':') {
        return Err(RecordError::MissingField { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn sample_record() -> AchievementRecord {
        AchievementRecord {
            id: 12345,
            trigger: "R:0xH1234=1_0xH2345>5.10.".to_string(),
            title: "First Blood".to_string(),
            description: "Defeat the first boss".to_string(),
            author: "author".to_string(),
            points: 25,
            badge: "04001".to_string(),
        }
    }

    #[test]
    fn test_serialize_layout() {
        let line = sample_record().serialize().unwrap();
        assert_eq!(
            line,
            "12345:\"R:0xH1234=1_0xH2345>5.10.\":First Blood:Defeat the first boss:::author:25:::::04001"
        );
    }

    #[test]
    fn test_round_trip_quoted() {
        let record = sample_record();
        let line = record.serialize().unwrap();
        let decoded = AchievementRecord::deserialize(&line).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_deserialize_unquoted_trigger_with_flag_colons() {
        // flags contain ':' inside the trigger field; the lookback scan
        // must not split the field there
        let line = "1:A:0xH1234=1_0xH2345=2:Title:Desc:::someone:5:::::badge";
        let decoded = AchievementRecord::deserialize(line).unwrap();
        assert_eq!(decoded.trigger, "A:0xH1234=1_0xH2345=2");
        assert_eq!(decoded.title, "Title");
        assert_eq!(decoded.points, 5);
    }

    #[test]
    fn test_text_fields_quoted_when_needed() {
        let mut record = sample_record();
        record.title = "Part 1: The Beginning".to_string();
        record.description = "He said \"go\"".to_string();

        let line = record.serialize().unwrap();
        assert!(line.contains("\"Part 1: The Beginning\""));

        let decoded = AchievementRecord::deserialize(&line).unwrap();
        assert_eq!(decoded.title, record.title);
        assert_eq!(decoded.description, record.description);
    }

    #[test]
    fn test_badge_zero_padding() {
        let line = "7:\"0xH1=1\":T:D:::a:5:::::42";
        let decoded = AchievementRecord::deserialize(line).unwrap();
        assert_eq!(decoded.badge, "00042");
    }

    #[test]
    fn test_empty_placeholder_fields_tolerate_content() {
        // historical lines may still carry values in the unused slots
        let line = "3:\"0xH1=1\":T:D:50:100:a:10:1577836800:1577836801:4:2:00123";
        let decoded = AchievementRecord::deserialize(line).unwrap();
        assert_eq!(decoded.id, 3);
        assert_eq!(decoded.points, 10);
        assert_eq!(decoded.badge, "00123");
    }

    #[test]
    fn test_malformed_records_fail_whole() {
        assert_matches!(
            AchievementRecord::deserialize("notanumber:\"0xH1=1\":T:D:::a:5:::::b"),
            Err(RecordError::InvalidNumber { field: "id" })
        );

        assert_matches!(
            AchievementRecord::deserialize("1:\"unterminated"),
            Err(RecordError::UnterminatedField { field: "trigger" })
        );

        assert_matches!(
            AchievementRecord::deserialize("1:\"0xH1=1\":T:D:::a:xx:::::b"),
            Err(RecordError::InvalidNumber { field: "points" })
        );

        // truncated line: placeholders missing
        assert_matches!(
            AchievementRecord::deserialize("1:\"0xH1=1\":T:D"),
            Err(RecordError::MissingField { .. })
        );
    }

    #[test]
    fn test_record_too_long() {
        let mut record = sample_record();
        record.description = "x".repeat(MAX_SERIALIZED_LENGTH);
        assert_matches!(
            record.serialize(),
            Err(RecordError::RecordTooLong { .. })
        );
    }

    #[test]
    fn test_unquoted_trigger_preference() {
        let preferences = SerializationPreferences {
            quote_trigger_field: false,
            pad_badge_ids: true,
        };

        let record = sample_record();
        let line = record.serialize_with_preferences(&preferences).unwrap();
        assert!(line.starts_with("12345:R:0xH1234=1_"));

        let decoded = AchievementRecord::deserialize(&line).unwrap();
        assert_eq!(decoded.trigger, record.trigger);
    }
}
