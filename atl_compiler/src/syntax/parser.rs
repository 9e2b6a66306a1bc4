//! Condition group and trigger parsers

use super::condition::read_condition;
use super::error::{SyntaxResult, TriggerParseError};
use crate::config::compile_time::syntax::{MAX_ALT_GROUPS, MAX_CONDITIONS_PER_GROUP};
use crate::grammar::{ConditionGroup, Trigger};
use crate::lexical::Tokenizer;

/// Counts collected while parsing, reported by the pipeline
#[derive(Debug, Clone, Default)]
pub struct ParserMetrics {
    pub groups: usize,
    pub conditions: usize,
    pub flagged_conditions: usize,
    pub comparisons: usize,
    pub hit_targets: usize,
}

/// Parser over one trigger definition line.
#[derive(Debug)]
pub struct TriggerParser<'a> {
    tok: Tokenizer<'a>,
    metrics: ParserMetrics,
}

impl<'a> TriggerParser<'a> {
    /// Create a parser, rejecting input beyond the length bound.
    pub fn new(input: &'a str) -> SyntaxResult<Self> {
        Tokenizer::check_input_length(input)?;
        Ok(Self {
            tok: Tokenizer::new(input),
            metrics: ParserMetrics::default(),
        })
    }

    /// Parse the whole input into a trigger.
    ///
    /// The first group is Core; every `S`-separated group after it is the
    /// next Alt group. The empty input is the canonical empty trigger.
    pub fn parse(mut self) -> SyntaxResult<(Trigger, ParserMetrics)> {
        let core = self.parse_group()?;

        let mut alts = Vec::new();
        while self.tok.consume('S') {
            if alts.len() >= MAX_ALT_GROUPS {
                return Err(TriggerParseError::TooManyAltGroups {
                    count: alts.len() + 1,
                });
            }
            alts.push(self.parse_group()?);
        }

        if let Some(found) = self.tok.peek_char() {
            return Err(TriggerParseError::UnexpectedCharacter {
                found,
                span: self.tok.span_here(),
            });
        }

        self.metrics.groups = 1 + alts.len();
        Ok((Trigger::new(core, alts), self.metrics))
    }

    /// Parse one `_`-separated condition group.
    ///
    /// A group is empty only when the input is empty at this point: two
    /// consecutive `S` separators, a trailing `S`, or the empty string.
    fn parse_group(&mut self) -> SyntaxResult<ConditionGroup> {
        let mut group = ConditionGroup::new();

        if self.at_group_boundary() {
            return Ok(group);
        }

        loop {
            let condition = read_condition(&mut self.tok)?;

            self.metrics.conditions += 1;
            if !condition.flag().is_standard() {
                self.metrics.flagged_conditions += 1;
            }
            if condition.comparison().is_some() {
                self.metrics.comparisons += 1;
            }
            if condition.hit_target().is_some() {
                self.metrics.hit_targets += 1;
            }

            group.push(condition);
            if group.len() > MAX_CONDITIONS_PER_GROUP {
                return Err(TriggerParseError::TooManyConditions { count: group.len() });
            }

            if !self.tok.consume('_') {
                break;
            }
        }

        Ok(group)
    }

    fn at_group_boundary(&self) -> bool {
        matches!(self.tok.peek_char(), None | Some('S'))
    }
}
