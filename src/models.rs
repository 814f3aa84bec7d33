//! Data types and associated functions and methods

use std::fmt;

use serde::Serialize;
use strum_macros::{Display, IntoStaticStr};

use crate::error::RecordError;

/// Number of whitespace-separated tokens in a record line
pub const FIELD_COUNT: usize = 5;

/// Names of the numeric record fields
#[derive(Clone, Copy, Debug, Display, IntoStaticStr, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    /// Correct prediction count
    Correct,
    /// Incorrect prediction count
    Incorrect,
    /// Value
    Value,
}

impl Field {
    /// Returns the field name used in diagnostics.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// One input record
///
/// Borrows the user identifier and API path from the line it was parsed from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Record<'a> {
    /// User identifier, the grouping key
    pub user_id: &'a str,
    /// Number of correct predictions
    pub correct: u64,
    /// Number of incorrect predictions
    pub incorrect: u64,
    /// API path of the prediction. Not used in summaries.
    pub api_path: &'a str,
    /// Value of the predictions
    pub value: i64,
}

impl<'a> Record<'a> {
    /// Parse a record from one input line.
    ///
    /// The line must consist of exactly five whitespace-separated tokens:
    /// `user_id correct incorrect api_path value`.
    ///
    /// # Arguments
    ///
    /// * `line`: The input line, with or without its line terminator
    pub fn parse(line: &'a str) -> Result<Self, RecordError> {
        let mut tokens = [""; FIELD_COUNT];
        let mut found = 0;
        for token in line.split_whitespace() {
            if found < FIELD_COUNT {
                tokens[found] = token;
            }
            found += 1;
        }
        if found != FIELD_COUNT {
            return Err(RecordError::FieldCount { found });
        }
        let [user_id, correct, incorrect, api_path, value] = tokens;
        Ok(Record {
            user_id,
            correct: parse_count(Field::Correct, correct)?,
            incorrect: parse_count(Field::Incorrect, incorrect)?,
            api_path,
            value: parse_value(value)?,
        })
    }
}

/// Parse a prediction count, rejecting negative values explicitly.
///
/// `-0` is zero and accepted.
fn parse_count(field: Field, token: &str) -> Result<u64, RecordError> {
    match token.parse::<u64>() {
        Ok(count) => Ok(count),
        Err(source) => match token.parse::<i64>() {
            Ok(0) => Ok(0),
            Ok(count) if count < 0 => Err(RecordError::NegativeCount {
                field: field.name(),
                token: token.to_string(),
            }),
            _ => Err(RecordError::InvalidInteger {
                field: field.name(),
                token: token.to_string(),
                source,
            }),
        },
    }
}

fn parse_value(token: &str) -> Result<i64, RecordError> {
    token
        .parse::<i64>()
        .map_err(|source| RecordError::InvalidInteger {
            field: Field::Value.name(),
            token: token.to_string(),
            source,
        })
}

/// Summary of one closed group
///
/// Implements serde serialise for the JSON output format. The [Display] implementation renders
/// the text output format `user_id correct/total value`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    /// User identifier of the group
    pub user_id: String,
    /// Sum of correct predictions
    pub correct: u64,
    /// Sum of correct and incorrect predictions
    pub total: u64,
    /// Sum of values
    pub value: i64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{} {}",
            self.user_id, self.correct, self.total, self.value
        )
    }
}
