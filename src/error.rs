//! Error handling.

use std::error::Error;
use std::io::{self, Write};
use std::num::ParseIntError;

use thiserror::Error;

/// Reasons a single input line fails to decode into a [Record](crate::models::Record).
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    /// Line did not split into the expected number of whitespace-separated tokens
    #[error("expected {expected} fields, found {found}", expected = crate::models::FIELD_COUNT)]
    FieldCount { found: usize },

    /// A numeric field is not a valid integer
    #[error("field {field} is not a valid integer: {token:?}")]
    InvalidInteger {
        field: &'static str,
        token: String,
        #[source]
        source: ParseIntError,
    },

    /// A prediction count field is negative
    #[error("field {field} must not be negative: {token:?}")]
    NegativeCount { field: &'static str, token: String },
}

/// Reducer error type
///
/// This type encapsulates the various errors that may occur during a run.
/// Every variant aborts the run.
#[derive(Debug, Error)]
pub enum ReducerError {
    /// Input line could not be decoded into a record
    #[error("malformed record at line {line_number}: {line:?}")]
    MalformedRecord {
        line_number: u64,
        line: String,
        #[source]
        source: RecordError,
    },

    /// A running sum exceeded the range of its accumulator
    #[error("{field} total overflowed for user {user_id}")]
    Overflow {
        user_id: String,
        field: &'static str,
    },

    /// Error reading input or writing output
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// Error serialising a summary as JSON
    #[error("failed to serialise summary")]
    Json(#[from] serde_json::Error),

    /// Error registering or encoding metrics
    #[error("metrics error")]
    Metrics(#[from] prometheus::Error),
}

impl ReducerError {
    /// Returns whether this error was caused by malformed input rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ReducerError::MalformedRecord { .. } | ReducerError::Overflow { .. }
        )
    }

    /// Returns the process exit status for this error.
    ///
    /// Malformed input exits with 1; failures of the environment (I/O, serialisation, metrics)
    /// exit with 2 so a pipeline can tell bad data from a retryable failure.
    pub fn exit_status(&self) -> u8 {
        if self.is_input_error() {
            1
        } else {
            2
        }
    }
}

/// Returns the messages of an error and each of its causes, outermost first.
///
/// Consecutive duplicate messages are removed, since wrapped errors frequently repeat their
/// source's description.
pub fn error_chain<E>(error: &E) -> Vec<String>
where
    E: Error + ?Sized,
{
    let mut messages = vec![error.to_string()];
    let mut current = error.source();
    while let Some(source) = current {
        messages.push(source.to_string());
        current = source.source();
    }
    messages.dedup();
    messages
}

/// Write a diagnostic for an error and its chain of causes.
///
/// # Arguments
///
/// * `error`: The error that aborted the run
/// * `writer`: Destination of the diagnostic, usually standard error
pub fn report<W: Write>(error: &ReducerError, mut writer: W) -> io::Result<()> {
    let mut chain = error_chain(error).into_iter();
    if let Some(message) = chain.next() {
        writeln!(writer, "error: {}", message)?;
    }
    for cause in chain {
        writeln!(writer, "Caused by: {}", cause)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_int_error() -> ParseIntError {
        "x".parse::<u64>().unwrap_err()
    }

    #[test]
    fn malformed_record_message() {
        let error = ReducerError::MalformedRecord {
            line_number: 3,
            line: "u1 1 0 /x".to_string(),
            source: RecordError::FieldCount { found: 4 },
        };
        assert_eq!(
            error.to_string(),
            "malformed record at line 3: \"u1 1 0 /x\""
        );
        assert!(error.is_input_error());
    }

    #[test]
    fn malformed_record_chain() {
        let error = ReducerError::MalformedRecord {
            line_number: 7,
            line: "u1 x 0 /x 1".to_string(),
            source: RecordError::InvalidInteger {
                field: "correct",
                token: "x".to_string(),
                source: parse_int_error(),
            },
        };
        assert_eq!(
            error_chain(&error),
            vec![
                "malformed record at line 7: \"u1 x 0 /x 1\"".to_string(),
                "field correct is not a valid integer: \"x\"".to_string(),
                "invalid digit found in string".to_string(),
            ]
        );
    }

    #[test]
    fn overflow_message() {
        let error = ReducerError::Overflow {
            user_id: "u9".to_string(),
            field: "value",
        };
        assert_eq!(error.to_string(), "value total overflowed for user u9");
        assert!(error.is_input_error());
    }

    #[test]
    fn io_error_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let error = ReducerError::from(io_error);
        assert!(!error.is_input_error());
        assert_eq!(
            error_chain(&error),
            vec!["I/O error".to_string(), "pipe closed".to_string()]
        );
    }

    #[test]
    fn report_malformed_record() {
        let error = ReducerError::MalformedRecord {
            line_number: 2,
            line: "u1 1 -1 /x 1".to_string(),
            source: RecordError::NegativeCount {
                field: "incorrect",
                token: "-1".to_string(),
            },
        };
        let mut buf = Vec::new();
        report(&error, &mut buf).unwrap();
        assert_eq!(
            "error: malformed record at line 2: \"u1 1 -1 /x 1\"\n\
             Caused by: field incorrect must not be negative: \"-1\"\n",
            String::from_utf8(buf).unwrap()
        );
    }

    #[test]
    fn field_count_message() {
        let error = RecordError::FieldCount { found: 6 };
        assert_eq!("expected 5 fields, found 6", error.to_string());
    }

    #[test]
    fn exit_status_by_kind() {
        let malformed = ReducerError::MalformedRecord {
            line_number: 1,
            line: String::new(),
            source: RecordError::FieldCount { found: 0 },
        };
        let overflow = ReducerError::Overflow {
            user_id: "u1".to_string(),
            field: "correct",
        };
        let io_error = ReducerError::from(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert_eq!(1, malformed.exit_status());
        assert_eq!(1, overflow.exit_status());
        assert_eq!(2, io_error.exit_status());
    }

    #[test]
    fn error_chain_dedup() {
        #[derive(Debug, Error)]
        #[error("same")]
        struct Inner;

        #[derive(Debug, Error)]
        #[error("same")]
        struct Outer(#[source] Inner);

        assert_eq!(error_chain(&Outer(Inner)), vec!["same".to_string()]);
    }
}
