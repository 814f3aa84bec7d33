//! Per-group running sums.

use crate::error::ReducerError;
use crate::models::{Field, Record, Summary};

/// Running sums for one contiguous group of records sharing a `user_id`.
///
/// All arithmetic is overflow-checked. An overflow leaves the accumulator unchanged and is
/// reported as [ReducerError::Overflow].
#[derive(Debug, PartialEq)]
pub struct Accumulator {
    user_id: String,
    correct: u64,
    incorrect: u64,
    value: i64,
}

impl Accumulator {
    /// Return a new, zeroed Accumulator for `user_id`.
    pub fn new(user_id: &str) -> Self {
        Accumulator {
            user_id: user_id.to_string(),
            correct: 0,
            incorrect: 0,
            value: 0,
        }
    }

    /// User identifier of the group.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Reset to zero and rekey to `user_id`, reusing the key allocation.
    pub fn reset(&mut self, user_id: &str) {
        self.user_id.clear();
        self.user_id.push_str(user_id);
        self.correct = 0;
        self.incorrect = 0;
        self.value = 0;
    }

    /// Add a record's counts and value to the running sums.
    ///
    /// The record's `user_id` is not checked; grouping is the caller's concern.
    pub fn add(&mut self, record: &Record) -> Result<(), ReducerError> {
        let correct = self
            .correct
            .checked_add(record.correct)
            .ok_or_else(|| self.overflow(Field::Correct))?;
        let incorrect = self
            .incorrect
            .checked_add(record.incorrect)
            .ok_or_else(|| self.overflow(Field::Incorrect))?;
        let value = self
            .value
            .checked_add(record.value)
            .ok_or_else(|| self.overflow(Field::Value))?;
        self.correct = correct;
        self.incorrect = incorrect;
        self.value = value;
        Ok(())
    }

    /// Return the [Summary] of the sums accumulated so far.
    ///
    /// Fails if `correct + incorrect` does not fit the total.
    pub fn summary(&self) -> Result<Summary, ReducerError> {
        let total = self
            .correct
            .checked_add(self.incorrect)
            .ok_or_else(|| ReducerError::Overflow {
                user_id: self.user_id.clone(),
                field: "total",
            })?;
        Ok(Summary {
            user_id: self.user_id.clone(),
            correct: self.correct,
            total,
            value: self.value,
        })
    }

    fn overflow(&self, field: Field) -> ReducerError {
        ReducerError::Overflow {
            user_id: self.user_id.clone(),
            field: field.name(),
        }
    }
}
