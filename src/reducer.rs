//! Grouped stream reduction.
//!
//! Folds a stream of records, assumed sorted by `user_id`, into one [Summary](crate::models::Summary) per contiguous run
//! of records sharing a `user_id`. Only the currently open group is held in memory, so a
//! `user_id` that reappears after a different one starts a new, separate group.

use std::io::BufRead;

use tracing::{debug, trace};

use crate::accumulator::Accumulator;
use crate::error::ReducerError;
use crate::metrics;
use crate::models::Record;
use crate::output::SummarySink;

/// Counts reported at the end of a successful reduction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReduceStats {
    /// Number of records reduced
    pub records: u64,
    /// Number of group summaries emitted
    pub groups: u64,
}

/// Incremental grouped reducer.
///
/// Feed lines with [push](GroupedReducer::push) in input order, then call
/// [finish](GroupedReducer::finish) to emit the final group.
pub struct GroupedReducer<'s, S: SummarySink + ?Sized> {
    sink: &'s mut S,
    current: Option<Accumulator>,
    stats: ReduceStats,
}

impl<'s, S: SummarySink + ?Sized> GroupedReducer<'s, S> {
    /// Return a new GroupedReducer with no open group.
    ///
    /// # Arguments
    ///
    /// * `sink`: Destination of the group summaries
    pub fn new(sink: &'s mut S) -> Self {
        GroupedReducer {
            sink,
            current: None,
            stats: ReduceStats::default(),
        }
    }

    /// Reduce one input line.
    ///
    /// Emits the open group's summary first if the line starts a new group.
    ///
    /// # Arguments
    ///
    /// * `line_number`: 1-based position of the line, used in diagnostics
    /// * `line`: The input line, with or without its line terminator
    pub fn push(&mut self, line_number: u64, line: &str) -> Result<(), ReducerError> {
        let record = Record::parse(line).map_err(|source| {
            metrics::MALFORMED_RECORDS.inc();
            ReducerError::MalformedRecord {
                line_number,
                line: line.trim_end_matches(['\r', '\n']).to_string(),
                source,
            }
        })?;

        let acc = self
            .current
            .get_or_insert_with(|| Accumulator::new(record.user_id));
        if acc.user_id() != record.user_id {
            emit_group(&mut *self.sink, &mut self.stats, acc)?;
            acc.reset(record.user_id);
        }
        acc.add(&record)?;

        self.stats.records += 1;
        metrics::RECORDS.inc();
        Ok(())
    }

    /// Emit the open group, if any, flush the sink and return the run's counts.
    pub fn finish(mut self) -> Result<ReduceStats, ReducerError> {
        if let Some(acc) = self.current.take() {
            emit_group(&mut *self.sink, &mut self.stats, &acc)?;
        }
        self.sink.flush()?;
        Ok(self.stats)
    }
}

fn emit_group<S: SummarySink + ?Sized>(
    sink: &mut S,
    stats: &mut ReduceStats,
    acc: &Accumulator,
) -> Result<(), ReducerError> {
    let summary = acc.summary()?;
    trace!(user_id = %summary.user_id, "closing group");
    sink.emit(&summary)?;
    stats.groups += 1;
    metrics::GROUPS.inc();
    Ok(())
}

/// Reduce every line of `reader` into `sink`.
///
/// Stops at the first malformed line. Summaries of groups closed before that line have already
/// been emitted; the group containing it never is.
///
/// # Arguments
///
/// * `reader`: Line-oriented input, grouped by `user_id`
/// * `sink`: Destination of the group summaries
#[tracing::instrument(level = "DEBUG", skip_all)]
pub fn reduce<R, S>(mut reader: R, sink: &mut S) -> Result<ReduceStats, ReducerError>
where
    R: BufRead,
    S: SummarySink + ?Sized,
{
    let mut reducer = GroupedReducer::new(sink);
    let mut line = String::new();
    let mut line_number = 0;
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        line_number += 1;
        reducer.push(line_number, &line)?;
    }
    let stats = reducer.finish()?;
    debug!(records = stats.records, groups = stats.groups, "reduction complete");
    Ok(stats)
}
