//! This crate provides a streaming reducer for per-user prediction accuracy counters. It is
//! intended as the reduce stage of a map/shuffle/reduce pipeline: input records arrive sorted by
//! user, and each contiguous run of records for one user is folded into a single summary line.
//!
//! Input lines have five whitespace-separated fields:
//!
//! ```text
//! user_id correct incorrect api_path value
//! ```
//!
//! and each group produces one output line:
//!
//! ```text
//! user_id correct/total value
//! ```
//!
//! where `total` is `correct + incorrect`. The reduction is a single pass holding only the
//! currently open group in memory, so input of any length is reduced in constant space. The
//! first malformed line aborts the run.
//!
//! The reducer is built on top of a small number of open source components.
//!
//! * [Clap](clap) parses the command line and environment configuration.
//! * [Tracing](::tracing) and [tracing-subscriber](tracing_subscriber) provide logging.
//! * [Serde](serde) and [serde_json] serialise summaries in the JSON output format.
//! * [flate2] decodes gzip-compressed input.
//! * [Prometheus](prometheus) counts records and groups.

pub mod accumulator;
pub mod app;
pub mod cli;
pub mod error;
pub mod input;
pub mod metrics;
pub mod models;
pub mod output;
pub mod reducer;
#[cfg(test)]
pub mod test_utils;
pub mod tracing;
