//! Run metrics.

use lazy_static::lazy_static;
use prometheus::{self, Encoder, IntCounter, Opts, Registry};

use crate::error::ReducerError;

lazy_static! {
    // Registry for holding metric state
    pub static ref REGISTRY: Registry = Registry::new();
    // Input records successfully parsed
    pub static ref RECORDS: IntCounter = IntCounter::with_opts(
        Opts::new("reducer_records_total", "The number of input records reduced")
    ).unwrap();
    // Summaries emitted
    pub static ref GROUPS: IntCounter = IntCounter::with_opts(
        Opts::new("reducer_groups_total", "The number of group summaries emitted")
    ).unwrap();
    // Lines rejected as malformed
    pub static ref MALFORMED_RECORDS: IntCounter = IntCounter::with_opts(
        Opts::new("reducer_malformed_records_total", "The number of malformed input records")
    ).unwrap();
}

/// Register the reducer metrics with [REGISTRY].
///
/// Registering more than once is not an error.
pub fn register_metrics() -> Result<(), ReducerError> {
    for counter in [&*RECORDS, &*GROUPS, &*MALFORMED_RECORDS] {
        match REGISTRY.register(Box::new(counter.clone())) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Returns the registered metrics in the Prometheus text exposition format.
pub fn render_metrics() -> Result<String, ReducerError> {
    let encoder = prometheus::TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
