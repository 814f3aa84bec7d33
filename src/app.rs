//! Run wiring: input, reducer and output.

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal};

use tracing::info;

use crate::cli::CommandLineArgs;
use crate::error::ReducerError;
use crate::input::{self, STDIO_PATH};
use crate::metrics;
use crate::output;
use crate::reducer::{self, ReduceStats};

/// Reduce the configured input into the configured output.
///
/// Summaries written before a failure stay written; standard output is flushed after every
/// summary when it is a terminal.
///
/// # Arguments
///
/// * `args`: Command line arguments
pub fn run(args: &CommandLineArgs) -> Result<ReduceStats, ReducerError> {
    metrics::register_metrics()?;
    let reader = input::open(&args.input, args.compression)?;

    let stats = if args.output == STDIO_PATH {
        let stdout = io::stdout();
        let flush_each = stdout.is_terminal();
        let mut sink = output::sink_for(args.format, BufWriter::new(stdout.lock()), flush_each);
        reducer::reduce(reader, &mut sink)?
    } else {
        let file = File::create(&args.output)?;
        let mut sink = output::sink_for(args.format, BufWriter::new(file), false);
        reducer::reduce(reader, &mut sink)?
    };

    info!(
        records = stats.records,
        groups = stats.groups,
        format = %args.format,
        "run complete"
    );
    Ok(stats)
}
