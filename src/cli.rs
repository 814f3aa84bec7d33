//! Command Line Interface (CLI) arguments.

use clap::Parser;

use crate::input::Compression;
use crate::output::OutputFormat;

/// Reduces sorted `user_id correct incorrect api_path value` records into one
/// `user_id correct/total value` line per user
#[derive(Clone, Debug, Parser)]
#[command(version)]
pub struct CommandLineArgs {
    /// Path to read records from, or `-` for standard input
    #[arg(long, default_value = "-", env = "ACCURACY_REDUCER_INPUT")]
    pub input: String,
    /// Path to write summaries to, or `-` for standard output
    #[arg(long, default_value = "-", env = "ACCURACY_REDUCER_OUTPUT")]
    pub output: String,
    /// Format of the summaries
    #[arg(
        long,
        value_enum,
        default_value_t = OutputFormat::Text,
        env = "ACCURACY_REDUCER_FORMAT"
    )]
    pub format: OutputFormat,
    /// Compression of the input
    #[arg(
        long,
        value_enum,
        default_value_t = Compression::Auto,
        env = "ACCURACY_REDUCER_COMPRESSION"
    )]
    pub compression: Compression,
    /// Whether to write metrics to standard error once the run completes
    #[arg(long, default_value_t = false, env = "ACCURACY_REDUCER_PRINT_METRICS")]
    pub print_metrics: bool,
    /// Log level used when `RUST_LOG` is not set
    #[arg(long, default_value = "warn", env = "ACCURACY_REDUCER_LOG_LEVEL")]
    pub log_level: tracing::Level,
}

/// Returns parsed command line arguments.
pub fn parse() -> CommandLineArgs {
    CommandLineArgs::parse()
}
