//! This file defines the accuracy-reducer binary entry point.

use std::process::ExitCode;

use accuracy_reducer::app;
use accuracy_reducer::cli;
use accuracy_reducer::error;
use accuracy_reducer::metrics;
use accuracy_reducer::tracing;

/// Application entry point
fn main() -> ExitCode {
    let args = cli::parse();
    tracing::init_tracing(&args);
    let result = app::run(&args);
    if args.print_metrics {
        match metrics::render_metrics() {
            Ok(text) => eprint!("{}", text),
            Err(err) => {
                let _ = error::report(&err, std::io::stderr());
            }
        }
    }
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = error::report(&err, std::io::stderr());
            ExitCode::from(err.exit_status())
        }
    }
}
