//! Summary sinks.
//!
//! Each output format is implemented as a struct that implements the [SummarySink] trait.

use std::io::Write;

use strum_macros::Display;

use crate::error::ReducerError;
use crate::models::Summary;

/// Supported output formats
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, clap::ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// `user_id correct/total value` lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Trait for summary sinks.
///
/// This forms the contract between the reducer and its output.
pub trait SummarySink {
    /// Write one group summary.
    fn emit(&mut self, summary: &Summary) -> Result<(), ReducerError>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), ReducerError>;
}

/// Writes summaries in the text format.
pub struct TextSink<W: Write> {
    writer: W,
    flush_each: bool,
}

impl<W: Write> TextSink<W> {
    /// Return a new TextSink.
    ///
    /// # Arguments
    ///
    /// * `writer`: Destination of the summaries
    /// * `flush_each`: Whether to flush the writer after every summary
    pub fn new(writer: W, flush_each: bool) -> Self {
        TextSink { writer, flush_each }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SummarySink for TextSink<W> {
    fn emit(&mut self, summary: &Summary) -> Result<(), ReducerError> {
        writeln!(self.writer, "{}", summary)?;
        if self.flush_each {
            self.writer.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ReducerError> {
        Ok(self.writer.flush()?)
    }
}

/// Writes summaries as JSON lines.
pub struct JsonSink<W: Write> {
    writer: W,
    flush_each: bool,
}

impl<W: Write> JsonSink<W> {
    /// Return a new JsonSink.
    pub fn new(writer: W, flush_each: bool) -> Self {
        JsonSink { writer, flush_each }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SummarySink for JsonSink<W> {
    fn emit(&mut self, summary: &Summary) -> Result<(), ReducerError> {
        serde_json::to_writer(&mut self.writer, summary)?;
        self.writer.write_all(b"\n")?;
        if self.flush_each {
            self.writer.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ReducerError> {
        Ok(self.writer.flush()?)
    }
}

impl<S: SummarySink + ?Sized> SummarySink for Box<S> {
    fn emit(&mut self, summary: &Summary) -> Result<(), ReducerError> {
        (**self).emit(summary)
    }

    fn flush(&mut self) -> Result<(), ReducerError> {
        (**self).flush()
    }
}

/// Collects summaries in memory.
impl SummarySink for Vec<Summary> {
    fn emit(&mut self, summary: &Summary) -> Result<(), ReducerError> {
        self.push(summary.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ReducerError> {
        Ok(())
    }
}

/// Return a boxed sink for `format` writing to `writer`.
pub fn sink_for<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
    flush_each: bool,
) -> Box<dyn SummarySink + 'a> {
    match format {
        OutputFormat::Text => Box::new(TextSink::new(writer, flush_each)),
        OutputFormat::Json => Box::new(JsonSink::new(writer, flush_each)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries() -> Vec<Summary> {
        vec![
            Summary {
                user_id: "u1".to_string(),
                correct: 1,
                total: 2,
                value: 8,
            },
            Summary {
                user_id: "u2".to_string(),
                correct: 2,
                total: 2,
                value: -7,
            },
        ]
    }

    #[test]
    fn text_sink() {
        let mut sink = TextSink::new(Vec::new(), false);
        for summary in summaries() {
            sink.emit(&summary).unwrap();
        }
        sink.flush().unwrap();
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!("u1 1/2 8\nu2 2/2 -7\n", output);
    }

    #[test]
    fn json_sink() {
        let mut sink = JsonSink::new(Vec::new(), true);
        for summary in summaries() {
            sink.emit(&summary).unwrap();
        }
        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            vec![
                r#"{"user_id":"u1","correct":1,"total":2,"value":8}"#,
                r#"{"user_id":"u2","correct":2,"total":2,"value":-7}"#,
            ],
            lines
        );
    }

    #[test]
    fn vec_sink() {
        let mut sink: Vec<Summary> = Vec::new();
        for summary in summaries() {
            sink.emit(&summary).unwrap();
        }
        assert_eq!(summaries(), sink);
    }

    #[test]
    fn text_sink_write_error() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::ErrorKind::BrokenPipe.into())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let mut sink = TextSink::new(Closed, false);
        let err = sink.emit(&summaries()[0]).unwrap_err();
        match err {
            ReducerError::Io(io_err) => assert_eq!(std::io::ErrorKind::BrokenPipe, io_err.kind()),
            err => panic!("unexpected error {}", err),
        }
    }

    #[test]
    fn output_format_display() {
        assert_eq!("json", OutputFormat::Json.to_string());
        assert_eq!(OutputFormat::Text, OutputFormat::default());
    }
}
