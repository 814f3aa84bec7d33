use crate::error::ReducerError;
use crate::output::TextSink;
use crate::reducer;

use flate2::read::GzEncoder;
use flate2::Compression;
use std::io::Read;

/// Reduce `input` and return the text output.
pub(crate) fn reduce_text(input: &str) -> Result<String, ReducerError> {
    let mut sink = TextSink::new(Vec::new(), false);
    reducer::reduce(input.as_bytes(), &mut sink)?;
    Ok(String::from_utf8(sink.into_inner()).unwrap())
}

/// Compress `data` as a single gzip member.
pub(crate) fn compress_gzip(data: &[u8]) -> Vec<u8> {
    // Adapated from flate2 documentation.
    let mut result = Vec::<u8>::new();
    let mut deflater = GzEncoder::new(data, Compression::fast());
    deflater.read_to_end(&mut result).unwrap();
    result
}
