//! Input sources and decompression.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};

use flate2::read::MultiGzDecoder;
use strum_macros::Display;
use tracing::debug;

use crate::error::ReducerError;

/// Path denoting standard input (or output)
pub const STDIO_PATH: &str = "-";

/// Leading bytes of a gzip member
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Input compression
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, clap::ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum Compression {
    /// Detect gzip from the leading bytes of the input
    #[default]
    Auto,
    /// Plain text
    None,
    /// Gzip, possibly with multiple members
    Gzip,
}

/// Open the input at `path` and wrap it in a decoder for `compression`.
///
/// # Arguments
///
/// * `path`: File path, or `-` for standard input
/// * `compression`: Compression of the input
pub fn open(path: &str, compression: Compression) -> Result<Box<dyn BufRead>, ReducerError> {
    if path == STDIO_PATH {
        debug!("reading from standard input");
        decode(io::stdin().lock(), compression)
    } else {
        debug!(path, "reading from file");
        let file = File::open(path)?;
        decode(BufReader::new(file), compression)
    }
}

/// Wrap `reader` in a decoder for `compression`.
///
/// With [Compression::Auto] the first two bytes are read to look for the gzip magic, and then
/// chained back in front of the rest of the input.
pub fn decode<'a, R>(
    mut reader: R,
    compression: Compression,
) -> Result<Box<dyn BufRead + 'a>, ReducerError>
where
    R: BufRead + 'a,
{
    match compression {
        Compression::None => Ok(Box::new(reader)),
        Compression::Gzip => Ok(gunzip(reader)),
        Compression::Auto => {
            let (prefix, filled) = read_prefix(&mut reader)?;
            let gzip = prefix[..filled] == GZIP_MAGIC;
            debug!(%compression, gzip, "input decoder selected");
            let reader = Cursor::new(prefix).take(filled as u64).chain(reader);
            if gzip {
                Ok(gunzip(reader))
            } else {
                Ok(Box::new(BufReader::new(reader)))
            }
        }
    }
}

fn gunzip<'a, R: Read + 'a>(reader: R) -> Box<dyn BufRead + 'a> {
    Box::new(BufReader::new(MultiGzDecoder::new(reader)))
}

/// Read up to the length of the gzip magic, stopping early only at end of input.
fn read_prefix<R: Read>(reader: &mut R) -> Result<([u8; 2], usize), ReducerError> {
    let mut prefix = [0u8; 2];
    let mut filled = 0;
    while filled < prefix.len() {
        match reader.read(&mut prefix[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err.into()),
        }
    }
    Ok((prefix, filled))
}
