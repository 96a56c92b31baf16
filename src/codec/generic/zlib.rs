//! DEFLATE/zlib framing via `flate2`.

use std::io::Write;

use super::{read_framed, write_framed};
use crate::bitstream::{BitSink, BitSource};
use crate::error::{PostingsError, Result};

pub fn encode(sink: &mut BitSink, raw: &[u8]) -> Result<()> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::best());
    encoder
        .write_all(raw)
        .map_err(|e| PostingsError::codec_failure("zlib", e.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|e| PostingsError::codec_failure("zlib", e.to_string()))?;
    write_framed(sink, raw.len(), &compressed);
    Ok(())
}

pub fn decode(source: &mut BitSource) -> Result<Vec<u8>> {
    let (original_len, compressed) = read_framed(source)?;
    let mut decoder = flate2::read::ZlibDecoder::new(compressed);
    let mut out = Vec::with_capacity(original_len);
    std::io::Read::read_to_end(&mut decoder, &mut out)
        .map_err(|e| PostingsError::codec_failure("zlib", e.to_string()))?;
    Ok(out)
}
