//! LZ4 high-compression block framing via the `lz4` crate.

use super::{read_framed, write_framed};
use crate::bitstream::{BitSink, BitSource};
use crate::error::{PostingsError, Result};

pub fn encode(sink: &mut BitSink, raw: &[u8]) -> Result<()> {
    let compressed = lz4::block::compress(
        raw,
        Some(lz4::block::CompressionMode::HIGHCOMPRESSION(9)),
        false,
    )
    .map_err(|e| PostingsError::codec_failure("lz4hc", e.to_string()))?;
    write_framed(sink, raw.len(), &compressed);
    Ok(())
}

pub fn decode(source: &mut BitSource) -> Result<Vec<u8>> {
    let (original_len, compressed) = read_framed(source)?;
    lz4::block::decompress(compressed, Some(original_len as i32))
        .map_err(|e| PostingsError::codec_failure("lz4hc", e.to_string()))
}
