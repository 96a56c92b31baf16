//! zstd framing against a shared, externally supplied dictionary. Unlike
//! the other `generic` backends, the dictionary is not part of the framed
//! payload: callers (the container layer) own the dictionary's lifetime
//! and pass it in at both ends.

use super::{read_framed64, write_framed64};
use crate::bitstream::{BitSink, BitSource};
use crate::error::{PostingsError, Result};

const LEVEL: i32 = 19;

pub fn encode(sink: &mut BitSink, raw: &[u8], dictionary: &[u8]) -> Result<()> {
    let mut compressor = ::zstd::bulk::Compressor::with_dictionary(LEVEL, dictionary)
        .map_err(|e| PostingsError::codec_failure("zstd_dict", e.to_string()))?;
    let compressed = compressor
        .compress(raw)
        .map_err(|e| PostingsError::codec_failure("zstd_dict", e.to_string()))?;
    write_framed64(sink, raw.len(), &compressed);
    Ok(())
}

pub fn decode(source: &mut BitSource, dictionary: &[u8]) -> Result<Vec<u8>> {
    let (original_len, compressed) = read_framed64(source)?;
    let mut decompressor = ::zstd::bulk::Decompressor::with_dictionary(dictionary)
        .map_err(|e| PostingsError::codec_failure("zstd_dict", e.to_string()))?;
    decompressor
        .decompress(compressed, original_len)
        .map_err(|e| PostingsError::codec_failure("zstd_dict", e.to_string()))
}
