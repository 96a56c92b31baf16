//! Generic byte-stream compressors, each wrapping an external crate behind
//! a length-prefixed contract: an original length, a compressed length,
//! then the compressed bytes, byte-aligned throughout. zlib, bzip2, brotli,
//! and lz4hc use a 32-bit prefix pair (`write_framed`/`read_framed`); zstd
//! and lzma stream until STREAM_END and use a 64-bit prefix pair
//! (`write_framed64`/`read_framed64`) so a single payload isn't capped at
//! 4 GiB. These operate on raw bytes (e.g. a serialized dictionary or dump
//! of a block map) rather than on integer sequences.

pub mod brotli;
pub mod bzip2;
pub mod lz4hc;
pub mod lzma;
pub mod zstd;
pub mod zstd_dict;
pub mod zlib;

use crate::bitstream::{BitSink, BitSource};
use crate::error::Result;

pub(crate) fn write_framed(sink: &mut BitSink, original_len: usize, compressed: &[u8]) {
    sink.align8();
    sink.put_int(original_len as u64, 32);
    sink.put_int(compressed.len() as u64, 32);
    sink.put_bytes(compressed);
}

pub(crate) fn read_framed<'a>(source: &mut BitSource<'a>) -> Result<(usize, &'a [u8])> {
    source.align8()?;
    let original_len = source.get_int(32)? as usize;
    let compressed_len = source.get_int(32)? as usize;
    let compressed = source.get_bytes(compressed_len)?;
    Ok((original_len, compressed))
}

pub(crate) fn write_framed64(sink: &mut BitSink, original_len: usize, compressed: &[u8]) {
    sink.align8();
    sink.put_int(original_len as u64, 64);
    sink.put_int(compressed.len() as u64, 64);
    sink.put_bytes(compressed);
}

pub(crate) fn read_framed64<'a>(source: &mut BitSource<'a>) -> Result<(usize, &'a [u8])> {
    source.align8()?;
    let original_len = source.get_int(64)? as usize;
    let compressed_len = source.get_int(64)? as usize;
    let compressed = source.get_bytes(compressed_len)?;
    Ok((original_len, compressed))
}
