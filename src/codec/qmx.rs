//! `qmx`: an opaque SIMD-oriented block codec.
//!
//! The reference QMX format is a hand-tuned SSE/AVX bit-packer with no
//! portable description available in this codebase's corpus (see
//! `DESIGN.md`); what follows is a self-consistent byte-aligned block codec
//! honoring the catalogue's stated shape for `qmx` — blocks of 128 values,
//! a `u32` length prefix per block so a reader can skip blocks without
//! decoding them, and the whole stream padded to a 128-bit boundary. Only
//! `decode(encode(x)) == x` is guaranteed, not bit-compatibility with any
//! other QMX implementation.

use crate::bitstream::{BitSink, BitSource};
use crate::error::Result;

const BLOCK_LEN: usize = 128;

fn bits_needed(x: u32) -> u32 {
    32 - x.leading_zeros()
}

fn encode_block(sink: &mut BitSink, block: &[u32]) {
    let width = block.iter().map(|&v| bits_needed(v)).max().unwrap_or(0);

    // Precompute the block body into its own sink so its byte length can be
    // written as a u32 prefix ahead of it.
    let mut body = BitSink::new();
    body.put_int(width as u64, 8);
    for &v in block {
        body.put_int(v as u64, width as u8);
    }
    body.align8();
    let body_buffer = body.into_buffer();
    let body_bytes = body_buffer.as_bytes();

    sink.put_int(body_bytes.len() as u64, 32);
    sink.put_bytes(body_bytes);
}

fn decode_block(source: &mut BitSource, dst: &mut [u32]) -> Result<()> {
    let body_len = source.get_int(32)? as usize;
    let body_bytes = source.get_bytes(body_len)?;
    let body_buffer = crate::bitstream::BitBuffer::from_bytes(body_bytes.to_vec(), body_len as u64 * 8);
    let mut body_source = BitSource::from_buffer(&body_buffer);

    let width = body_source.get_int(8)? as u8;
    for slot in dst.iter_mut() {
        *slot = body_source.get_int(width)? as u32;
    }
    Ok(())
}

/// Encode `src` in 128-value blocks, each length-prefixed; tail block holds
/// the remainder. The stream is padded to a 128-bit boundary at the end.
pub fn encode(sink: &mut BitSink, src: &[u32]) {
    sink.align8();
    let num_full = src.len() / BLOCK_LEN;
    for b in 0..num_full {
        encode_block(sink, &src[b * BLOCK_LEN..(b + 1) * BLOCK_LEN]);
    }
    let tail = &src[num_full * BLOCK_LEN..];
    if !tail.is_empty() {
        encode_block(sink, tail);
    }
    sink.align128();
}

/// Decode `n` values written by [`encode`].
pub fn decode(source: &mut BitSource, dst: &mut [u32]) -> Result<()> {
    source.align8()?;
    let n = dst.len();
    let num_full = n / BLOCK_LEN;
    for b in 0..num_full {
        decode_block(source, &mut dst[b * BLOCK_LEN..(b + 1) * BLOCK_LEN])?;
    }
    let tail_start = num_full * BLOCK_LEN;
    if tail_start < n {
        decode_block(source, &mut dst[tail_start..])?;
    }
    source.align128()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_block_roundtrips() {
        let values: Vec<u32> = (0..128).map(|i| (i * 37) % 5000).collect();
        let mut sink = BitSink::new();
        encode(&mut sink, &values);
        let buffer = sink.into_buffer();
        let mut source = BitSource::from_buffer(&buffer);
        let mut decoded = vec![0u32; values.len()];
        decode(&mut source, &mut decoded).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn block_and_tail_combined() {
        let values: Vec<u32> = (0..300u32).collect();
        let mut sink = BitSink::new();
        encode(&mut sink, &values);
        let buffer = sink.into_buffer();
        assert_eq!(buffer.len_bits() % 128, 0);
        let mut source = BitSource::from_buffer(&buffer);
        let mut decoded = vec![0u32; values.len()];
        decode(&mut source, &mut decoded).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn all_zero_block_uses_zero_width() {
        let values = vec![0u32; 50];
        let mut sink = BitSink::new();
        encode(&mut sink, &values);
        let buffer = sink.into_buffer();
        let mut source = BitSource::from_buffer(&buffer);
        let mut decoded = vec![7u32; values.len()];
        decode(&mut source, &mut decoded).unwrap();
        assert_eq!(decoded, values);
    }
}
