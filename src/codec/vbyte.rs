//! Variable-byte codec: 7-bit groups, high bit set on the terminator group.
//!
//! Accepts arbitrary unsigned 64-bit values (postings use at most 32 bits).
//! Groups are emitted most-significant-first; the terminator is always the
//! last (least-significant) group, so `0` encodes as the single byte
//! `0x80`.

use crate::bitstream::{BitSink, BitSource};
use crate::error::Result;

/// Number of 7-bit groups (and therefore bytes) needed to encode `x`.
pub fn encoded_len_bytes(x: u64) -> usize {
    let bits = crate::codec::bits_needed(x).max(1);
    bits.div_ceil(7) as usize
}

/// Encode one value.
pub fn encode_one(sink: &mut BitSink, x: u64) {
    let groups = encoded_len_bytes(x) as u32;
    for i in (0..groups).rev() {
        let shift = i * 7;
        let chunk = ((x >> shift) & 0x7F) as u64;
        if i == 0 {
            sink.put_int(chunk | 0x80, 8);
        } else {
            sink.put_int(chunk, 8);
        }
    }
}

/// Decode one value.
pub fn decode_one(source: &mut BitSource) -> Result<u64> {
    let mut value = 0u64;
    loop {
        let byte = source.get_int(8)?;
        value = (value << 7) | (byte & 0x7F);
        if byte & 0x80 != 0 {
            return Ok(value);
        }
    }
}

/// Encode `src` as a sequence of vbyte values.
pub fn encode(sink: &mut BitSink, src: &[u64]) {
    for &x in src {
        encode_one(sink, x);
    }
}

/// Decode `dst.len()` vbyte values from `source`.
pub fn decode(source: &mut BitSource, dst: &mut [u64]) -> Result<()> {
    for slot in dst.iter_mut() {
        *slot = decode_one(source)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_values_byte_lengths_and_roundtrip() {
        let values: Vec<u64> = vec![0, 127, 128, 16383, 16384, (1u64 << 32) - 1];
        let expected_lengths = [1usize, 1, 2, 2, 3, 5];

        for (v, &len) in values.iter().zip(expected_lengths.iter()) {
            assert_eq!(encoded_len_bytes(*v), len, "value {v}");
        }

        let mut sink = BitSink::new();
        encode(&mut sink, &values);
        let total_bits = sink.tell();
        let total_bytes: usize = expected_lengths.iter().sum();
        assert_eq!(total_bits as usize, total_bytes * 8);

        let buffer = sink.into_buffer();
        let mut source = BitSource::from_buffer(&buffer);
        let mut decoded = vec![0u64; values.len()];
        decode(&mut source, &mut decoded).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn zero_encodes_as_single_0x80_byte() {
        let mut sink = BitSink::new();
        encode_one(&mut sink, 0);
        let buffer = sink.into_buffer();
        assert_eq!(buffer.as_content_bytes(), &[0x80]);
    }
}
