//! `aligned_fixed<T>`: byte-aligned raw copy of `n` `u32`-sized integers.

use crate::bitstream::{BitSink, BitSource};
use crate::error::Result;

/// Encode `src` as little-endian `u32`s, byte-aligned.
pub fn encode(sink: &mut BitSink, src: &[u32]) {
    sink.align8();
    let mut bytes = Vec::with_capacity(src.len() * 4);
    for &v in src {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    sink.put_bytes(&bytes);
}

/// Decode `dst.len()` little-endian `u32`s.
pub fn decode(source: &mut BitSource, dst: &mut [u32]) -> Result<()> {
    source.align8()?;
    let bytes = source.get_bytes(dst.len() * 4)?;
    for (slot, chunk) in dst.iter_mut().zip(bytes.chunks_exact(4)) {
        *slot = u32::from_le_bytes(chunk.try_into().unwrap());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let values: Vec<u32> = vec![0, 1, u32::MAX, 123456789];
        let mut sink = BitSink::new();
        sink.put_bit(true); // force a non-aligned starting position
        encode(&mut sink, &values);
        let buffer = sink.into_buffer();
        let mut source = BitSource::from_buffer(&buffer);
        source.get_bit().unwrap();
        let mut decoded = vec![0u32; values.len()];
        decode(&mut source, &mut decoded).unwrap();
        assert_eq!(decoded, values);
    }
}
