//! Batched vbyte, padded to a whole 32-bit word, with a
//! length-in-32-bit-words prefix. Chunk cap is `2^30` values.

use crate::bitstream::{BitSink, BitSource};
use crate::codec::vbyte;
use crate::error::{PostingsError, Result};

const MAX_CHUNK_VALUES: usize = 1 << 30;

/// Encode `src` (at most `2^30` values) as length-prefixed, word-padded
/// vbyte.
pub fn encode(sink: &mut BitSink, src: &[u32]) {
    debug_assert!(src.len() <= MAX_CHUNK_VALUES);
    let mut inner = BitSink::new();
    for &x in src {
        vbyte::encode_one(&mut inner, x as u64);
    }
    inner.align8();
    let mut payload = inner.into_buffer().as_content_bytes().to_vec();
    while payload.len() % 4 != 0 {
        payload.push(0);
    }
    let num_words = (payload.len() / 4) as u32;

    sink.align8();
    sink.put_int(num_words as u64, 32);
    sink.put_bytes(&payload);
}

/// Decode `n` values.
pub fn decode(source: &mut BitSource, dst: &mut [u32]) -> Result<()> {
    source.align8()?;
    let num_words = source.get_int(32)? as usize;
    let payload = source.get_bytes(num_words * 4)?;
    let buffer = crate::bitstream::BitBuffer::from_bytes(payload.to_vec(), (payload.len() as u64) * 8);
    let mut inner = BitSource::from_buffer(&buffer);
    for slot in dst.iter_mut() {
        let v = vbyte::decode_one(&mut inner)?;
        if v > u32::MAX as u64 {
            return Err(PostingsError::corrupt_input(
                "vbyte_fastpfor decoded value exceeds u32 range",
            ));
        }
        *slot = v as u32;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let values: Vec<u32> = vec![0, 1, 127, 128, 300_000, u32::MAX];
        let mut sink = BitSink::new();
        encode(&mut sink, &values);
        let buffer = sink.into_buffer();
        let mut source = BitSource::from_buffer(&buffer);
        let mut decoded = vec![0u32; values.len()];
        decode(&mut source, &mut decoded).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn empty_chunk_roundtrips() {
        let mut sink = BitSink::new();
        encode(&mut sink, &[]);
        let buffer = sink.into_buffer();
        let mut source = BitSource::from_buffer(&buffer);
        let mut decoded: Vec<u32> = vec![];
        decode(&mut source, &mut decoded).unwrap();
        assert!(decoded.is_empty());
    }
}
