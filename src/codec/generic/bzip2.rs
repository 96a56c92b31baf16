//! bzip2 framing via the `bzip2` crate. Input is partitioned into 1 GiB
//! sub-chunks, each compressed and length-prefixed independently, since
//! the backend frames a single bzip2 stream per `BzEncoder` instance
//! rather than accepting unbounded input as one block.

use std::io::Write;

use crate::bitstream::{BitSink, BitSource};
use crate::error::{PostingsError, Result};

const CHUNK_SIZE: usize = 1 << 30;

pub fn encode(sink: &mut BitSink, raw: &[u8]) -> Result<()> {
    sink.align8();
    sink.put_int(raw.len() as u64, 64);
    for chunk in raw.chunks(CHUNK_SIZE) {
        let mut encoder =
            ::bzip2::write::BzEncoder::new(Vec::new(), ::bzip2::Compression::best());
        encoder
            .write_all(chunk)
            .map_err(|e| PostingsError::codec_failure("bzip2", e.to_string()))?;
        let compressed = encoder
            .finish()
            .map_err(|e| PostingsError::codec_failure("bzip2", e.to_string()))?;
        sink.put_int(compressed.len() as u64, 32);
        sink.put_bytes(&compressed);
    }
    Ok(())
}

pub fn decode(source: &mut BitSource) -> Result<Vec<u8>> {
    source.align8()?;
    let original_len = source.get_int(64)? as usize;
    let mut out = Vec::with_capacity(original_len);
    let mut remaining = original_len;
    while remaining > 0 {
        let this_chunk_len = remaining.min(CHUNK_SIZE);
        let compressed_len = source.get_int(32)? as usize;
        let compressed = source.get_bytes(compressed_len)?;
        let mut decoder = ::bzip2::read::BzDecoder::new(compressed);
        let mut chunk_out = Vec::with_capacity(this_chunk_len);
        std::io::Read::read_to_end(&mut decoder, &mut chunk_out)
            .map_err(|e| PostingsError::codec_failure("bzip2", e.to_string()))?;
        if chunk_out.len() != this_chunk_len {
            return Err(PostingsError::corrupt_input(format!(
                "bzip2 sub-chunk decoded to {} bytes, expected {this_chunk_len}",
                chunk_out.len()
            )));
        }
        out.extend_from_slice(&chunk_out);
        remaining -= this_chunk_len;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let raw = b"mississippi river delta deposits ".repeat(30);
        let mut sink = BitSink::new();
        encode(&mut sink, &raw).unwrap();
        let buffer = sink.into_buffer();
        let mut source = BitSource::from_buffer(&buffer);
        assert_eq!(decode(&mut source).unwrap(), raw);
    }

    #[test]
    fn empty_input_roundtrips() {
        let mut sink = BitSink::new();
        encode(&mut sink, &[]).unwrap();
        let buffer = sink.into_buffer();
        let mut source = BitSource::from_buffer(&buffer);
        assert_eq!(decode(&mut source).unwrap(), Vec::<u8>::new());
    }
}
