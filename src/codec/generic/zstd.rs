//! zstd framing via the `zstd` crate, no dictionary.

use super::{read_framed64, write_framed64};
use crate::bitstream::{BitSink, BitSource};
use crate::error::{PostingsError, Result};

const LEVEL: i32 = 19;

pub fn encode(sink: &mut BitSink, raw: &[u8]) -> Result<()> {
    let compressed = ::zstd::bulk::compress(raw, LEVEL)
        .map_err(|e| PostingsError::codec_failure("zstd", e.to_string()))?;
    write_framed64(sink, raw.len(), &compressed);
    Ok(())
}

pub fn decode(source: &mut BitSource) -> Result<Vec<u8>> {
    let (original_len, compressed) = read_framed64(source)?;
    ::zstd::bulk::decompress(compressed, original_len)
        .map_err(|e| PostingsError::codec_failure("zstd", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let raw = b"sparse posting list fragment ".repeat(50);
        let mut sink = BitSink::new();
        encode(&mut sink, &raw).unwrap();
        let buffer = sink.into_buffer();
        let mut source = BitSource::from_buffer(&buffer);
        assert_eq!(decode(&mut source).unwrap(), raw);
    }
}
