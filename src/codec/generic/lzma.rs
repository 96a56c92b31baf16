//! LZMA/xz framing via the `xz2` crate.

use std::io::Write;

use super::{read_framed64, write_framed64};
use crate::bitstream::{BitSink, BitSource};
use crate::error::{PostingsError, Result};

pub fn encode(sink: &mut BitSink, raw: &[u8]) -> Result<()> {
    let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
    encoder
        .write_all(raw)
        .map_err(|e| PostingsError::codec_failure("lzma", e.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|e| PostingsError::codec_failure("lzma", e.to_string()))?;
    write_framed64(sink, raw.len(), &compressed);
    Ok(())
}

pub fn decode(source: &mut BitSource) -> Result<Vec<u8>> {
    let (original_len, compressed) = read_framed64(source)?;
    let mut decoder = xz2::read::XzDecoder::new(compressed);
    let mut out = Vec::with_capacity(original_len);
    std::io::Read::read_to_end(&mut decoder, &mut out)
        .map_err(|e| PostingsError::codec_failure("lzma", e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let raw = b"term dictionary payload bytes for lzma ".repeat(15);
        let mut sink = BitSink::new();
        encode(&mut sink, &raw).unwrap();
        let buffer = sink.into_buffer();
        let mut source = BitSource::from_buffer(&buffer);
        assert_eq!(decode(&mut source).unwrap(), raw);
    }
}
