//! Brotli framing via the `brotli` crate (already a teacher dependency).

use std::io::Write;

use super::{read_framed, write_framed};
use crate::bitstream::{BitSink, BitSource};
use crate::error::{PostingsError, Result};

const QUALITY: u32 = 9;
const LG_WINDOW_SIZE: u32 = 22;

pub fn encode(sink: &mut BitSink, raw: &[u8]) -> Result<()> {
    let mut compressed = Vec::new();
    {
        let mut writer =
            ::brotli::CompressorWriter::new(&mut compressed, 4096, QUALITY, LG_WINDOW_SIZE);
        writer
            .write_all(raw)
            .map_err(|e| PostingsError::codec_failure("brotli", e.to_string()))?;
    }
    write_framed(sink, raw.len(), &compressed);
    Ok(())
}

pub fn decode(source: &mut BitSource) -> Result<Vec<u8>> {
    let (original_len, compressed) = read_framed(source)?;
    let mut out = Vec::with_capacity(original_len);
    let mut reader = ::brotli::Decompressor::new(compressed, 4096);
    std::io::Read::read_to_end(&mut reader, &mut out)
        .map_err(|e| PostingsError::codec_failure("brotli", e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let raw = b"dictionary fragment reused across blocks ".repeat(25);
        let mut sink = BitSink::new();
        encode(&mut sink, &raw).unwrap();
        let buffer = sink.into_buffer();
        let mut source = BitSource::from_buffer(&buffer);
        assert_eq!(decode(&mut source).unwrap(), raw);
    }
}
