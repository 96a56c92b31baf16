//! `ef` list format: no transform for doc IDs (already monotone), prefix
//! sum for frequencies, via Elias-Fano.

use crate::bitstream::{BitSink, BitSource};
use crate::codec::elias_fano as codec;
use crate::error::Result;
use crate::lists::{transform, FieldKind};

pub fn encode(sink: &mut BitSink, src: &[u32], field: FieldKind, u: u64) {
    let mut transformed = vec![0u32; src.len()];
    if field == FieldKind::Freqs {
        transform::prefix_sum(src, &mut transformed);
    } else {
        transformed.copy_from_slice(src);
    }
    codec::encode(sink, &transformed, u);
}

pub fn decode(source: &mut BitSource, dst: &mut [u32], field: FieldKind, u: u64) -> Result<()> {
    codec::decode(source, dst, u)?;
    if field == FieldKind::Freqs {
        transform::undo_prefix_sum(dst);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docs_roundtrip_monotone() {
        let docs = vec![2u32, 7, 13, 19];
        let u = 20u64;
        let mut sink = BitSink::new();
        encode(&mut sink, &docs, FieldKind::Docs, u);
        let buffer = sink.into_buffer();
        let mut source = BitSource::from_buffer(&buffer);
        let mut decoded = vec![0u32; docs.len()];
        decode(&mut source, &mut decoded, FieldKind::Docs, u).unwrap();
        assert_eq!(decoded, docs);
    }

    #[test]
    fn freqs_roundtrip_via_prefix_sum() {
        let freqs = vec![2u32, 1, 5, 3];
        let u = freqs.iter().map(|&f| f as u64).sum();
        let mut sink = BitSink::new();
        encode(&mut sink, &freqs, FieldKind::Freqs, u);
        let buffer = sink.into_buffer();
        let mut source = BitSource::from_buffer(&buffer);
        let mut decoded = vec![0u32; freqs.len()];
        decode(&mut source, &mut decoded, FieldKind::Freqs, u).unwrap();
        assert_eq!(decoded, freqs);
    }
}
