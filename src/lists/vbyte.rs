//! `vbyte` list format: d-gap for doc IDs, no transform for frequencies.

use crate::bitstream::{BitSink, BitSource};
use crate::codec::vbyte as codec;
use crate::error::Result;
use crate::lists::{transform, FieldKind};

pub fn encode(sink: &mut BitSink, src: &[u32], field: FieldKind) {
    let mut transformed = vec![0u32; src.len()];
    if field == FieldKind::Docs {
        transform::dgap(src, &mut transformed);
    } else {
        transformed.copy_from_slice(src);
    }
    let as_u64: Vec<u64> = transformed.iter().map(|&v| v as u64).collect();
    codec::encode(sink, &as_u64);
}

pub fn decode(source: &mut BitSource, dst: &mut [u32], field: FieldKind) -> Result<()> {
    let mut as_u64 = vec![0u64; dst.len()];
    codec::decode(source, &mut as_u64)?;
    for (d, v) in dst.iter_mut().zip(&as_u64) {
        *d = *v as u32;
    }
    if field == FieldKind::Docs {
        transform::undo_dgap(dst);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream::BitBuffer;

    #[test]
    fn docs_roundtrip_with_dgap() {
        let docs = vec![1u32, 3, 4, 10, 11];
        let mut sink = BitSink::new();
        encode(&mut sink, &docs, FieldKind::Docs);
        let buffer: BitBuffer = sink.into_buffer();
        let mut source = BitSource::from_buffer(&buffer);
        let mut decoded = vec![0u32; docs.len()];
        decode(&mut source, &mut decoded, FieldKind::Docs).unwrap();
        assert_eq!(decoded, docs);
    }

    #[test]
    fn freqs_roundtrip_untransformed() {
        let freqs = vec![2u32, 1, 5, 3];
        let mut sink = BitSink::new();
        encode(&mut sink, &freqs, FieldKind::Freqs);
        let buffer = sink.into_buffer();
        let mut source = BitSource::from_buffer(&buffer);
        let mut decoded = vec![0u32; freqs.len()];
        decode(&mut source, &mut decoded, FieldKind::Freqs).unwrap();
        assert_eq!(decoded, freqs);
    }
}
