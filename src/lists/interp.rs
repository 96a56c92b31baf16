//! `interp` list format: no transform for doc IDs, prefix sum for
//! frequencies, via binary interpolative coding.

use crate::bitstream::{BitSink, BitSource};
use crate::codec::interpolative as codec;
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
        let docs = vec![3u32, 8, 9, 11, 12, 13, 17];
        let u = 20u64;
        let mut sink = BitSink::new();
        encode(&mut sink, &docs, FieldKind::Docs, u);
        let buffer = sink.into_buffer();
        let mut source = BitSource::from_buffer(&buffer);
        let mut decoded = vec![0u32; docs.len()];
        decode(&mut source, &mut decoded, FieldKind::Docs, u).unwrap();
        assert_eq!(decoded, docs);
    }
}
