//! `qmx` list format: d-gap for doc IDs, no transform for frequencies.

use crate::bitstream::{BitSink, BitSource};
use crate::codec::qmx as codec;
use crate::error::Result;
use crate::lists::{transform, FieldKind};

pub fn encode(sink: &mut BitSink, src: &[u32], field: FieldKind) {
    let mut transformed = vec![0u32; src.len()];
    if field == FieldKind::Docs {
        transform::dgap(src, &mut transformed);
    } else {
        transformed.copy_from_slice(src);
    }
    codec::encode(sink, &transformed);
}

pub fn decode(source: &mut BitSource, dst: &mut [u32], field: FieldKind) -> Result<()> {
    codec::decode(source, dst)?;
    if field == FieldKind::Docs {
        transform::undo_dgap(dst);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docs_roundtrip() {
        let docs: Vec<u32> = (1..=200u32).collect();
        let mut sink = BitSink::new();
        encode(&mut sink, &docs, FieldKind::Docs);
        let buffer = sink.into_buffer();
        let mut source = BitSource::from_buffer(&buffer);
        let mut decoded = vec![0u32; docs.len()];
        decode(&mut source, &mut decoded, FieldKind::Docs).unwrap();
        assert_eq!(decoded, docs);
    }
}
