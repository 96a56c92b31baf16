//! `u32` list format: d-gap for doc IDs, no transform for frequencies, via
//! the byte-aligned raw `aligned_fixed<u32>` codec.

use crate::bitstream::{BitSink, BitSource};
use crate::codec::aligned_fixed as codec;
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
