//! `interp_block<B>` list format: the list is split into blocks of `B`
//! values; each block's last (largest) value is written as a fixed-32
//! "skip" so a reader can binary-search block boundaries without
//! decoding, then the block is interpolative-coded against the local
//! universe `[previous skip + 1 ..= this skip]` instead of the whole
//! list's universe.

use crate::bitstream::{BitSink, BitSource};
use crate::codec::interpolative as codec;
use crate::error::Result;
use crate::lists::{transform, FieldKind};

pub fn encode(sink: &mut BitSink, src: &[u32], field: FieldKind, block_size: usize) {
    let mut transformed = vec![0u32; src.len()];
    if field == FieldKind::Freqs {
        transform::prefix_sum(src, &mut transformed);
    } else {
        transformed.copy_from_slice(src);
    }

    let mut prev_skip = 0u64;
    for block in transformed.chunks(block_size) {
        let skip = *block.last().expect("chunks() never yields an empty slice") as u64;
        sink.put_int(skip, 32);
        codec::encode_bounded(sink, block, prev_skip + 1, skip);
        prev_skip = skip;
    }
}

pub fn decode(
    source: &mut BitSource,
    dst: &mut [u32],
    field: FieldKind,
    block_size: usize,
) -> Result<()> {
    let mut prev_skip = 0u64;
    let mut offset = 0usize;
    while offset < dst.len() {
        let end = (offset + block_size).min(dst.len());
        let skip = source.get_int(32)?;
        codec::decode_bounded(source, &mut dst[offset..end], prev_skip + 1, skip)?;
        prev_skip = skip;
        offset = end;
    }
    if field == FieldKind::Freqs {
        transform::undo_prefix_sum(dst);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docs_roundtrip_across_multiple_blocks() {
        let docs: Vec<u32> = vec![3, 8, 9, 11, 12, 13, 17, 25, 40, 41, 90];
        let mut sink = BitSink::new();
        encode(&mut sink, &docs, FieldKind::Docs, 4);
        let buffer = sink.into_buffer();
        let mut source = BitSource::from_buffer(&buffer);
        let mut decoded = vec![0u32; docs.len()];
        decode(&mut source, &mut decoded, FieldKind::Docs, 4).unwrap();
        assert_eq!(decoded, docs);
    }

    #[test]
    fn freqs_roundtrip_via_prefix_sum() {
        let freqs: Vec<u32> = vec![2, 1, 5, 3, 2, 1, 1, 4];
        let mut sink = BitSink::new();
        encode(&mut sink, &freqs, FieldKind::Freqs, 3);
        let buffer = sink.into_buffer();
        let mut source = BitSource::from_buffer(&buffer);
        let mut decoded = vec![0u32; freqs.len()];
        decode(&mut source, &mut decoded, FieldKind::Freqs, 3).unwrap();
        assert_eq!(decoded, freqs);
    }
}
