//! Binary interpolative coding: recursive midpoint encoding over a sorted
//! list bounded by `[low..high]`.
//!
//! The median is encoded with [`crate::bitstream::BitSink::put_minbin`] in
//! the tightened range `[low + ceil(n/2) - 1 .. high - floor(n/2)]` (the
//! slack left by the remaining values on either side), then the two halves
//! recurse independently. Top-level values are bounded by `[1..=u]`.

use crate::bitstream::{BitSink, BitSource};
use crate::error::Result;

fn encode_range(sink: &mut BitSink, values: &[u32], low: u64, high: u64) {
    if values.is_empty() {
        return;
    }
    let n = values.len() as u64;
    let mid_idx = ((n + 1) / 2 - 1) as usize;
    let median = values[mid_idx] as u64;

    let range_low = low + (n + 1) / 2 - 1;
    let range_high = high - n / 2;
    let range_u = range_high - range_low + 1;
    sink.put_minbin(median - range_low + 1, range_u);

    encode_range(sink, &values[..mid_idx], low, median - 1);
    encode_range(sink, &values[mid_idx + 1..], median + 1, high);
}

fn decode_range(source: &mut BitSource, dst: &mut [u32], low: u64, high: u64) -> Result<()> {
    if dst.is_empty() {
        return Ok(());
    }
    let n = dst.len() as u64;
    let mid_idx = ((n + 1) / 2 - 1) as usize;

    let range_low = low + (n + 1) / 2 - 1;
    let range_high = high - n / 2;
    let range_u = range_high - range_low + 1;
    let offset = source.get_minbin(range_u)?;
    let median = range_low + offset - 1;
    dst[mid_idx] = median as u32;

    let (left, right) = dst.split_at_mut(mid_idx);
    decode_range(source, left, low, median - 1)?;
    decode_range(source, &mut right[1..], median + 1, high)?;
    Ok(())
}

/// Encode a sorted, non-decreasing `src`, bounded by `[1..=u]`.
pub fn encode(sink: &mut BitSink, src: &[u32], u: u64) {
    encode_range(sink, src, 1, u);
}

/// Decode `dst.len()` values bounded by `[1..=u]`.
pub fn decode(source: &mut BitSource, dst: &mut [u32], u: u64) -> Result<()> {
    decode_range(source, dst, 1, u)
}

/// Encode `src`, bounded by an explicit `[low..=high]` range, used by
/// `interp_block` to encode each block against its tightened local
/// universe instead of the whole list's universe.
pub fn encode_bounded(sink: &mut BitSink, src: &[u32], low: u64, high: u64) {
    encode_range(sink, src, low, high);
}

/// Decode `dst.len()` values, bounded by an explicit `[low..=high]` range.
pub fn decode_bounded(source: &mut BitSource, dst: &mut [u32], low: u64, high: u64) -> Result<()> {
    decode_range(source, dst, low, high)
}
