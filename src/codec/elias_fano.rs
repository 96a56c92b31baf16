//! Elias-Fano coding for `n` sorted values in `[0..=u]`.
//!
//! Low `floor(log2(u/n))` bits of each value are packed densely; the high
//! bits are written as a unary run-length over `ceil(u / 2^low)` buckets.
//! Works for d-gapped monotone doc-ID arrays and prefix-summed frequency
//! arrays alike — the caller supplies the universe `u` both ways.

use crate::bitstream::{BitSink, BitSource};
use crate::error::Result;

/// `floor(log2(u/n))`, the width of the densely packed low bits.
fn low_width(u: u64, n: usize) -> u32 {
    if n == 0 {
        return 0;
    }
    let q = u / n as u64;
    if q == 0 {
        0
    } else {
        63 - q.leading_zeros()
    }
}

/// Encode `n = src.len()` sorted values, each `<= u`.
pub fn encode(sink: &mut BitSink, src: &[u32], u: u64) {
    let width_low = low_width(u, src.len());
    let low_mask: u64 = if width_low == 0 {
        0
    } else {
        (1u64 << width_low) - 1
    };

    for &v in src {
        sink.put_int((v as u64) & low_mask, width_low as u8);
    }
    let mut prev_bucket = 0u64;
    for &v in src {
        let bucket = (v as u64) >> width_low;
        sink.put_unary(bucket - prev_bucket);
        prev_bucket = bucket;
    }
}

/// Decode `dst.len()` values, given the same universe `u` used to encode.
pub fn decode(source: &mut BitSource, dst: &mut [u32], u: u64) -> Result<()> {
    let width_low = low_width(u, dst.len());
    let mut lows = vec![0u64; dst.len()];
    for low in lows.iter_mut() {
        *low = source.get_int(width_low as u8)?;
    }
    let mut bucket = 0u64;
    for (slot, low) in dst.iter_mut().zip(lows) {
        let gap = source.get_unary()?;
        bucket += gap;
        *slot = ((bucket << width_low) | low) as u32;
    }
    Ok(())
}
