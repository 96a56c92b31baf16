//! OptPFor (`op4`): blocks of 128 values bit-packed at a chosen width `b`,
//! with values that don't fit `b` bits carried as exceptions.
//!
//! Any list tail shorter than 128 values is emitted whole via
//! [`crate::codec::vbyte_fastpfor`], per the catalogue contract. The
//! exception sub-format here (position list + value list, each
//! `vbyte_fastpfor`-encoded) is this crate's own choice — OptPFor's
//! original exception layout is backend-specific and not independently
//! reproducible (see `DESIGN.md`), so only the `decode(encode(x)) == x`
//! property is guaranteed, not bit-compatibility with any other OptPFor
//! implementation.

use crate::bitstream::{BitSink, BitSource};
use crate::codec::vbyte_fastpfor;
use crate::error::Result;

const BLOCK_LEN: usize = 128;

/// Approximate bits needed to store a value, used by the block-width
/// heuristic below.
fn bits_needed(x: u32) -> u32 {
    32 - x.leading_zeros()
}

/// Pick the bit width minimizing a simple cost model: `128*b` bits for the
/// dense array plus an estimated `40` bits per exception (an 8-bit
/// position plus a ~32-bit value, both typically shorter under vbyte).
fn choose_width(block: &[u32]) -> u32 {
    let mut best_width = 0u32;
    let mut best_cost = usize::MAX;
    for b in 0..=32u32 {
        let exceptions = block.iter().filter(|&&v| bits_needed(v) > b).count();
        let cost = block.len() * b as usize + exceptions * 40;
        if cost < best_cost {
            best_cost = cost;
            best_width = b;
        }
    }
    best_width
}

fn encode_block(sink: &mut BitSink, block: &[u32]) {
    let width = choose_width(block);
    let mask: u64 = if width == 32 {
        u32::MAX as u64
    } else {
        (1u64 << width) - 1
    };

    let mut positions = Vec::new();
    let mut values = Vec::new();
    for (i, &v) in block.iter().enumerate() {
        if bits_needed(v) > width {
            positions.push(i as u32);
            values.push(v);
        }
    }

    sink.put_int(width as u64, 8);
    sink.put_int(positions.len() as u64, 8);
    for &v in block {
        sink.put_int((v as u64) & mask, width as u8);
    }
    vbyte_fastpfor::encode(sink, &positions);
    vbyte_fastpfor::encode(sink, &values);
}

fn decode_block(source: &mut BitSource, dst: &mut [u32]) -> Result<()> {
    let width = source.get_int(8)? as u8;
    let num_exceptions = source.get_int(8)? as usize;
    for slot in dst.iter_mut() {
        *slot = source.get_int(width)? as u32;
    }
    let mut positions = vec![0u32; num_exceptions];
    vbyte_fastpfor::decode(source, &mut positions)?;
    let mut values = vec![0u32; num_exceptions];
    vbyte_fastpfor::decode(source, &mut values)?;
    for (pos, val) in positions.into_iter().zip(values) {
        dst[pos as usize] = val;
    }
    Ok(())
}

/// Encode `src` in 128-value blocks, tail via `vbyte_fastpfor`.
pub fn encode(sink: &mut BitSink, src: &[u32]) {
    let num_full = src.len() / BLOCK_LEN;
    for b in 0..num_full {
        encode_block(sink, &src[b * BLOCK_LEN..(b + 1) * BLOCK_LEN]);
    }
    let tail = &src[num_full * BLOCK_LEN..];
    if !tail.is_empty() {
        vbyte_fastpfor::encode(sink, tail);
    }
}

/// Decode `n` values.
pub fn decode(source: &mut BitSource, dst: &mut [u32]) -> Result<()> {
    let n = dst.len();
    let num_full = n / BLOCK_LEN;
    for b in 0..num_full {
        decode_block(source, &mut dst[b * BLOCK_LEN..(b + 1) * BLOCK_LEN])?;
    }
    let tail_start = num_full * BLOCK_LEN;
    if tail_start < n {
        vbyte_fastpfor::decode(source, &mut dst[tail_start..])?;
    }
    Ok(())
}
