//! Simple16: 16 selectors packing groups of small integers into the 28
//! usable data bits of a 32-bit word (4 selector bits + 28 data bits).
//!
//! Selector 0 packs twenty-eight 1-bit values; selector 15 packs a single
//! 28-bit value; the selectors in between interpolate between those two
//! extremes. Each word is chosen greedily: the widest batch (most values)
//! whose members all fit the selector's bit width.

use crate::bitstream::{BitSink, BitSource};
use crate::error::{PostingsError, Result};

/// `(count, width)` per selector, in ascending selector order (count
/// descending, width ascending), spanning `28x1` to `1x28`.
const SELECTORS: [(u32, u32); 16] = [
    (28, 1),
    (14, 2),
    (9, 3),
    (7, 4),
    (5, 5),
    (4, 6),
    (4, 7),
    (3, 8),
    (3, 9),
    (2, 10),
    (2, 12),
    (2, 14),
    (1, 16),
    (1, 18),
    (1, 21),
    (1, 28),
];

const WORD_BITS: u32 = 32;
const SELECTOR_BITS: u32 = 4;

fn max_value(width: u32) -> u64 {
    (1u64 << width) - 1
}

fn choose_selector(values: &[u32]) -> Result<(usize, usize)> {
    for (sel, &(count, width)) in SELECTORS.iter().enumerate() {
        let take = (count as usize).min(values.len());
        if take == 0 {
            continue;
        }
        let max_val = max_value(width);
        if values[..take].iter().all(|&v| (v as u64) <= max_val) {
            return Ok((sel, take));
        }
    }
    Err(PostingsError::invariant(
        "simple16: value exceeds the 28-bit maximum width (selector 15)",
    ))
}

/// Encode `src`, one 32-bit word at a time.
pub fn encode(sink: &mut BitSink, src: &[u32]) -> Result<()> {
    let mut i = 0;
    while i < src.len() {
        let (sel, take) = choose_selector(&src[i..])?;
        let (count, width) = SELECTORS[sel];
        sink.put_int(sel as u64, SELECTOR_BITS as u8);
        for k in 0..count as usize {
            let v = if k < take { src[i + k] as u64 } else { 0 };
            sink.put_int(v, width as u8);
        }
        let used = SELECTOR_BITS + count * width;
        if used < WORD_BITS {
            sink.put_int(0, (WORD_BITS - used) as u8);
        }
        i += take;
    }
    Ok(())
}

/// Decode `dst.len()` values.
pub fn decode(source: &mut BitSource, dst: &mut [u32]) -> Result<()> {
    let mut out = 0;
    while out < dst.len() {
        let sel = source.get_int(SELECTOR_BITS as u8)? as usize;
        if sel >= SELECTORS.len() {
            return Err(PostingsError::corrupt_input("simple16: invalid selector"));
        }
        let (count, width) = SELECTORS[sel];
        for _ in 0..count {
            let v = source.get_int(width as u8)?;
            if out < dst.len() {
                dst[out] = v as u32;
                out += 1;
            }
        }
        let used = SELECTOR_BITS + count * width;
        if used < WORD_BITS {
            source.skip((WORD_BITS - used) as u64)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_mixed_widths() {
        let values: Vec<u32> = vec![0, 1, 1, 0, 3, 7, 15, 300, 70000, 1, 1, 1, 1, 1, 1, 1, 1];
        let mut sink = BitSink::new();
        encode(&mut sink, &values).unwrap();
        let buffer = sink.into_buffer();
        assert_eq!(buffer.len_bits() % 32, 0);
        let mut source = BitSource::from_buffer(&buffer);
        let mut decoded = vec![0u32; values.len()];
        decode(&mut source, &mut decoded).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn all_ones_uses_selector_zero() {
        let values = vec![1u32; 28];
        let mut sink = BitSink::new();
        encode(&mut sink, &values).unwrap();
        let buffer = sink.into_buffer();
        assert_eq!(buffer.len_bits(), 32);
        let mut source = BitSource::from_buffer(&buffer);
        let mut decoded = vec![0u32; values.len()];
        decode(&mut source, &mut decoded).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn value_too_wide_is_invariant_violation() {
        let mut sink = BitSink::new();
        let err = encode(&mut sink, &[1 << 28]).unwrap_err();
        assert!(matches!(err, PostingsError::InvariantViolation { .. }));
    }
}
