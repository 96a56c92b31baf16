//! `fixed<w>`: unpadded fixed-width bit packing.

use crate::bitstream::{BitSink, BitSource};
use crate::error::Result;

/// Encode `src` using `width` bits per value (no inter-value padding).
pub fn encode(sink: &mut BitSink, src: &[u32], width: u8) {
    for &v in src {
        sink.put_int(v as u64, width);
    }
}

/// Decode `dst.len()` values of `width` bits each.
pub fn decode(source: &mut BitSource, dst: &mut [u32], width: u8) -> Result<()> {
    for slot in dst.iter_mut() {
        *slot = source.get_int(width)? as u32;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_various_widths() {
        for width in [1u8, 4, 9, 17, 32] {
            let max = if width == 32 {
                u32::MAX as u64
            } else {
                (1u64 << width) - 1
            };
            let values: Vec<u32> = vec![0, max as u32, (max / 2) as u32];
            let mut sink = BitSink::new();
            encode(&mut sink, &values, width);
            let buffer = sink.into_buffer();
            let mut source = BitSource::from_buffer(&buffer);
            let mut decoded = vec![0u32; values.len()];
            decode(&mut source, &mut decoded, width).unwrap();
            assert_eq!(decoded, values, "width={width}");
        }
    }
}
