//! Block-offset map shared by [`crate::containers::lz_store`] and
//! [`crate::containers::rlz`]: strictly increasing bit offsets into the
//! compressed/factor stream, plus (for RLZ) a per-block factor count.
//! Both arrays are d-gapped and vbyte-coded, since offsets and counts are
//! small relative to the stream length and don't warrant a heavier codec.

use crate::bitstream::{BitSink, BitSource};
use crate::codec::vbyte;
use crate::error::{PostingsError, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockMap {
    pub block_offsets: Vec<u64>,
    pub block_factor_counts: Vec<u32>,
}

impl BlockMap {
    pub fn validate(&self) -> Result<()> {
        for w in self.block_offsets.windows(2) {
            if w[1] <= w[0] {
                return Err(PostingsError::corrupt_index(
                    "block offsets are not strictly increasing",
                ));
            }
        }
        if !self.block_factor_counts.is_empty()
            && self.block_factor_counts.len() != self.block_offsets.len()
        {
            return Err(PostingsError::corrupt_index(
                "block_factor_counts length does not match block_offsets",
            ));
        }
        Ok(())
    }

    pub fn write(&self, sink: &mut BitSink) -> Result<()> {
        self.validate()?;
        sink.put_int(self.block_offsets.len() as u64, 64);
        let mut gaps = vec![0u64; self.block_offsets.len()];
        let mut prev = 0u64;
        for (g, &o) in gaps.iter_mut().zip(&self.block_offsets) {
            *g = o - prev;
            prev = o;
        }
        vbyte::encode(sink, &gaps);

        sink.put_bit(!self.block_factor_counts.is_empty());
        if !self.block_factor_counts.is_empty() {
            let counts: Vec<u64> = self.block_factor_counts.iter().map(|&c| c as u64).collect();
            vbyte::encode(sink, &counts);
        }
        Ok(())
    }

    pub fn read(source: &mut BitSource) -> Result<Self> {
        let n = source.get_int(64)? as usize;
        let mut gaps = vec![0u64; n];
        vbyte::decode(source, &mut gaps)?;
        let mut block_offsets = vec![0u64; n];
        let mut running = 0u64;
        for (o, &g) in block_offsets.iter_mut().zip(&gaps) {
            running += g;
            *o = running;
        }

        let has_counts = source.get_bit()?;
        let mut block_factor_counts = Vec::new();
        if has_counts {
            let mut counts = vec![0u64; n];
            vbyte::decode(source, &mut counts)?;
            block_factor_counts = counts.into_iter().map(|c| c as u32).collect();
        }

        let map = BlockMap {
            block_offsets,
            block_factor_counts,
        };
        map.validate()?;
        Ok(map)
    }
}
