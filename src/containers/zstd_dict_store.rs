//! Same shape as [`crate::containers::rlz::RlzStore`] but with no
//! factoriser: each block is compressed with zstd against a shared
//! dictionary built by the same "local-coverage-norms" strategy.

use crate::bitstream::{BitBuffer, BitSink, BitSource};
use crate::build::parallel::{build_blocks_parallel, partition_ranges};
use crate::codec::generic::zstd_dict;
use crate::containers::block_map::BlockMap;
use crate::containers::rlz::dictionary::{build_dictionary, DictionaryConfig};
use crate::error::{PostingsError, Result};

pub struct ZstdDictStore {
    pub block_size: usize,
    pub data_size: usize,
    pub dict: Vec<u8>,
    pub block_map: BlockMap,
    pub compressed: BitBuffer,
}

fn num_blocks(data_size: usize, block_size: usize) -> usize {
    if data_size == 0 {
        0
    } else {
        data_size.div_ceil(block_size)
    }
}

fn block_len(data_size: usize, block_size: usize, i: usize) -> usize {
    let start = i * block_size;
    (data_size - start).min(block_size)
}

impl ZstdDictStore {
    pub fn build(
        data: &[u8],
        dict_cfg: &DictionaryConfig,
        norm: f64,
        block_size: usize,
        num_workers: usize,
    ) -> Result<Self> {
        let dict = build_dictionary(data, dict_cfg, norm);
        Self::build_with_dict(data, dict, block_size, num_workers)
    }

    pub fn build_with_dict(
        data: &[u8],
        dict: Vec<u8>,
        block_size: usize,
        num_workers: usize,
    ) -> Result<Self> {
        if block_size == 0 {
            return Err(PostingsError::invariant("block_size must be nonzero"));
        }
        let total = num_blocks(data.len(), block_size);
        let ranges = partition_ranges(total, num_workers);

        let (compressed, block_offsets) = build_blocks_parallel(ranges, |range| {
            let mut sink = BitSink::new();
            let mut offsets = Vec::with_capacity(range.len());
            for i in range {
                let start = i * block_size;
                let len = block_len(data.len(), block_size, i);
                offsets.push(sink.tell());
                zstd_dict::encode(&mut sink, &data[start..start + len], &dict)
                    .expect("in-memory encode cannot fail");
            }
            (sink.into_buffer(), offsets)
        });

        let block_map = BlockMap {
            block_offsets,
            block_factor_counts: Vec::new(),
        };
        block_map.validate()?;

        Ok(ZstdDictStore {
            block_size,
            data_size: data.len(),
            dict,
            block_map,
            compressed,
        })
    }

    pub fn num_blocks(&self) -> usize {
        self.block_map.block_offsets.len()
    }

    pub fn block(&self, i: usize) -> Result<Vec<u8>> {
        let offset = *self
            .block_map
            .block_offsets
            .get(i)
            .ok_or_else(|| PostingsError::corrupt_index(format!("block index {i} out of range")))?;
        let expected_len = block_len(self.data_size, self.block_size, i);

        let mut source = BitSource::from_buffer(&self.compressed);
        source.seek(offset)?;
        let decoded = zstd_dict::decode(&mut source, &self.dict)?;
        if decoded.len() != expected_len {
            return Err(PostingsError::corrupt_index(format!(
                "block {i} decoded to {} bytes, expected {expected_len}",
                decoded.len()
            )));
        }
        Ok(decoded)
    }

    pub fn decode_all(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.data_size);
        for i in 0..self.num_blocks() {
            out.extend(self.block(i)?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::rlz::dictionary::Traversal;

    #[test]
    fn roundtrips_with_a_built_dictionary() {
        let data: Vec<u8> = b"the quick brown fox jumps over the lazy dog "
            .iter()
            .cycle()
            .take(20_000)
            .copied()
            .collect();
        let cfg = DictionaryConfig {
            target_dict_bytes: 2048,
            sample_block: 256,
            estimator_block: 8,
            down_size: 32,
            traversal: Traversal::Seq,
            seed: 7,
        };
        let store = ZstdDictStore::build(&data, &cfg, 1.0, 1024, 4).unwrap();
        assert_eq!(store.num_blocks(), 20);
        assert_eq!(store.decode_all().unwrap(), data);
    }

    #[test]
    fn tail_block_has_the_expected_length() {
        let data: Vec<u8> = (0..2500u32).map(|i| (i % 7) as u8).collect();
        let store = ZstdDictStore::build_with_dict(&data, vec![0, 1, 2, 3, 4, 5, 6], 1024, 2).unwrap();
        assert_eq!(store.num_blocks(), 3);
        assert_eq!(store.block(2).unwrap().len(), 452);
        assert_eq!(store.decode_all().unwrap(), data);
    }
}
