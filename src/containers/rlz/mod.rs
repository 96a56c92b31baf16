//! RLZ store: blocks of input rewritten as factors against a shared
//! dictionary, built in parallel and addressed by a [`BlockMap`].

pub mod dictionary;
pub mod factorizer;
pub mod sais;

use crate::bitstream::{BitBuffer, BitSink, BitSource};
use crate::build::parallel::{build_blocks_parallel_with_counts, partition_ranges};
use crate::codec::vbyte;
use crate::containers::block_map::BlockMap;
use crate::error::{PostingsError, Result};
use dictionary::{DictionaryConfig, DictionaryIndex};
use factorizer::{factorize_block, replay_factors, Factor};

/// Codec for the offset and length arrays of `factor_coder_blocked`.
/// Both are small non-negative integers, so only `vbyte` is offered;
/// a fixed-width alternative would waste bits on short matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FactorIntCodec {
    Vbyte,
}

fn encode_factors(sink: &mut BitSink, factors: &[Factor]) {
    sink.put_int(factors.len() as u64, 32);

    for f in factors {
        sink.put_bit(matches!(f, Factor::Copy { .. }));
    }

    let offsets: Vec<u64> = factors
        .iter()
        .filter_map(|f| match f {
            Factor::Copy { dict_offset, .. } => Some(*dict_offset as u64),
            Factor::Literal { .. } => None,
        })
        .collect();
    let lengths: Vec<u64> = factors
        .iter()
        .filter_map(|f| match f {
            Factor::Copy { length, .. } => Some(*length as u64),
            Factor::Literal { .. } => None,
        })
        .collect();
    let literals: Vec<u8> = factors
        .iter()
        .filter_map(|f| match f {
            Factor::Literal { byte } => Some(*byte),
            Factor::Copy { .. } => None,
        })
        .collect();

    vbyte::encode(sink, &offsets);
    vbyte::encode(sink, &lengths);
    sink.align8();
    sink.put_bytes(&literals);
}

fn decode_factors(source: &mut BitSource) -> Result<Vec<Factor>> {
    let n = source.get_int(32)? as usize;
    let mut is_copy = vec![false; n];
    for flag in is_copy.iter_mut() {
        *flag = source.get_bit()?;
    }
    let num_copies = is_copy.iter().filter(|&&c| c).count();
    let num_literals = n - num_copies;

    let mut offsets = vec![0u64; num_copies];
    vbyte::decode(source, &mut offsets)?;
    let mut lengths = vec![0u64; num_copies];
    vbyte::decode(source, &mut lengths)?;
    source.align8()?;
    let literals = source.get_bytes(num_literals)?;

    let mut factors = Vec::with_capacity(n);
    let mut copy_i = 0usize;
    let mut lit_i = 0usize;
    for &c in &is_copy {
        if c {
            factors.push(Factor::Copy {
                dict_offset: offsets[copy_i] as usize,
                length: lengths[copy_i] as usize,
            });
            copy_i += 1;
        } else {
            factors.push(Factor::Literal {
                byte: literals[lit_i],
            });
            lit_i += 1;
        }
    }
    Ok(factors)
}

pub struct RlzStore {
    pub block_size: usize,
    pub data_size: usize,
    pub dict: Vec<u8>,
    pub block_map: BlockMap,
    pub factor_stream: BitBuffer,
    pub literal_threshold: usize,
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

impl RlzStore {
    /// Build a dictionary from `data` per `dict_cfg`/`norm`, then
    /// factorise `data` against it in `block_size`-byte blocks, with a
    /// worker pool of `num_workers` threads.
    pub fn build(
        data: &[u8],
        dict_cfg: &DictionaryConfig,
        norm: f64,
        block_size: usize,
        literal_threshold: usize,
        num_workers: usize,
    ) -> Result<Self> {
        let dict = dictionary::build_dictionary(data, dict_cfg, norm);
        Self::build_with_dict(data, dict, block_size, literal_threshold, num_workers)
    }

    /// Build against a dictionary supplied by the caller (e.g. shared
    /// across several stores), skipping dictionary construction.
    pub fn build_with_dict(
        data: &[u8],
        dict: Vec<u8>,
        block_size: usize,
        literal_threshold: usize,
        num_workers: usize,
    ) -> Result<Self> {
        if block_size == 0 {
            return Err(PostingsError::invariant("block_size must be nonzero"));
        }
        let dict_index = DictionaryIndex::build(dict);
        let total = num_blocks(data.len(), block_size);
        let ranges = partition_ranges(total, num_workers);

        let (factor_stream, block_offsets, block_factor_counts) =
            build_blocks_parallel_with_counts(ranges, |range| {
                let mut sink = BitSink::new();
                let mut offsets = Vec::with_capacity(range.len());
                let mut counts = Vec::with_capacity(range.len());
                for i in range {
                    let start = i * block_size;
                    let len = block_len(data.len(), block_size, i);
                    let block = &data[start..start + len];
                    let factors = factorize_block(&dict_index, block, literal_threshold);

                    offsets.push(sink.tell());
                    counts.push(factors.len() as u32);
                    encode_factors(&mut sink, &factors);
                }
                (sink.into_buffer(), offsets, counts)
            });

        let block_map = BlockMap {
            block_offsets,
            block_factor_counts,
        };
        block_map.validate()?;

        Ok(RlzStore {
            block_size,
            data_size: data.len(),
            dict: dict_index.dict,
            block_map,
            factor_stream,
            literal_threshold,
        })
    }

    pub fn num_blocks(&self) -> usize {
        self.block_map.block_offsets.len()
    }

    /// Decode block `i` by replaying its factors against the dictionary.
    pub fn block(&self, i: usize) -> Result<Vec<u8>> {
        let offset = *self
            .block_map
            .block_offsets
            .get(i)
            .ok_or_else(|| PostingsError::corrupt_index(format!("block index {i} out of range")))?;
        let expected_len = block_len(self.data_size, self.block_size, i);

        let mut source = BitSource::from_buffer(&self.factor_stream);
        source.seek(offset)?;
        let factors = decode_factors(&mut source)?;
        let decoded = replay_factors(&self.dict, &factors);
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
            traversal: dictionary::Traversal::Seq,
            seed: 7,
        };
        let store = RlzStore::build(&data, &cfg, 1.0, 1024, 3, 4).unwrap();
        assert_eq!(store.num_blocks(), 20);
        assert_eq!(store.decode_all().unwrap(), data);
        assert_eq!(store.block_map.block_factor_counts.len(), store.num_blocks());
    }

    #[test]
    fn tie_break_block_matches_the_catalogue_example() {
        let store =
            RlzStore::build_with_dict(b"ABCX", b"ABCABCX".to_vec(), 4, 3, 1).unwrap();
        assert_eq!(store.num_blocks(), 1);
        assert_eq!(store.block(0).unwrap(), b"ABCX");
        assert_eq!(store.block_map.block_factor_counts, vec![1]);
    }

    #[test]
    fn tail_block_has_the_expected_length() {
        let data: Vec<u8> = (0..2500u32).map(|i| (i % 7) as u8).collect();
        let store = RlzStore::build_with_dict(&data, vec![0, 1, 2, 3, 4, 5, 6], 1024, 3, 2).unwrap();
        assert_eq!(store.num_blocks(), 3);
        assert_eq!(store.block(2).unwrap().len(), 452);
        assert_eq!(store.decode_all().unwrap(), data);
    }
}
