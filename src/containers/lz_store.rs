//! Generic byte-compressor-over-blocks container: a byte stream is split
//! into fixed-size blocks, each compressed independently by a
//! `codec::generic` backend, and addressed by a [`BlockMap`]. Parallel
//! build reuses [`crate::build::parallel`].

use crate::bitstream::{BitBuffer, BitSink, BitSource};
use crate::build::parallel::{build_blocks_parallel, partition_ranges};
use crate::codec::generic;
use crate::containers::block_map::BlockMap;
use crate::error::{PostingsError, Result};

/// Which `codec::generic` backend compresses each block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compressor {
    Zlib,
    Bzip2,
    Lz4hc,
    Brotli,
    Lzma,
    Zstd,
}

impl Compressor {
    fn encode(self, sink: &mut BitSink, raw: &[u8]) -> Result<()> {
        match self {
            Compressor::Zlib => generic::zlib::encode(sink, raw),
            Compressor::Bzip2 => generic::bzip2::encode(sink, raw),
            Compressor::Lz4hc => generic::lz4hc::encode(sink, raw),
            Compressor::Brotli => generic::brotli::encode(sink, raw),
            Compressor::Lzma => generic::lzma::encode(sink, raw),
            Compressor::Zstd => generic::zstd::encode(sink, raw),
        }
    }

    fn decode(self, source: &mut BitSource) -> Result<Vec<u8>> {
        match self {
            Compressor::Zlib => generic::zlib::decode(source),
            Compressor::Bzip2 => generic::bzip2::decode(source),
            Compressor::Lz4hc => generic::lz4hc::decode(source),
            Compressor::Brotli => generic::brotli::decode(source),
            Compressor::Lzma => generic::lzma::decode(source),
            Compressor::Zstd => generic::zstd::decode(source),
        }
    }
}

pub struct LzStore {
    pub block_size: usize,
    pub data_size: usize,
    pub block_map: BlockMap,
    pub compressed: BitBuffer,
    pub compressor: Compressor,
}

fn num_blocks(data_size: usize, block_size: usize) -> usize {
    if data_size == 0 {
        0
    } else {
        (data_size + block_size - 1) / block_size
    }
}

fn block_len(data_size: usize, block_size: usize, i: usize) -> usize {
    let start = i * block_size;
    (data_size - start).min(block_size)
}

impl LzStore {
    /// Build from `data`, splitting it into `block_size`-byte blocks (the
    /// last possibly shorter), compressing each independently with a
    /// worker pool of `num_workers` threads.
    pub fn build(data: &[u8], block_size: usize, compressor: Compressor, num_workers: usize) -> Result<Self> {
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
                compressor
                    .encode(&mut sink, &data[start..start + len])
                    .expect("in-memory encode cannot fail");
            }
            (sink.into_buffer(), offsets)
        });

        let block_map = BlockMap {
            block_offsets,
            block_factor_counts: Vec::new(),
        };
        block_map.validate()?;

        Ok(LzStore {
            block_size,
            data_size: data.len(),
            block_map,
            compressed,
            compressor,
        })
    }

    pub fn num_blocks(&self) -> usize {
        self.block_map.block_offsets.len()
    }

    /// Decode block `i`: exactly `block_size` bytes, or the tail length
    /// for the last block.
    pub fn block(&self, i: usize) -> Result<Vec<u8>> {
        let offset = *self
            .block_map
            .block_offsets
            .get(i)
            .ok_or_else(|| PostingsError::corrupt_index(format!("block index {i} out of range")))?;
        let expected_len = block_len(self.data_size, self.block_size, i);

        let mut source = BitSource::from_buffer(&self.compressed);
        source.seek(offset)?;
        let decoded = self.compressor.decode(&mut source)?;
        if decoded.len() != expected_len {
            return Err(PostingsError::corrupt_index(format!(
                "block {i} decoded to {} bytes, expected {expected_len}",
                decoded.len()
            )));
        }
        Ok(decoded)
    }

    /// Decode every block in order and concatenate them back into the
    /// original byte stream.
    pub fn decode_all(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.data_size);
        for i in 0..self.num_blocks() {
            out.extend(self.block(i)?);
        }
        Ok(out)
    }
}

/// Lazily decodes one block at a time, advancing a byte cursor.
pub struct LzStoreIter<'a> {
    store: &'a LzStore,
    next_block: usize,
}

impl<'a> LzStoreIter<'a> {
    pub fn new(store: &'a LzStore) -> Self {
        LzStoreIter { store, next_block: 0 }
    }
}

impl<'a> Iterator for LzStoreIter<'a> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_block >= self.store.num_blocks() {
            return None;
        }
        let block = self.store.block(self.next_block);
        self.next_block += 1;
        Some(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn tail_block_has_the_expected_length() {
        let data = sample_data(2500);
        let store = LzStore::build(&data, 1024, Compressor::Zstd, 4).unwrap();
        assert_eq!(store.num_blocks(), 3);
        assert_eq!(store.block(2).unwrap().len(), 452);
        assert_eq!(store.decode_all().unwrap(), data);
    }

    #[test]
    fn exact_multiple_of_block_size_has_no_tail() {
        let data = sample_data(4096);
        let store = LzStore::build(&data, 1024, Compressor::Zlib, 2).unwrap();
        assert_eq!(store.num_blocks(), 4);
        for i in 0..4 {
            assert_eq!(store.block(i).unwrap().len(), 1024);
        }
    }

    #[test]
    fn iterator_reassembles_the_original_stream() {
        let data = sample_data(5000);
        let store = LzStore::build(&data, 777, Compressor::Brotli, 3).unwrap();
        let reassembled: Vec<u8> = LzStoreIter::new(&store)
            .collect::<Result<Vec<_>>>()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(reassembled, data);
    }

    #[test]
    fn empty_input_has_no_blocks() {
        let store = LzStore::build(&[], 1024, Compressor::Zstd, 4).unwrap();
        assert_eq!(store.num_blocks(), 0);
        assert_eq!(store.decode_all().unwrap(), Vec::<u8>::new());
    }
}
