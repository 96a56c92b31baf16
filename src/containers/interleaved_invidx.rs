//! Interleaved inverted index: built from an existing flat index by
//! weaving `(dgap, freq)` pairs into one contiguous buffer and encoding it
//! with a single plain integer codec. Since the interleaved sequence
//! alternates a d-gapped doc ID with an untransformed frequency, it is not
//! itself monotone, so only the plain bit-packing codecs apply here (not
//! `ef`/`interp`, which assume a monotone input).

use crate::bitstream::{BitBuffer, BitSink, BitSource};
use crate::codec::{aligned_fixed, op4, qmx, simple16, vbyte};
use crate::containers::flat_invidx::FlatInvIndex;
use crate::containers::meta::{IndexMeta, ListMeta};
use crate::error::{PostingsError, Result};
use crate::lists::transform;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlainCodec {
    Vbyte,
    Simple16,
    Op4,
    U32,
    Qmx,
}

impl PlainCodec {
    fn encode(self, sink: &mut BitSink, values: &[u32]) {
        match self {
            PlainCodec::Vbyte => {
                let as_u64: Vec<u64> = values.iter().map(|&v| v as u64).collect();
                vbyte::encode(sink, &as_u64);
            }
            PlainCodec::Simple16 => simple16::encode(sink, values),
            PlainCodec::Op4 => op4::encode(sink, values),
            PlainCodec::U32 => aligned_fixed::encode(sink, values),
            PlainCodec::Qmx => qmx::encode(sink, values),
        }
    }

    fn decode(self, source: &mut BitSource, dst: &mut [u32]) -> Result<()> {
        match self {
            PlainCodec::Vbyte => {
                let mut as_u64 = vec![0u64; dst.len()];
                vbyte::decode(source, &mut as_u64)?;
                for (d, v) in dst.iter_mut().zip(&as_u64) {
                    *d = *v as u32;
                }
                Ok(())
            }
            PlainCodec::Simple16 => simple16::decode(source, dst),
            PlainCodec::Op4 => op4::decode(source, dst),
            PlainCodec::U32 => aligned_fixed::decode(source, dst),
            PlainCodec::Qmx => qmx::decode(source, dst),
        }
    }
}

pub struct InterleavedInvIndex {
    pub meta: IndexMeta,
    pub list_stream: BitBuffer,
    pub codec: PlainCodec,
}

impl InterleavedInvIndex {
    /// Build from an existing flat index, re-reading each of its lists.
    pub fn from_flat(flat: &FlatInvIndex, codec: PlainCodec) -> Result<Self> {
        let mut sink = BitSink::new();
        let mut list_meta = Vec::new();

        for i in 0..flat.meta.list_meta.len() {
            let (doc_ids, freqs) = flat.list(i)?;
            let offset = sink.tell();

            let mut gaps = vec![0u32; doc_ids.len()];
            transform::dgap(&doc_ids, &mut gaps);
            let mut interleaved = vec![0u32; 2 * doc_ids.len()];
            for j in 0..doc_ids.len() {
                interleaved[2 * j] = gaps[j];
                interleaved[2 * j + 1] = freqs[j];
            }
            codec.encode(&mut sink, &interleaved);

            let ft: u64 = freqs.iter().map(|&f| f as u64).sum();
            list_meta.push(ListMeta {
                doc_offset: offset,
                freq_offset: 0,
                list_len: doc_ids.len() as u32,
                ft,
            });
        }

        let meta = IndexMeta {
            num_docs: flat.meta.num_docs,
            num_lists: list_meta.len() as u32,
            num_postings: flat.meta.num_postings,
            list_meta,
        };
        meta.validate()?;

        Ok(InterleavedInvIndex {
            meta,
            list_stream: sink.into_buffer(),
            codec,
        })
    }

    pub fn list(&self, i: usize) -> Result<(Vec<u32>, Vec<u32>)> {
        let lm = self
            .meta
            .list_meta
            .get(i)
            .ok_or_else(|| PostingsError::invariant(format!("list index {i} out of range")))?;
        let len = lm.list_len as usize;

        let mut source = BitSource::from_buffer(&self.list_stream);
        source.seek(lm.doc_offset)?;
        let mut interleaved = vec![0u32; 2 * len];
        self.codec.decode(&mut source, &mut interleaved)?;

        let mut gaps = vec![0u32; len];
        let mut freqs = vec![0u32; len];
        for j in 0..len {
            gaps[j] = interleaved[2 * j];
            freqs[j] = interleaved[2 * j + 1];
        }
        transform::undo_dgap(&mut gaps);
        Ok((gaps, freqs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lists::ListFormatKind;

    #[test]
    fn matches_the_flat_index_it_was_built_from() {
        let lists = vec![
            (vec![1u32, 3, 4], vec![2u32, 1, 5]),
            (vec![2u32, 5, 6, 10], vec![1u32, 1, 3, 2]),
            (vec![7u32], vec![9u32]),
        ];
        let flat = FlatInvIndex::build(
            10,
            lists.clone(),
            ListFormatKind::Vbyte,
            ListFormatKind::Vbyte,
        )
        .unwrap();
        let interleaved = InterleavedInvIndex::from_flat(&flat, PlainCodec::Vbyte).unwrap();

        for i in 0..lists.len() {
            assert_eq!(flat.list(i).unwrap(), interleaved.list(i).unwrap());
        }
    }
}
