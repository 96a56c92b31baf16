//! Flat inverted index: independent per-list doc-ID and frequency bit
//! streams, addressed by bit offsets recorded in [`IndexMeta`].

use crate::bitstream::{BitBuffer, BitSink, BitSource};
use crate::containers::meta::{IndexMeta, ListMeta};
use crate::error::{PostingsError, Result};
use crate::lists::{FieldKind, ListFormatKind};

pub struct FlatInvIndex {
    pub meta: IndexMeta,
    pub doc_stream: BitBuffer,
    pub freq_stream: BitBuffer,
    pub doc_format: ListFormatKind,
    pub freq_format: ListFormatKind,
}

impl FlatInvIndex {
    /// Build from an iterator of `(doc_ids, freqs)` posting lists.
    /// `doc_ids` must be strictly increasing and `freqs[i] >= 1`.
    pub fn build<I>(
        num_docs: u32,
        lists: I,
        doc_format: ListFormatKind,
        freq_format: ListFormatKind,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (Vec<u32>, Vec<u32>)>,
    {
        let mut doc_sink = BitSink::new();
        let mut freq_sink = BitSink::new();
        let mut list_meta = Vec::new();
        let mut num_postings = 0u64;

        for (doc_ids, freqs) in lists {
            if doc_ids.len() != freqs.len() {
                return Err(PostingsError::corrupt_input(
                    "doc_ids and freqs length mismatch while building flat inverted index",
                ));
            }
            for w in doc_ids.windows(2) {
                if w[1] <= w[0] {
                    return Err(PostingsError::corrupt_input(
                        "doc_ids must be strictly increasing",
                    ));
                }
            }
            if freqs.iter().any(|&f| f == 0) {
                return Err(PostingsError::corrupt_input("freqs must be >= 1"));
            }

            let doc_offset = doc_sink.tell();
            let freq_offset = freq_sink.tell();
            let ft: u64 = freqs.iter().map(|&f| f as u64).sum();

            doc_format.encode(&mut doc_sink, &doc_ids, FieldKind::Docs, num_docs as u64);
            freq_format.encode(&mut freq_sink, &freqs, FieldKind::Freqs, ft.max(1));

            num_postings += doc_ids.len() as u64;
            list_meta.push(ListMeta {
                doc_offset,
                freq_offset,
                list_len: doc_ids.len() as u32,
                ft,
            });
        }

        let meta = IndexMeta {
            num_docs,
            num_lists: list_meta.len() as u32,
            num_postings,
            list_meta,
        };
        meta.validate()?;

        Ok(FlatInvIndex {
            meta,
            doc_stream: doc_sink.into_buffer(),
            freq_stream: freq_sink.into_buffer(),
            doc_format,
            freq_format,
        })
    }

    /// Decode the `i`-th posting list.
    pub fn list(&self, i: usize) -> Result<(Vec<u32>, Vec<u32>)> {
        let lm = self
            .meta
            .list_meta
            .get(i)
            .ok_or_else(|| PostingsError::invariant(format!("list index {i} out of range")))?;
        let len = lm.list_len as usize;

        let mut doc_source = BitSource::from_buffer(&self.doc_stream);
        doc_source.seek(lm.doc_offset)?;
        let mut doc_ids = vec![0u32; len];
        self.doc_format.decode(
            &mut doc_source,
            &mut doc_ids,
            FieldKind::Docs,
            self.meta.num_docs as u64,
        )?;

        let mut freq_source = BitSource::from_buffer(&self.freq_stream);
        freq_source.seek(lm.freq_offset)?;
        let mut freqs = vec![0u32; len];
        self.freq_format.decode(
            &mut freq_source,
            &mut freqs,
            FieldKind::Freqs,
            lm.ft.max(1),
        )?;

        Ok((doc_ids, freqs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_lists() -> Vec<(Vec<u32>, Vec<u32>)> {
        vec![
            (vec![1, 3, 4], vec![2, 1, 5]),
            (vec![2, 5, 6, 10], vec![1, 1, 3, 2]),
            (vec![7], vec![9]),
        ]
    }

    #[test]
    fn builds_and_decodes_every_list() {
        let lists = sample_lists();
        let index =
            FlatInvIndex::build(10, lists.clone(), ListFormatKind::Vbyte, ListFormatKind::Vbyte)
                .unwrap();
        assert_eq!(index.meta.num_postings, 8);
        for (i, expected) in lists.iter().enumerate() {
            assert_eq!(&index.list(i).unwrap(), expected);
        }
    }

    #[test]
    fn works_with_elias_fano_format() {
        let lists = sample_lists();
        let index =
            FlatInvIndex::build(10, lists.clone(), ListFormatKind::Ef, ListFormatKind::Ef).unwrap();
        for (i, expected) in lists.iter().enumerate() {
            assert_eq!(&index.list(i).unwrap(), expected);
        }
    }

    #[test]
    fn non_increasing_doc_ids_are_rejected() {
        let lists = vec![(vec![3u32, 2], vec![1u32, 1])];
        let err =
            FlatInvIndex::build(10, lists, ListFormatKind::Vbyte, ListFormatKind::Vbyte)
                .unwrap_err();
        assert!(matches!(err, PostingsError::CorruptInput { .. }));
    }
}
