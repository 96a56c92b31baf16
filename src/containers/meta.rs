//! Shared index metadata: per-list bit offsets and the container-wide
//! summary that `load_from_file` deserialises into `meta_data`.

use crate::error::{PostingsError, Result};

/// Bit offsets into the doc and freq streams of the containing index, plus
/// the list's length and `Ft` (sum of frequencies), needed as an upper
/// bound by some codecs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ListMeta {
    pub doc_offset: u64,
    pub freq_offset: u64,
    pub list_len: u32,
    pub ft: u64,
}

/// Container-wide summary for an inverted index.
#[derive(Clone, Debug, Default)]
pub struct IndexMeta {
    pub num_docs: u32,
    pub num_lists: u32,
    pub num_postings: u64,
    pub list_meta: Vec<ListMeta>,
}

impl IndexMeta {
    /// Invariant check on load: `sum(list_len) == num_postings`, and list
    /// offsets are non-decreasing.
    pub fn validate(&self) -> Result<()> {
        if self.list_meta.len() != self.num_lists as usize {
            return Err(PostingsError::corrupt_index(format!(
                "num_lists {} does not match list_meta length {}",
                self.num_lists,
                self.list_meta.len()
            )));
        }
        let total: u64 = self.list_meta.iter().map(|m| m.list_len as u64).sum();
        if total != self.num_postings {
            return Err(PostingsError::corrupt_index(format!(
                "sum of list_len ({total}) does not equal num_postings ({})",
                self.num_postings
            )));
        }
        let mut prev_doc = 0u64;
        let mut prev_freq = 0u64;
        for (i, m) in self.list_meta.iter().enumerate() {
            if i > 0 && (m.doc_offset < prev_doc || m.freq_offset < prev_freq) {
                return Err(PostingsError::corrupt_index(format!(
                    "list {i} offsets are not monotone"
                )));
            }
            prev_doc = m.doc_offset;
            prev_freq = m.freq_offset;
        }
        Ok(())
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&self.num_docs.to_le_bytes());
        bytes.extend_from_slice(&self.num_lists.to_le_bytes());
        bytes.extend_from_slice(&self.num_postings.to_le_bytes());
        for m in &self.list_meta {
            bytes.extend_from_slice(&m.doc_offset.to_le_bytes());
            bytes.extend_from_slice(&m.freq_offset.to_le_bytes());
            bytes.extend_from_slice(&m.list_len.to_le_bytes());
            bytes.extend_from_slice(&m.ft.to_le_bytes());
        }
        bytes
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        const HEADER: usize = 4 + 4 + 8;
        const ENTRY: usize = 8 + 8 + 4 + 8;
        if bytes.len() < HEADER {
            return Err(PostingsError::corrupt_index("meta_data header truncated"));
        }
        let num_docs = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
        let num_lists = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
        let num_postings = u64::from_le_bytes(bytes[8..16].try_into().unwrap());

        let expected_len = HEADER + num_lists as usize * ENTRY;
        if bytes.len() != expected_len {
            return Err(PostingsError::corrupt_index(format!(
                "meta_data is {} bytes, expected {expected_len}",
                bytes.len()
            )));
        }

        let mut list_meta = Vec::with_capacity(num_lists as usize);
        let mut cursor = HEADER;
        for _ in 0..num_lists {
            let doc_offset = u64::from_le_bytes(bytes[cursor..cursor + 8].try_into().unwrap());
            let freq_offset =
                u64::from_le_bytes(bytes[cursor + 8..cursor + 16].try_into().unwrap());
            let list_len = u32::from_le_bytes(bytes[cursor + 16..cursor + 20].try_into().unwrap());
            let ft = u64::from_le_bytes(bytes[cursor + 20..cursor + 28].try_into().unwrap());
            list_meta.push(ListMeta {
                doc_offset,
                freq_offset,
                list_len,
                ft,
            });
            cursor += ENTRY;
        }

        let meta = IndexMeta {
            num_docs,
            num_lists,
            num_postings,
            list_meta,
        };
        meta.validate()?;
        Ok(meta)
    }
}
