//! Reads the external collaborator's posting format: little-endian
//! 32-bit records. The docs file begins with `[1][num_docs]`, then per
//! term `[list_len][doc_id × list_len]`; the freqs file is
//! `[list_len][freq × list_len]` per term with no header, in the same
//! term order.

use crate::error::{PostingsError, Result};

const DOCS_HEADER_TAG: u32 = 1;

fn read_u32(bytes: &[u8], cursor: &mut usize) -> Result<u32> {
    if *cursor + 4 > bytes.len() {
        return Err(PostingsError::corrupt_input(
            "d2si record truncated reading a u32",
        ));
    }
    let v = u32::from_le_bytes(bytes[*cursor..*cursor + 4].try_into().unwrap());
    *cursor += 4;
    Ok(v)
}

fn read_u32_array(bytes: &[u8], cursor: &mut usize, n: usize) -> Result<Vec<u32>> {
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        out.push(read_u32(bytes, cursor)?);
    }
    Ok(out)
}

/// Streams `(doc_ids, freqs)` posting lists out of a pair of in-memory
/// `d2si`-format buffers, one term at a time.
pub struct D2siReader<'a> {
    docs: &'a [u8],
    freqs: &'a [u8],
    docs_cursor: usize,
    freqs_cursor: usize,
    pub num_docs: u32,
}

impl<'a> D2siReader<'a> {
    /// Parse the docs-file header and position both cursors at the first
    /// term's `list_len` prefix.
    pub fn new(docs: &'a [u8], freqs: &'a [u8]) -> Result<Self> {
        if docs.is_empty() {
            return Err(PostingsError::corrupt_input("d2si docs file is empty"));
        }
        let mut docs_cursor = 0usize;
        let tag = read_u32(docs, &mut docs_cursor)?;
        if tag != DOCS_HEADER_TAG {
            return Err(PostingsError::corrupt_input(format!(
                "d2si docs header tag is {tag}, expected {DOCS_HEADER_TAG}"
            )));
        }
        let num_docs = read_u32(docs, &mut docs_cursor)?;

        Ok(D2siReader {
            docs,
            freqs,
            docs_cursor,
            freqs_cursor: 0,
            num_docs,
        })
    }

    fn at_eof(&self) -> bool {
        self.docs_cursor >= self.docs.len()
    }

    fn next_list(&mut self) -> Result<(Vec<u32>, Vec<u32>)> {
        let list_len = read_u32(self.docs, &mut self.docs_cursor)? as usize;
        let doc_ids = read_u32_array(self.docs, &mut self.docs_cursor, list_len)?;

        let freq_list_len = read_u32(self.freqs, &mut self.freqs_cursor)? as usize;
        if freq_list_len != list_len {
            return Err(PostingsError::corrupt_input(format!(
                "d2si freqs list_len {freq_list_len} does not match docs list_len {list_len}"
            )));
        }
        let freqs = read_u32_array(self.freqs, &mut self.freqs_cursor, list_len)?;

        Ok((doc_ids, freqs))
    }
}

impl<'a> Iterator for D2siReader<'a> {
    type Item = Result<(Vec<u32>, Vec<u32>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.at_eof() {
            return None;
        }
        Some(self.next_list())
    }
}
