//! On-disk container layout: a 64-bit bit-length header, word-aligned
//! payload, and a CRC32 footer, plus the fingerprint naming scheme shared
//! by the LZ/RLZ store files.

use crc32fast::Hasher as Crc32Hasher;

use crate::bitstream::BitBuffer;
use crate::error::{PostingsError, Result};

/// Footer size: 4 bytes CRC32 + 4 bytes magic.
const FOOTER_MAGIC: [u8; 4] = *b"TSOP"; // "POST" reversed, marks valid file end
const HEADER_SIZE: usize = 8;
const FOOTER_SIZE: usize = 8;

/// Serialise a [`BitBuffer`] as `[len_bits: u64][payload, byte-aligned][crc32][magic]`.
pub fn write_container(buffer: &BitBuffer) -> Vec<u8> {
    let payload = buffer.as_content_bytes();
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len() + FOOTER_SIZE);
    out.extend_from_slice(&buffer.len_bits().to_le_bytes());
    out.extend_from_slice(payload);

    let mut hasher = Crc32Hasher::new();
    hasher.update(&out);
    let crc = hasher.finalize();
    out.extend_from_slice(&crc.to_le_bytes());
    out.extend_from_slice(&FOOTER_MAGIC);
    out
}

/// Parse a buffer written by [`write_container`], verifying the footer
/// magic and CRC32 before handing back the payload as a [`BitBuffer`].
pub fn read_container(bytes: &[u8]) -> Result<BitBuffer> {
    if bytes.len() < HEADER_SIZE + FOOTER_SIZE {
        return Err(PostingsError::corrupt_index(
            "container file too short for header and footer",
        ));
    }
    let footer_start = bytes.len() - FOOTER_SIZE;
    let magic = &bytes[footer_start + 4..];
    if magic != FOOTER_MAGIC {
        return Err(PostingsError::corrupt_index(format!(
            "invalid footer magic: expected {:?}, got {:?}",
            FOOTER_MAGIC, magic
        )));
    }
    let stored_crc = u32::from_le_bytes(bytes[footer_start..footer_start + 4].try_into().unwrap());

    let mut hasher = Crc32Hasher::new();
    hasher.update(&bytes[..footer_start]);
    let actual_crc = hasher.finalize();
    if actual_crc != stored_crc {
        return Err(PostingsError::corrupt_index(format!(
            "crc32 mismatch: file has {stored_crc:#010x}, computed {actual_crc:#010x}"
        )));
    }

    let len_bits = u64::from_le_bytes(bytes[0..8].try_into().unwrap());
    let payload = bytes[8..footer_start].to_vec();
    Ok(BitBuffer::from_bytes(payload, len_bits))
}

/// CRC32 of a single byte slice, used to fingerprint container inputs.
pub fn crc32(data: &[u8]) -> u32 {
    let mut hasher = Crc32Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Fingerprint an LZ/RLZ store's file name from its input and dictionary:
/// `crc32(input) xor crc32(dict)`, hex-joined with the codec's `type()`
/// string by the caller (e.g. `format!("{:08x}-{type_tag}", fingerprint)`).
pub fn fingerprint(input: &[u8], dict: &[u8]) -> u32 {
    crc32(input) ^ crc32(dict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream::BitSink;

    #[test]
    fn roundtrips_a_simple_buffer() {
        let mut sink = BitSink::new();
        sink.put_int(0xDEAD_BEEF, 32);
        sink.put_int(42, 16);
        let buffer = sink.into_buffer();

        let bytes = write_container(&buffer);
        let decoded = read_container(&bytes).unwrap();
        assert_eq!(decoded.len_bits(), buffer.len_bits());
        assert_eq!(decoded.as_content_bytes(), buffer.as_content_bytes());
    }

    #[test]
    fn corrupted_payload_fails_crc_check() {
        let mut sink = BitSink::new();
        sink.put_int(123, 32);
        let buffer = sink.into_buffer();
        let mut bytes = write_container(&buffer);
        let mid = HEADER_SIZE;
        bytes[mid] ^= 0xFF;
        let err = read_container(&bytes).unwrap_err();
        assert!(matches!(err, PostingsError::CorruptIndex { .. }));
    }

    #[test]
    fn fingerprint_is_order_independent_xor() {
        let a = fingerprint(b"hello", b"dict");
        let b = fingerprint(b"dict", b"hello");
        assert_eq!(a, crc32(b"hello") ^ crc32(b"dict"));
        assert_eq!(a, b);
    }
}
