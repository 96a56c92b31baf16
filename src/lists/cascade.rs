//! LZ-cascaded list formats (`vbyte_lz`, `s16_lz`, `u32_lz`, `s16_vblz`):
//! short lists (`n <= threshold`) are written raw via the inner codec;
//! longer lists have the inner codec's bit-packed output zero-padded to a
//! whole 32-bit word and fed through a second, byte-oriented compressor,
//! with an outer `num_u32` prefix recording the padded word count so the
//! exact inner length is recoverable.

use crate::bitstream::{BitBuffer, BitSink, BitSource};
use crate::codec::{generic, vbyte_fastpfor};
use crate::error::{PostingsError, Result};
use crate::lists::FieldKind;

/// Which plain codec packs the list before the second compression pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inner {
    Vbyte,
    Simple16,
    U32,
}

/// The second-pass byte compressor. `VbyteFastpfor` reuses the L2
/// batched-vbyte codec itself as the "entropy coder", matching the
/// `s16_vblz` cascade; the others wrap a `codec::generic` backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compressor {
    Zlib,
    Bzip2,
    Lz4hc,
    Brotli,
    Lzma,
    Zstd,
    VbyteFastpfor,
}

fn inner_encode(inner: Inner, sink: &mut BitSink, src: &[u32], field: FieldKind) {
    match inner {
        Inner::Vbyte => crate::lists::vbyte::encode(sink, src, field),
        Inner::Simple16 => crate::lists::simple16::encode(sink, src, field),
        Inner::U32 => crate::lists::u32::encode(sink, src, field),
    }
}

fn inner_decode(inner: Inner, source: &mut BitSource, dst: &mut [u32], field: FieldKind) -> Result<()> {
    match inner {
        Inner::Vbyte => crate::lists::vbyte::decode(source, dst, field),
        Inner::Simple16 => crate::lists::simple16::decode(source, dst, field),
        Inner::U32 => crate::lists::u32::decode(source, dst, field),
    }
}

fn words_to_bytes(words: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(words.len() * 4);
    for w in words {
        bytes.extend_from_slice(&w.to_le_bytes());
    }
    bytes
}

fn bytes_to_words(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes(c.try_into().unwrap()))
        .collect()
}

/// Encode `src` either raw (if `src.len() <= threshold`) or via the
/// `inner` codec followed by `compressor`.
pub fn encode(
    sink: &mut BitSink,
    src: &[u32],
    field: FieldKind,
    threshold: usize,
    inner: Inner,
    compressor: Compressor,
) -> Result<()> {
    if src.len() <= threshold {
        sink.put_bit(false);
        inner_encode(inner, sink, src, field);
        return Ok(());
    }
    sink.put_bit(true);

    let mut scratch = BitSink::new();
    inner_encode(inner, &mut scratch, src, field);
    scratch.align32();
    let padded_buffer = scratch.into_buffer();
    let padded_bytes = &padded_buffer.as_bytes()[..(padded_buffer.len_bits() / 8) as usize];
    let num_u32 = padded_bytes.len() / 4;

    sink.align32();
    sink.put_int(num_u32 as u64, 32);

    match compressor {
        Compressor::VbyteFastpfor => {
            let words = bytes_to_words(padded_bytes);
            vbyte_fastpfor::encode(sink, &words);
        }
        Compressor::Zlib => generic::zlib::encode(sink, padded_bytes)?,
        Compressor::Bzip2 => generic::bzip2::encode(sink, padded_bytes)?,
        Compressor::Lz4hc => generic::lz4hc::encode(sink, padded_bytes)?,
        Compressor::Brotli => generic::brotli::encode(sink, padded_bytes)?,
        Compressor::Lzma => generic::lzma::encode(sink, padded_bytes)?,
        Compressor::Zstd => generic::zstd::encode(sink, padded_bytes)?,
    }
    Ok(())
}

/// Decode `dst.len()` values written by [`encode`] with the same
/// `threshold`/`inner`/`compressor` parameters.
pub fn decode(
    source: &mut BitSource,
    dst: &mut [u32],
    field: FieldKind,
    threshold: usize,
    inner: Inner,
    compressor: Compressor,
) -> Result<()> {
    let is_compressed = source.get_bit()?;
    if !is_compressed {
        if dst.len() > threshold {
            return Err(PostingsError::corrupt_input(
                "cascade raw flag set but list length exceeds threshold",
            ));
        }
        return inner_decode(inner, source, dst, field);
    }

    source.align32()?;
    let num_u32 = source.get_int(32)? as usize;

    let padded_bytes = match compressor {
        Compressor::VbyteFastpfor => {
            let mut words = vec![0u32; num_u32];
            vbyte_fastpfor::decode(source, &mut words)?;
            words_to_bytes(&words)
        }
        Compressor::Zlib => generic::zlib::decode(source)?,
        Compressor::Bzip2 => generic::bzip2::decode(source)?,
        Compressor::Lz4hc => generic::lz4hc::decode(source)?,
        Compressor::Brotli => generic::brotli::decode(source)?,
        Compressor::Lzma => generic::lzma::decode(source)?,
        Compressor::Zstd => generic::zstd::decode(source)?,
    };
    if padded_bytes.len() != num_u32 * 4 {
        return Err(PostingsError::corrupt_input(format!(
            "cascade payload is {} bytes, expected {} from num_u32 prefix",
            padded_bytes.len(),
            num_u32 * 4
        )));
    }

    let inner_buffer = BitBuffer::from_bytes(padded_bytes, (num_u32 * 32) as u64);
    let mut inner_source = BitSource::from_buffer(&inner_buffer);
    inner_decode(inner, &mut inner_source, dst, field)
}
