//! List formats (L3): each owns the choice of transform and integer codec
//! for a posting list's doc-ID or frequency array, and is named for file
//! naming and section typing.

pub mod cascade;
pub mod ef;
pub mod interp;
pub mod interp_block;
pub mod op4;
pub mod qmx;
pub mod simple16;
pub mod transform;
pub mod u32;
pub mod vbyte;

use crate::bitstream::{BitSink, BitSource};
use crate::error::Result;

/// Which field of a posting a list format is encoding. Doc IDs are
/// strictly increasing 1-based values; frequencies are `>= 1` counts.
/// Plain codecs (vbyte, simple16, op4, u32, qmx) d-gap doc IDs and leave
/// frequencies untransformed; monotone codecs (ef, interp) leave doc IDs
/// alone and prefix-sum frequencies instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Docs,
    Freqs,
}

/// Dispatch tag for a concrete list format, used in file naming and
/// section headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListFormatKind {
    Vbyte,
    Simple16,
    Op4,
    Ef,
    Interp,
    U32,
    Qmx,
}

impl ListFormatKind {
    pub fn name(self) -> &'static str {
        match self {
            ListFormatKind::Vbyte => "vbyte",
            ListFormatKind::Simple16 => "simple16",
            ListFormatKind::Op4 => "op4",
            ListFormatKind::Ef => "ef",
            ListFormatKind::Interp => "interp",
            ListFormatKind::U32 => "u32",
            ListFormatKind::Qmx => "qmx",
        }
    }

    pub fn encode(self, sink: &mut BitSink, src: &[u32], field: FieldKind, u: u64) {
        match self {
            ListFormatKind::Vbyte => vbyte::encode(sink, src, field),
            ListFormatKind::Simple16 => simple16::encode(sink, src, field),
            ListFormatKind::Op4 => op4::encode(sink, src, field),
            ListFormatKind::Ef => ef::encode(sink, src, field, u),
            ListFormatKind::Interp => interp::encode(sink, src, field, u),
            ListFormatKind::U32 => u32::encode(sink, src, field),
            ListFormatKind::Qmx => qmx::encode(sink, src, field),
        }
    }

    pub fn decode(self, source: &mut BitSource, dst: &mut [u32], field: FieldKind, u: u64) -> Result<()> {
        match self {
            ListFormatKind::Vbyte => vbyte::decode(source, dst, field),
            ListFormatKind::Simple16 => simple16::decode(source, dst, field),
            ListFormatKind::Op4 => op4::decode(source, dst, field),
            ListFormatKind::Ef => ef::decode(source, dst, field, u),
            ListFormatKind::Interp => interp::decode(source, dst, field, u),
            ListFormatKind::U32 => u32::decode(source, dst, field),
            ListFormatKind::Qmx => qmx::decode(source, dst, field),
        }
    }
}
