//! A compressed postings store: bit-level stream primitives, an integer
//! codec family, list formats built on top of them, and block-based
//! random-access containers (flat/interleaved inverted indexes, a
//! generic-compressor block store, and RLZ/zstd-dictionary stores).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐     ┌──────────────┐
//! │  bitstream  │────▶│    codec     │────▶│    lists    │────▶│  containers  │
//! │ (BitSink,   │     │ (vbyte, ef,  │     │ (per-field  │     │ (flat/       │
//! │  BitSource) │     │  interp, ...)│     │  transform) │     │  interleaved │
//! └─────────────┘     └──────────────┘     └─────────────┘     │  invidx, LZ/ │
//!                                                                │  RLZ stores)│
//!                                                                └──────────────┘
//! ```
//!
//! `build` holds the parallel block-range driver shared by the LZ and RLZ
//! stores; `external` adapts a source collaborator's posting format into
//! the iterator the container builders consume; `layout` is the on-disk
//! header/footer/fingerprint scheme; `error` carries the failure kinds
//! every fallible operation in this crate returns.

pub mod bitstream;
pub mod build;
pub mod codec;
pub mod containers;
pub mod error;
pub mod external;
pub mod layout;
pub mod lists;

pub use error::{PostingsError, Result};
