//! Block- and list-based random-access containers (L4): flat and
//! interleaved inverted indexes, and the generic/RLZ/zstd-dictionary
//! block stores, all addressed through [`meta::IndexMeta`] or
//! [`block_map::BlockMap`].

pub mod block_map;
pub mod flat_invidx;
pub mod interleaved_invidx;
pub mod lz_store;
pub mod meta;
pub mod rlz;
pub mod zstd_dict_store;
