//! Build-side concurrency: the parallel block-range driver shared by the
//! LZ and RLZ stores.

pub mod parallel;
