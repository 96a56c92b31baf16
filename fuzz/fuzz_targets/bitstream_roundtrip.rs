// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the bit stream primitives: unary, fixed-width, gamma,
//! and minbin codes are the foundation every integer codec builds on.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rlz_postings::bitstream::{BitSink, BitSource};

#[derive(Debug, arbitrary::Arbitrary)]
struct Ops {
    u: u64,
    values: Vec<u32>,
}

fuzz_target!(|ops: Ops| {
    let u = ops.u.max(1);
    let mut sink = BitSink::new();
    for &v in &ops.values {
        sink.put_gamma(v as u64 + 1);
        sink.put_minbin((v as u64) % u, u);
        sink.put_int(v as u64 & 0xFFFF, 16);
    }
    let buffer = sink.into_buffer();
    let mut source = BitSource::from_buffer(&buffer);
    for &v in &ops.values {
        let gamma = source.get_gamma().expect("gamma decode should not fail on our own encoding");
        assert_eq!(gamma, v as u64 + 1);
        let minbin = source
            .get_minbin(u)
            .expect("minbin decode should not fail on our own encoding");
        assert_eq!(minbin, (v as u64) % u);
        let fixed = source.get_int(16).expect("fixed decode should not fail");
        assert_eq!(fixed, v as u64 & 0xFFFF);
    }
});
