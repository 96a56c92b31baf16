// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the on-disk container layout: `read_container` must
//! never panic on arbitrary bytes, and a buffer written by
//! `write_container` must always read back identically.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rlz_postings::bitstream::BitSink;
use rlz_postings::layout::{read_container, write_container};

#[derive(Debug, arbitrary::Arbitrary)]
struct Input {
    garbage: Vec<u8>,
    values: Vec<u64>,
}

fuzz_target!(|input: Input| {
    let _ = read_container(&input.garbage);

    let mut sink = BitSink::new();
    for &v in &input.values {
        sink.put_gamma(v % (1 << 40) + 1);
    }
    let buffer = sink.into_buffer();
    let bytes = write_container(&buffer);
    let decoded = read_container(&bytes).expect("our own container must read back");
    assert_eq!(decoded.len_bits(), buffer.len_bits());
    assert_eq!(decoded.as_content_bytes(), buffer.as_content_bytes());
});
