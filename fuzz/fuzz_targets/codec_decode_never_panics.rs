// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the batched integer codecs: arbitrary bit streams must
//! never panic on decode, only ever return `Ok` or a `PostingsError`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rlz_postings::bitstream::{BitBuffer, BitSource};
use rlz_postings::codec::{op4, simple16, vbyte};

#[derive(Debug, arbitrary::Arbitrary)]
struct Input {
    bytes: Vec<u8>,
    n: u8,
}

fuzz_target!(|input: Input| {
    let n = (input.n as usize) % 256;
    let len_bits = (input.bytes.len() as u64) * 8;
    let buffer = BitBuffer::from_bytes(input.bytes.clone(), len_bits);

    let mut dst = vec![0u32; n];

    let mut source = BitSource::from_buffer(&buffer);
    let _ = simple16::decode(&mut source, &mut dst);

    let mut source = BitSource::from_buffer(&buffer);
    let _ = op4::decode(&mut source, &mut dst);

    let mut dst64 = vec![0u64; n];
    let mut source = BitSource::from_buffer(&buffer);
    let _ = vbyte::decode(&mut source, &mut dst64);
});
