// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the external `d2si` posting-format reader: arbitrary
//! byte pairs must never panic, only return `Ok` or a `PostingsError`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rlz_postings::external::d2si::D2siReader;

#[derive(Debug, arbitrary::Arbitrary)]
struct Input {
    docs: Vec<u8>,
    freqs: Vec<u8>,
}

fuzz_target!(|input: Input| {
    if let Ok(reader) = D2siReader::new(&input.docs, &input.freqs) {
        for result in reader {
            if result.is_err() {
                break;
            }
        }
    }
});
