// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the RLZ factoriser: for any dictionary and any input
//! block, `replay_factors(dict, factorize_block(dict_index, block, t))`
//! must reconstruct `block` exactly.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rlz_postings::containers::rlz::dictionary::DictionaryIndex;
use rlz_postings::containers::rlz::factorizer::{factorize_block, replay_factors};

#[derive(Debug, arbitrary::Arbitrary)]
struct Input {
    dict: Vec<u8>,
    block: Vec<u8>,
    literal_threshold: u8,
}

fuzz_target!(|input: Input| {
    if input.dict.is_empty() || input.block.is_empty() || input.block.len() > 4096 {
        return;
    }
    let dict_index = DictionaryIndex::build(input.dict);
    let factors = factorize_block(&dict_index, &input.block, input.literal_threshold as usize);
    let replayed = replay_factors(&dict_index.dict, &factors);
    assert_eq!(replayed, input.block);
});
