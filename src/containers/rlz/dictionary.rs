//! Dictionary construction via the "local-coverage-norms" strategy: sample
//! windows by hash, count their frequency, then greedily pick the
//! highest-scoring, least-covered window per epoch until the dictionary
//! budget is filled.

use std::collections::HashMap;

use super::sais::sais;

/// Traversal order over coarse epochs during the greedy picking pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Traversal {
    Seq,
    Rand,
}

#[derive(Clone, Debug)]
pub struct DictionaryConfig {
    pub target_dict_bytes: usize,
    pub sample_block: usize,
    pub estimator_block: usize,
    pub down_size: usize,
    pub traversal: Traversal,
    pub seed: u64,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        DictionaryConfig {
            target_dict_bytes: 1 << 20,
            sample_block: 1024,
            estimator_block: 8,
            down_size: 64,
            traversal: Traversal::Seq,
            seed: 0x9E37_79B9_7F4A_7C15,
        }
    }
}

/// A suffix-array index over a built dictionary, with a 3-gram bounds
/// cache giving the factoriser an `O(1)` starting range for its first
/// two refinement steps.
pub struct DictionaryIndex {
    pub dict: Vec<u8>,
    pub suffix_array: Vec<usize>,
    trigram_bounds: HashMap<[u8; 3], (usize, usize)>,
}

impl DictionaryIndex {
    pub fn build(dict: Vec<u8>) -> Self {
        let suffix_array = sais(&dict);
        let trigram_bounds = build_trigram_bounds(&dict, &suffix_array);
        DictionaryIndex {
            dict,
            suffix_array,
            trigram_bounds,
        }
    }

    /// The `[sp, ep)` suffix-array range of all suffixes starting with
    /// `prefix`, if it has been precomputed.
    pub fn trigram_range(&self, prefix: [u8; 3]) -> Option<(usize, usize)> {
        self.trigram_bounds.get(&prefix).copied()
    }
}

fn build_trigram_bounds(dict: &[u8], sa: &[usize]) -> HashMap<[u8; 3], (usize, usize)> {
    let mut bounds: HashMap<[u8; 3], (usize, usize)> = HashMap::new();
    if dict.len() < 3 {
        return bounds;
    }
    for (rank, &pos) in sa.iter().enumerate() {
        if pos + 3 > dict.len() {
            continue;
        }
        let key = [dict[pos], dict[pos + 1], dict[pos + 2]];
        bounds
            .entry(key)
            .and_modify(|(_, ep)| *ep = rank + 1)
            .or_insert((rank, rank + 1));
    }
    bounds
}

/// 64-bit Merkle-Damgard-style mixer, seeded, used for window hashing.
fn mix(mut x: u64, seed: u64) -> u64 {
    x ^= seed;
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
    x ^= x >> 33;
    x = x.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    x ^= x >> 33;
    x
}

fn hash_window(window: &[u8], seed: u64) -> u64 {
    let mut acc = window.len() as u64;
    for chunk in window.chunks(8) {
        let mut buf = [0u8; 8];
        buf[..chunk.len()].copy_from_slice(chunk);
        acc = mix(acc ^ u64::from_le_bytes(buf), seed);
    }
    acc
}

/// Geometric-skip reservoir sampling of `estimator_block`-byte window
/// hashes: advance by a geometrically distributed skip derived from the
/// position's own hash, targeting roughly `input.len() / down_size`
/// samples.
fn sample_window_hashes(input: &[u8], cfg: &DictionaryConfig) -> Vec<u64> {
    let mut hashes = Vec::new();
    if input.len() < cfg.estimator_block {
        return hashes;
    }
    let target = (input.len() / cfg.down_size).max(1);
    let mean_skip = (input.len() / target).max(1) as u64;

    let mut pos = 0usize;
    let mut counter = 0u64;
    while pos + cfg.estimator_block <= input.len() {
        hashes.push(hash_window(&input[pos..pos + cfg.estimator_block], cfg.seed));
        // Geometric skip: scale the mean skip by a hashed fraction in (0, 2).
        let r = mix(counter, cfg.seed.wrapping_add(1));
        counter += 1;
        let frac = (r % 2048) as u64;
        let skip = ((mean_skip * frac) / 1024).max(1);
        pos += skip as usize;
    }
    hashes
}

/// Exact frequency counts of the sampled hashes, built as a plain hash
/// map (the "load-factor-0.1 map" of a C++ original becomes a `HashMap`
/// with generous reserved capacity here).
fn count_sampled_hashes(hashes: &[u64]) -> HashMap<u64, u64> {
    let mut counts = HashMap::with_capacity(hashes.len() * 10);
    for &h in hashes {
        *counts.entry(h).or_insert(0) += 1;
    }
    counts
}

fn epoch_order(num_epochs: usize, traversal: Traversal, seed: u64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..num_epochs).collect();
    if traversal == Traversal::Rand {
        // Fixed-seed Fisher-Yates shuffle.
        let mut state = seed;
        for i in (1..order.len()).rev() {
            state = mix(state, i as u64);
            let j = (state as usize) % (i + 1);
            order.swap(i, j);
        }
    }
    order
}

/// Build a dictionary from `input` per the "local-coverage-norms"
/// strategy: sample, count, then greedily pick the position in each
/// coarse epoch whose window covers the most not-yet-covered distinct
/// hashes, weighted by `norm` (frequency raised to that power).
pub fn build_dictionary(input: &[u8], cfg: &DictionaryConfig, norm: f64) -> Vec<u8> {
    if input.is_empty() || cfg.target_dict_bytes == 0 {
        return Vec::new();
    }

    let sampled = sample_window_hashes(input, cfg);
    let counts = count_sampled_hashes(&sampled);

    let scale = (input.len() / cfg.target_dict_bytes.max(1)).max(1);
    let epoch_bytes = scale * cfg.sample_block;
    let num_epochs = input.len().div_ceil(epoch_bytes).max(1);

    let mut covered: std::collections::HashSet<u64> = std::collections::HashSet::new();
    let mut picks: Vec<usize> = Vec::new();

    for epoch_idx in epoch_order(num_epochs, cfg.traversal, cfg.seed) {
        let epoch_start = epoch_idx * epoch_bytes;
        if epoch_start >= input.len() {
            continue;
        }
        let epoch_end = (epoch_start + epoch_bytes).min(input.len());

        let mut best_pos = None;
        let mut best_score = -1.0f64;
        let mut best_new_hashes: Vec<u64> = Vec::new();

        let mut pos = epoch_start;
        while pos + cfg.sample_block <= epoch_end {
            let mut new_hashes = Vec::new();
            let mut score = 0.0f64;
            let mut w = pos;
            while w + cfg.estimator_block <= pos + cfg.sample_block {
                let h = hash_window(&input[w..w + cfg.estimator_block], cfg.seed);
                if !covered.contains(&h) {
                    let freq = *counts.get(&h).unwrap_or(&1) as f64;
                    score += freq.powf(norm);
                    new_hashes.push(h);
                }
                w += cfg.estimator_block;
            }
            // Tie-break: strictly greater score wins, so the first (lowest)
            // offset is kept on equal score.
            if score > best_score {
                best_score = score;
                best_pos = Some(pos);
                best_new_hashes = new_hashes;
            }
            pos += cfg.sample_block;
        }

        if let Some(p) = best_pos {
            picks.push(p);
            covered.extend(best_new_hashes);
        }
    }

    picks.sort_unstable();
    let mut dict = Vec::with_capacity(cfg.target_dict_bytes);
    for p in picks {
        if dict.len() >= cfg.target_dict_bytes {
            break;
        }
        let end = (p + cfg.sample_block).min(input.len());
        dict.extend_from_slice(&input[p..end]);
    }
    dict.truncate(cfg.target_dict_bytes.min(dict.len()));
    dict
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_dictionary_respects_budget() {
        let input: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
        let cfg = DictionaryConfig {
            target_dict_bytes: 2048,
            sample_block: 256,
            estimator_block: 8,
            down_size: 32,
            traversal: Traversal::Seq,
            seed: 42,
        };
        let dict = build_dictionary(&input, &cfg, 1.0);
        assert!(dict.len() <= cfg.target_dict_bytes);
        assert!(!dict.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_dictionary() {
        let cfg = DictionaryConfig::default();
        assert!(build_dictionary(&[], &cfg, 1.0).is_empty());
    }

    #[test]
    fn dictionary_index_finds_trigram_range() {
        let idx = DictionaryIndex::build(b"ABCABCX".to_vec());
        let range = idx.trigram_range(*b"ABC");
        assert!(range.is_some());
        let (sp, ep) = range.unwrap();
        assert!(sp < ep);
    }
}
