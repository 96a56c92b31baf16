//! RLZ factorisation: rewrite a byte block as a sequence of dictionary
//! copies and literals via suffix-array range refinement.

use super::dictionary::DictionaryIndex;

/// A single factor in an RLZ-factorised block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Factor {
    Copy { dict_offset: usize, length: usize },
    Literal { byte: u8 },
}

/// Character at `sa[idx] + offset` in `dict`, or `None` past the end of
/// the dictionary (treated as lexicographically smallest in comparisons
/// below, so short suffixes sort first, matching standard suffix-array
/// ordering).
fn char_at(dict: &[u8], sa: &[usize], idx: usize, offset: usize) -> Option<u8> {
    dict.get(sa[idx] + offset).copied()
}

/// Smallest `i` in `[sp, ep]` with `char_at(i, offset) >= target`
/// (`ep` if none qualify).
fn first_ge(dict: &[u8], sa: &[usize], sp: usize, ep: usize, offset: usize, target: u8) -> usize {
    let mut lo = sp;
    let mut hi = ep;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let qualifies = matches!(char_at(dict, sa, mid, offset), Some(c) if c >= target);
        if qualifies {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

/// Smallest `i` in `[sp, ep]` with `char_at(i, offset) > target`.
fn first_gt(dict: &[u8], sa: &[usize], sp: usize, ep: usize, offset: usize, target: u8) -> usize {
    let mut lo = sp;
    let mut hi = ep;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let qualifies = matches!(char_at(dict, sa, mid, offset), Some(c) if c > target);
        if qualifies {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

/// Factorise `block` against `dict_index`. Matches of length
/// `<= literal_threshold` are emitted as literals instead of copies, to
/// avoid spending an offset on a match too short to pay for it.
pub fn factorize_block(
    dict_index: &DictionaryIndex,
    block: &[u8],
    literal_threshold: usize,
) -> Vec<Factor> {
    let dict = &dict_index.dict;
    let sa = &dict_index.suffix_array;
    let mut factors = Vec::new();
    let mut cursor = 0usize;

    while cursor < block.len() {
        let (mut sp, mut ep, mut matched_len) = block[cursor..]
            .get(..3)
            .and_then(|p| dict_index.trigram_range([p[0], p[1], p[2]]))
            .map_or((0usize, sa.len(), 0usize), |(s, e)| (s, e, 3usize));

        loop {
            if cursor + matched_len >= block.len() {
                break;
            }
            let target = block[cursor + matched_len];
            if ep - sp > 1 {
                let new_sp = first_ge(dict, sa, sp, ep, matched_len, target);
                let new_ep = first_gt(dict, sa, sp, ep, matched_len, target);
                if new_sp >= new_ep {
                    break;
                }
                sp = new_sp;
                ep = new_ep;
                matched_len += 1;
            } else {
                let pos = sa[sp] + matched_len;
                if pos < dict.len() && dict[pos] == target {
                    matched_len += 1;
                } else {
                    break;
                }
            }
        }

        if matched_len == 0 {
            factors.push(Factor::Literal {
                byte: block[cursor],
            });
            cursor += 1;
        } else if matched_len > literal_threshold {
            factors.push(Factor::Copy {
                dict_offset: sa[sp],
                length: matched_len,
            });
            cursor += matched_len;
        } else {
            for &b in &block[cursor..cursor + matched_len] {
                factors.push(Factor::Literal { byte: b });
            }
            cursor += matched_len;
        }
    }

    factors
}

/// Replay `factors` against `dict` to reconstruct the original block.
pub fn replay_factors(dict: &[u8], factors: &[Factor]) -> Vec<u8> {
    let mut out = Vec::new();
    for f in factors {
        match *f {
            Factor::Copy {
                dict_offset,
                length,
            } => out.extend_from_slice(&dict[dict_offset..dict_offset + length]),
            Factor::Literal { byte } => out.push(byte),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_break_example_from_the_catalogue() {
        let dict_index = DictionaryIndex::build(b"ABCABCX".to_vec());
        let block = b"ABCX";
        let factors = factorize_block(&dict_index, block, 3);
        assert_eq!(
            factors,
            vec![Factor::Copy {
                dict_offset: 3,
                length: 4
            }]
        );
        assert_eq!(replay_factors(&dict_index.dict, &factors), block);
    }

    #[test]
    fn unknown_first_byte_is_a_single_literal() {
        let dict_index = DictionaryIndex::build(b"ABCABC".to_vec());
        let block = b"ZAB";
        let factors = factorize_block(&dict_index, block, 3);
        assert_eq!(factors[0], Factor::Literal { byte: b'Z' });
        assert_eq!(replay_factors(&dict_index.dict, &factors), block);
    }

    #[test]
    fn short_match_under_threshold_is_literals() {
        let dict_index = DictionaryIndex::build(b"XYZQRSTUV".to_vec());
        let block = b"QR!";
        let factors = factorize_block(&dict_index, block, 3);
        // "QR" matches length 2, at or under the threshold of 3, so it's
        // emitted as literals rather than a copy.
        assert!(factors
            .iter()
            .take(2)
            .all(|f| matches!(f, Factor::Literal { .. })));
        assert_eq!(replay_factors(&dict_index.dict, &factors), block);
    }

    #[test]
    fn roundtrips_on_random_blocks_against_a_shared_dictionary() {
        let dict_index = DictionaryIndex::build(
            b"the quick brown fox jumps over the lazy dog repeatedly".to_vec(),
        );
        for block in [
            &b"the quick brown fox"[..],
            &b"jumps over the lazy dog"[..],
            &b"completely unseen text here"[..],
        ] {
            let factors = factorize_block(&dict_index, block, 3);
            assert_eq!(replay_factors(&dict_index.dict, &factors), block);
        }
    }

    use proptest::prelude::*;

    proptest! {
        /// Property: for any dictionary and any block, replaying the
        /// factorisation always reconstructs the original block exactly,
        /// regardless of `literal_threshold`.
        #[test]
        fn prop_factorize_and_replay_roundtrips(
            dict in prop::collection::vec(any::<u8>(), 1..200),
            block in prop::collection::vec(any::<u8>(), 1..200),
            literal_threshold in 0usize..8,
        ) {
            let dict_index = DictionaryIndex::build(dict);
            let factors = factorize_block(&dict_index, &block, literal_threshold);
            let replayed = replay_factors(&dict_index.dict, &factors);
            prop_assert_eq!(replayed, block);
        }
    }
}
