//! Shared value transforms applied before an integer codec sees a list:
//! delta-gapping for strictly increasing doc IDs, and prefix-summing for
//! frequency arrays the codec wants to see as a monotone universe.

/// In-place d-gap: `dst[0] = src[0] - 1` and `dst[i] = src[i] - src[i-1]`
/// for `i > 0`, assuming `src` is strictly increasing and 1-based (doc
/// IDs start at 1). Matches [`undo_dgap`].
pub fn dgap(src: &[u32], dst: &mut [u32]) {
    let mut prev = 0u32;
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = s - prev;
        prev = s;
    }
}

/// Inverse of [`dgap`]: reconstructs strictly increasing values via
/// prefix sum, starting from 0.
pub fn undo_dgap(gaps: &mut [u32]) {
    let mut running = 0u32;
    for g in gaps.iter_mut() {
        running += *g;
        *g = running;
    }
}

/// In-place prefix sum, used to turn a frequency array into a monotone
/// array the same codecs can compress (e.g. for `ef`/`interp`).
pub fn prefix_sum(src: &[u32], dst: &mut [u32]) {
    let mut running = 0u64;
    for (d, &s) in dst.iter_mut().zip(src) {
        running += s as u64;
        *d = running as u32;
    }
}

/// Inverse of [`prefix_sum`]: first differences, in place.
pub fn undo_prefix_sum(sums: &mut [u32]) {
    let mut prev = 0u32;
    for s in sums.iter_mut() {
        let cur = *s;
        *s = cur - prev;
        prev = cur;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dgap_roundtrip() {
        let docs = vec![1u32, 3, 4, 10, 11];
        let mut gaps = vec![0u32; docs.len()];
        dgap(&docs, &mut gaps);
        assert_eq!(gaps, vec![1, 2, 1, 6, 1]);
        undo_dgap(&mut gaps);
        assert_eq!(gaps, docs);
    }

    #[test]
    fn prefix_sum_roundtrip() {
        let freqs = vec![2u32, 1, 5, 3];
        let mut sums = vec![0u32; freqs.len()];
        prefix_sum(&freqs, &mut sums);
        assert_eq!(sums, vec![2, 3, 8, 11]);
        undo_prefix_sum(&mut sums);
        assert_eq!(sums, freqs);
    }

    use proptest::prelude::*;

    /// Strategy for a strictly increasing, 1-based sequence of doc IDs.
    fn strictly_increasing_docs() -> impl Strategy<Value = Vec<u32>> {
        prop::collection::vec(1u32..500, 0..50).prop_map(|mut gaps| {
            let mut docs = Vec::with_capacity(gaps.len());
            let mut running = 0u32;
            for g in gaps.drain(..) {
                running += g;
                docs.push(running);
            }
            docs
        })
    }

    proptest! {
        #[test]
        fn prop_dgap_roundtrips_any_strictly_increasing_sequence(docs in strictly_increasing_docs()) {
            let mut gaps = vec![0u32; docs.len()];
            dgap(&docs, &mut gaps);
            undo_dgap(&mut gaps);
            prop_assert_eq!(gaps, docs);
        }

        #[test]
        fn prop_prefix_sum_roundtrips_any_freq_array(freqs in prop::collection::vec(1u32..1000, 0..50)) {
            let mut sums = vec![0u32; freqs.len()];
            prefix_sum(&freqs, &mut sums);
            undo_prefix_sum(&mut sums);
            prop_assert_eq!(sums, freqs);
        }
    }
}
