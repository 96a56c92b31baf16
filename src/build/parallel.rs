//! Parallel block-range build driver shared by [`crate::containers::lz_store`]
//! and [`crate::containers::rlz`]: split the block range across a fixed
//! worker pool, let each worker fill its own private bit buffer and local
//! offset list, then splice the buffers back together in submission order,
//! rebasing each worker's offsets by the stream length accumulated so far.
//! This keeps `block_offsets` globally monotone without requiring the
//! workers to share any mutable state.

use std::ops::Range;

use rayon::prelude::*;

use crate::bitstream::{BitBuffer, BitSink};

/// Split `total` items into up to `num_workers` contiguous, roughly equal
/// ranges (never empty, never more than `total` ranges).
pub fn partition_ranges(total: usize, num_workers: usize) -> Vec<Range<usize>> {
    if total == 0 {
        return Vec::new();
    }
    let num_workers = num_workers.max(1).min(total);
    let base = total / num_workers;
    let remainder = total % num_workers;

    let mut ranges = Vec::with_capacity(num_workers);
    let mut start = 0;
    for worker in 0..num_workers {
        let size = base + if worker < remainder { 1 } else { 0 };
        let end = start + size;
        ranges.push(start..end);
        start = end;
    }
    ranges
}

/// Run `encode_range` over each range in parallel, then splice the results
/// back together in range order, rebasing each worker's local offsets by
/// the bit length already appended.
pub fn build_blocks_parallel<F>(ranges: Vec<Range<usize>>, encode_range: F) -> (BitBuffer, Vec<u64>)
where
    F: Fn(Range<usize>) -> (BitBuffer, Vec<u64>) + Sync,
{
    let worker_results: Vec<(BitBuffer, Vec<u64>)> = ranges
        .into_par_iter()
        .map(|range| encode_range(range))
        .collect();

    let mut sink = BitSink::new();
    let mut all_offsets = Vec::new();
    for (buffer, local_offsets) in worker_results {
        // `append_buffer` itself byte-aligns before writing; align first so
        // the rebase captured here matches where the content actually lands.
        sink.align8();
        let rebase = sink.tell();
        sink.append_buffer(&buffer);
        all_offsets.extend(local_offsets.into_iter().map(|o| o + rebase));
    }
    (sink.into_buffer(), all_offsets)
}

/// Variant of [`build_blocks_parallel`] for drivers that also need a
/// per-block side value (RLZ's factor counts) alongside the rebased
/// offsets. The side values need no rebasing, only concatenation in
/// range order.
pub fn build_blocks_parallel_with_counts<F>(
    ranges: Vec<Range<usize>>,
    encode_range: F,
) -> (BitBuffer, Vec<u64>, Vec<u32>)
where
    F: Fn(Range<usize>) -> (BitBuffer, Vec<u64>, Vec<u32>) + Sync,
{
    let worker_results: Vec<(BitBuffer, Vec<u64>, Vec<u32>)> = ranges
        .into_par_iter()
        .map(|range| encode_range(range))
        .collect();

    let mut sink = BitSink::new();
    let mut all_offsets = Vec::new();
    let mut all_counts = Vec::new();
    for (buffer, local_offsets, local_counts) in worker_results {
        sink.align8();
        let rebase = sink.tell();
        sink.append_buffer(&buffer);
        all_offsets.extend(local_offsets.into_iter().map(|o| o + rebase));
        all_counts.extend(local_counts);
    }
    (sink.into_buffer(), all_offsets, all_counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream::BitSource;

    #[test]
    fn partition_covers_every_item_exactly_once() {
        for (total, workers) in [(10, 3), (1, 4), (0, 4), (100, 7)] {
            let ranges = partition_ranges(total, workers);
            let covered: usize = ranges.iter().map(|r| r.len()).sum();
            assert_eq!(covered, total);
            for w in ranges.windows(2) {
                assert_eq!(w[0].end, w[1].start);
            }
        }
    }

    #[test]
    fn splice_preserves_submission_order_and_rebases_offsets() {
        let ranges = partition_ranges(9, 3);
        let (buffer, offsets) = build_blocks_parallel(ranges.clone(), |range| {
            let mut sink = BitSink::new();
            let mut local_offsets = Vec::new();
            for i in range {
                local_offsets.push(sink.tell());
                sink.put_int(i as u64, 32);
            }
            (sink.into_buffer(), local_offsets)
        });

        assert_eq!(offsets.len(), 9);
        for w in offsets.windows(2) {
            assert!(w[1] > w[0]);
        }

        let mut source = BitSource::from_buffer(&buffer);
        for (i, &offset) in offsets.iter().enumerate() {
            source.seek(offset).unwrap();
            assert_eq!(source.get_int(32).unwrap(), i as u64);
        }
    }
}
