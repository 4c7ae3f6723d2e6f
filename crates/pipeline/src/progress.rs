//! Incremental progress accounting.

/// Tracks count, cumulative time, and cumulative output size for a run.
///
/// Pure bookkeeping: `record` folds one completed item in, the derived
/// reads are functions of current state with no side effects.
#[derive(Debug, Clone)]
pub struct ProgressAccumulator {
    processed: usize,
    total: usize,
    cumulative_elapsed_ms: f64,
    cumulative_bytes: u64,
}

impl ProgressAccumulator {
    /// Create an accumulator for a run over `total` items.
    pub fn new(total: usize) -> Self {
        Self {
            processed: 0,
            total,
            cumulative_elapsed_ms: 0.0,
            cumulative_bytes: 0,
        }
    }

    /// Fold one completed item in.
    pub fn record(&mut self, elapsed_ms: f64, bytes: u64) {
        self.processed += 1;
        self.cumulative_elapsed_ms += elapsed_ms;
        self.cumulative_bytes += bytes;
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn cumulative_bytes(&self) -> u64 {
        self.cumulative_bytes
    }

    pub fn cumulative_elapsed_ms(&self) -> f64 {
        self.cumulative_elapsed_ms
    }

    /// Running average time per item, 0 before anything completes.
    pub fn average_ms(&self) -> f64 {
        if self.processed == 0 {
            0.0
        } else {
            self.cumulative_elapsed_ms / self.processed as f64
        }
    }

    /// Estimated time remaining, proportional to the remaining count.
    /// Saturates at zero if more items were recorded than announced.
    pub fn estimated_remaining_ms(&self) -> f64 {
        self.average_ms() * self.total.saturating_sub(self.processed) as f64
    }

    /// Completion percentage. An empty run is vacuously complete.
    pub fn percent_complete(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.processed as f64 / self.total as f64 * 100.0
        }
    }

    /// Build an immutable snapshot for observers.
    pub fn snapshot(&self, finished: bool, archive_bytes: Option<u64>) -> ProgressSnapshot {
        ProgressSnapshot {
            processed: self.processed,
            total: self.total,
            cumulative_elapsed_ms: self.cumulative_elapsed_ms,
            cumulative_bytes: self.cumulative_bytes,
            average_ms: self.average_ms(),
            estimated_remaining_ms: self.estimated_remaining_ms(),
            percent_complete: self.percent_complete(),
            finished,
            archive_bytes,
        }
    }
}

/// Point-in-time read-only view of pipeline completion state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    /// Items completed so far.
    pub processed: usize,

    /// Items in the catalog.
    pub total: usize,

    /// Total time spent across completed items (ms).
    pub cumulative_elapsed_ms: f64,

    /// Total encoded PNG bytes across completed items.
    pub cumulative_bytes: u64,

    /// Running average time per item (ms).
    pub average_ms: f64,

    /// Estimated time remaining (ms).
    pub estimated_remaining_ms: f64,

    /// Completion percentage [0.0, 100.0].
    pub percent_complete: f64,

    /// True once every item is processed and the archive is finalized.
    pub finished: bool,

    /// Encoded archive size, present once finalized.
    pub archive_bytes: Option<u64>,
}

impl ProgressSnapshot {
    /// Percent complete with the 2-decimal precision the progress surface
    /// reports.
    pub fn percent_display(&self) -> String {
        format!("{:.2}", self.percent_complete)
    }

    /// Estimated time remaining in seconds.
    pub fn estimated_remaining_secs(&self) -> f64 {
        self.estimated_remaining_ms / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_and_remaining_fixed_timings() {
        let mut acc = ProgressAccumulator::new(3);
        acc.record(100.0, 10);
        acc.record(200.0, 20);

        // After entry 2 of [100, 200, 300]: average 150, one item left.
        assert!((acc.average_ms() - 150.0).abs() < 1e-9);
        assert!((acc.estimated_remaining_ms() - 150.0).abs() < 1e-9);

        acc.record(300.0, 30);
        assert!((acc.average_ms() - 200.0).abs() < 1e-9);
        assert_eq!(acc.estimated_remaining_ms(), 0.0);
        assert_eq!(acc.cumulative_bytes(), 60);
    }

    #[test]
    fn test_remaining_proportional_to_outstanding_count() {
        let mut acc = ProgressAccumulator::new(10);
        for _ in 0..4 {
            acc.record(50.0, 1);
        }
        assert!((acc.estimated_remaining_ms() - 50.0 * 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_monotonic_and_exact_at_completion() {
        let mut acc = ProgressAccumulator::new(3);
        let mut last = acc.percent_complete();
        for _ in 0..3 {
            acc.record(1.0, 1);
            let now = acc.percent_complete();
            assert!(now >= last);
            last = now;
        }
        assert_eq!(acc.percent_complete(), 100.0);
        assert_eq!(acc.snapshot(true, None).percent_display(), "100.00");
    }

    #[test]
    fn test_empty_accumulator_reads() {
        let acc = ProgressAccumulator::new(0);
        assert_eq!(acc.average_ms(), 0.0);
        assert_eq!(acc.estimated_remaining_ms(), 0.0);
        assert_eq!(acc.percent_complete(), 100.0);
    }

    #[test]
    fn test_remaining_saturates_when_recorded_past_total() {
        let mut acc = ProgressAccumulator::new(1);
        acc.record(10.0, 1);
        acc.record(10.0, 1);
        assert_eq!(acc.estimated_remaining_ms(), 0.0);
    }

    #[test]
    fn test_zero_processed_nonempty_total() {
        let acc = ProgressAccumulator::new(5);
        assert_eq!(acc.average_ms(), 0.0);
        assert_eq!(acc.estimated_remaining_ms(), 0.0);
        assert_eq!(acc.percent_complete(), 0.0);
        assert_eq!(acc.snapshot(false, None).percent_display(), "0.00");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn percent_monotonic_over_any_timings(
                items in prop::collection::vec((0.1f64..10_000.0, 0u64..1_000_000), 1..64)
            ) {
                let mut acc = ProgressAccumulator::new(items.len());
                let mut last = acc.percent_complete();
                for (ms, bytes) in items {
                    acc.record(ms, bytes);
                    let now = acc.percent_complete();
                    prop_assert!(now >= last);
                    prop_assert!(now <= 100.0 + 1e-9);
                    last = now;
                }
                prop_assert!((acc.percent_complete() - 100.0).abs() < 1e-9);
                prop_assert!(acc.estimated_remaining_ms().abs() < 1e-9);
            }

            #[test]
            fn remaining_proportional_for_fixed_timing(
                (total, done) in (1usize..64).prop_flat_map(|t| (Just(t), 0..=t)),
                ms in 0.1f64..5_000.0
            ) {
                let mut acc = ProgressAccumulator::new(total);
                for _ in 0..done {
                    acc.record(ms, 1);
                }
                let expected = if done == 0 {
                    0.0
                } else {
                    ms * (total - done) as f64
                };
                prop_assert!((acc.estimated_remaining_ms() - expected).abs() < 1e-6);
            }
        }
    }
}
