use hdrhistogram::Histogram;
use serde::Serialize;

/// Percentiles printed in the final report.
pub const REPORT_PERCENTILES: [f64; 8] = [50.0, 75.0, 90.0, 95.0, 99.0, 99.9, 99.99, 100.0];

const NANOS_PER_MS: f64 = 1_000_000.0;

pub fn ns_to_ms(ns: f64) -> f64 {
    ns / NANOS_PER_MS
}

/// One line of the percentile table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileRow {
    /// Requested percentile.
    pub percentile: f64,
    /// Latency at that percentile, in milliseconds.
    pub value_ms: f64,
    /// Share of samples at or below `value_ms`.
    pub cumulative_percentile: f64,
    /// Number of samples at or below `value_ms`.
    pub total_count: u64,
}

impl PercentileRow {
    pub fn from_histogram(hist: &Histogram<u64>, percentile: f64) -> Self {
        let value = hist.value_at_percentile(percentile);
        Self {
            percentile,
            value_ms: ns_to_ms(value as f64),
            cumulative_percentile: hist.percentile_below(value),
            total_count: hist.count_between(0, value),
        }
    }

    pub fn table(hist: &Histogram<u64>) -> Vec<Self> {
        if hist.len() == 0 {
            return Vec::new();
        }
        REPORT_PERCENTILES
            .iter()
            .map(|&p| Self::from_histogram(hist, p))
            .collect()
    }
}

/// Distribution summary in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencySummary {
    pub count: u64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub mean_ms: f64,
    pub stdev_ms: f64,
}

impl LatencySummary {
    /// Returns zeroed values if the histogram is empty.
    pub fn from_histogram(hist: &Histogram<u64>) -> Self {
        if hist.len() == 0 {
            return Self::empty();
        }

        Self {
            count: hist.len(),
            min_ms: ns_to_ms(hist.min() as f64),
            max_ms: ns_to_ms(hist.max() as f64),
            mean_ms: ns_to_ms(hist.mean()),
            stdev_ms: ns_to_ms(hist.stdev()),
        }
    }

    pub fn empty() -> Self {
        Self {
            count: 0,
            min_ms: 0.0,
            max_ms: 0.0,
            mean_ms: 0.0,
            stdev_ms: 0.0,
        }
    }

    pub fn has_data(&self) -> bool {
        self.count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn histogram(samples_ns: &[u64]) -> Histogram<u64> {
        let mut hist = Histogram::<u64>::new_with_bounds(1, 20_000_000_000, 3).unwrap();
        for &s in samples_ns {
            hist.record(s).unwrap();
        }
        hist
    }

    #[test]
    fn test_empty_histogram() {
        let hist = histogram(&[]);
        assert!(PercentileRow::table(&hist).is_empty());
        let summary = LatencySummary::from_histogram(&hist);
        assert!(!summary.has_data());
        assert_eq!(summary, LatencySummary::empty());
    }

    #[test]
    fn test_table_is_cumulative() {
        let samples: Vec<u64> = (1..=100).map(|ms| ms * 1_000_000).collect();
        let hist = histogram(&samples);

        let table = PercentileRow::table(&hist);
        assert_eq!(table.len(), REPORT_PERCENTILES.len());

        let median = &table[0];
        assert_eq!(median.percentile, 50.0);
        assert!((median.value_ms - 50.0).abs() < 0.1, "median {}", median.value_ms);
        assert_eq!(median.total_count, 50);

        let last = table.last().unwrap();
        assert_eq!(last.total_count, 100);
        assert!((last.cumulative_percentile - 100.0).abs() < 1e-9);

        for pair in table.windows(2) {
            assert!(pair[0].value_ms <= pair[1].value_ms);
            assert!(pair[0].total_count <= pair[1].total_count);
        }
    }

    #[test]
    fn test_summary_in_milliseconds() {
        let hist = histogram(&[2_000_000, 4_000_000]);
        let summary = LatencySummary::from_histogram(&hist);
        assert_eq!(summary.count, 2);
        assert!((summary.min_ms - 2.0).abs() < 0.01);
        assert!((summary.max_ms - 4.0).abs() < 0.01);
        assert!((summary.mean_ms - 3.0).abs() < 0.01);
        assert!((summary.stdev_ms - 1.0).abs() < 0.01);
    }
}
