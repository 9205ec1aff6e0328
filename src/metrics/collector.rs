use hdrhistogram::Histogram;
use serde::Serialize;

use super::percentiles::{LatencySummary, PercentileRow};
use super::report::Report;
use crate::correlation::{CheckIn, CheckOut};
use crate::error::Result;

// ─── Configuration ───────────────────────────────────────────────

/// HdrHistogram range and precision. Values are nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramConfig {
    pub low: u64,
    pub high: u64,
    pub sigfig: u8,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            low: 1,
            high: 20_000_000_000,
            sigfig: 2,
        }
    }
}

// ─── Counters ────────────────────────────────────────────────────

/// Message and matching counters for one run.
///
/// "registered" means a correlation key could be extracted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub segments_total: u64,
    /// Segments whose walk stopped on a malformed message.
    pub segments_abandoned: u64,
    pub of_messages_total: u64,
    pub requests_total: u64,
    pub requests_registered: u64,
    pub responses_total: u64,
    pub responses_registered: u64,
    pub responses_matched: u64,
    pub lost: u64,
    pub late: u64,
    pub orphan: u64,
}

impl Counters {
    /// Lost requests as a percentage of registered requests.
    pub fn loss_rate_pct(&self) -> f64 {
        pct(self.lost, self.requests_registered)
    }

    /// Late responses as a percentage of matched responses.
    pub fn late_rate_pct(&self) -> f64 {
        pct(self.late, self.responses_matched)
    }
}

fn pct(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

// ─── LatencyStats ────────────────────────────────────────────────

/// Counters plus the latency histogram. Single writer: the capture loop.
pub struct LatencyStats {
    hist: Histogram<u64>,
    counters: Counters,
}

impl LatencyStats {
    pub fn new(config: &HistogramConfig) -> Result<Self> {
        Ok(Self {
            hist: Histogram::<u64>::new_with_bounds(config.low, config.high, config.sigfig)?,
            counters: Counters::default(),
        })
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn histogram(&self) -> &Histogram<u64> {
        &self.hist
    }

    pub fn record_segment(&mut self, abandoned: bool) {
        self.counters.segments_total += 1;
        if abandoned {
            self.counters.segments_abandoned += 1;
        }
    }

    pub fn record_message(&mut self) {
        self.counters.of_messages_total += 1;
    }

    pub fn record_request(&mut self, registered: bool) {
        self.counters.requests_total += 1;
        if registered {
            self.counters.requests_registered += 1;
        }
    }

    pub fn record_response(&mut self, registered: bool) {
        self.counters.responses_total += 1;
        if registered {
            self.counters.responses_registered += 1;
        }
    }

    pub fn record_check_in(&mut self, outcome: CheckIn) {
        if outcome == CheckIn::Superseded {
            self.counters.lost += 1;
        }
    }

    pub fn record_check_out(&mut self, outcome: CheckOut) {
        match outcome {
            CheckOut::Matched { latency_ns, late } => {
                self.counters.responses_matched += 1;
                if late {
                    self.counters.late += 1;
                }
                // Clamp to the histogram's range; late samples are kept.
                let value = (latency_ns.max(0) as u64).max(self.hist.low());
                self.hist.saturating_record(value);
            }
            CheckOut::Orphan => self.counters.orphan += 1,
        }
    }

    /// Requests that never got an answer before shutdown.
    pub fn record_unanswered(&mut self, count: u64) {
        self.counters.lost += count;
    }

    pub fn report(&self, scenario: &str) -> Report {
        Report {
            generated_at: chrono::Local::now().to_rfc3339(),
            scenario: scenario.to_owned(),
            latency: LatencySummary::from_histogram(&self.hist),
            percentiles: PercentileRow::table(&self.hist),
            loss_rate_pct: self.counters.loss_rate_pct(),
            late_rate_pct: self.counters.late_rate_pct(),
            counters: self.counters.clone(),
        }
    }
}
