use std::fmt;

use serde::Serialize;

use super::collector::Counters;
use super::percentiles::{LatencySummary, PercentileRow};

/// Final statistics of a run, printed once at shutdown.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: String,
    pub scenario: String,
    pub latency: LatencySummary,
    pub percentiles: Vec<PercentileRow>,
    pub counters: Counters,
    pub loss_rate_pct: f64,
    pub late_rate_pct: f64,
}

impl Report {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.counters;
        let l = &self.latency;

        writeln!(f, "Latency report ({}, scenario {})", self.generated_at, self.scenario)?;
        writeln!(f)?;
        writeln!(f, "Latency histogram (msec)")?;
        writeln!(f, "{:>14} {:>14} {:>12}", "Value", "Percentile", "TotalCount")?;
        for row in &self.percentiles {
            writeln!(
                f,
                "{:>14.3} {:>14.6} {:>12}",
                row.value_ms,
                row.cumulative_percentile / 100.0,
                row.total_count
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Sample count:         {}", l.count)?;
        writeln!(f, "Min latency (msec):   {:.3}", l.min_ms)?;
        writeln!(f, "Max latency (msec):   {:.3}", l.max_ms)?;
        writeln!(f, "Mean latency (msec):  {:.3}", l.mean_ms)?;
        writeln!(f, "StdDev (msec):        {:.3}", l.stdev_ms)?;
        writeln!(f)?;
        writeln!(f, "TCP segments:         {} ({} abandoned)", c.segments_total, c.segments_abandoned)?;
        writeln!(f, "OF messages:          {}", c.of_messages_total)?;
        writeln!(f, "Requests:             {} ({} registered)", c.requests_total, c.requests_registered)?;
        writeln!(
            f,
            "Responses:            {} ({} registered, {} matched)",
            c.responses_total, c.responses_registered, c.responses_matched
        )?;
        writeln!(f, "Lost requests:        {} ({:.1}%)", c.lost, self.loss_rate_pct)?;
        writeln!(f, "Late responses:       {} ({:.1}%)", c.late, self.late_rate_pct)?;
        write!(f, "Orphan responses:     {}", c.orphan)
    }
}
