use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing::Level;

use crate::error::{Error, Result};
use crate::metrics::HistogramConfig;
use crate::scenario::ScenarioKind;

/// Largest precision HdrHistogram supports.
const MAX_SIGFIG: u8 = 5;

/// Passive OpenFlow request/response latency measurement.
#[derive(Debug, Clone, Parser, Serialize)]
#[command(name = "latte", version, about)]
pub struct Config {
    /// Device to sniff packets from
    #[arg(long, default_value = "lo")]
    pub device: String,

    /// Replay a pcap file instead of sniffing a device
    #[arg(long, value_name = "PCAP")]
    pub read: Option<PathBuf>,

    /// OpenFlow port number
    #[arg(long, default_value_t = 6653)]
    pub ofport: u16,

    /// Traffic scenario to consider for matching
    #[arg(long = "match", value_enum, default_value_t = ScenarioKind::Multinet)]
    pub scenario: ScenarioKind,

    /// Latency threshold in msec above which a response is counted as late
    #[arg(long, default_value_t = 10_000.0)]
    pub late_threshold: f64,

    /// Lowest discernible latency, in nanoseconds
    #[arg(long, default_value_t = 1)]
    pub hist_low: u64,

    /// Highest trackable latency, in nanoseconds
    #[arg(long, default_value_t = 20_000_000_000)]
    pub hist_high: u64,

    /// Significant decimal digits kept by the histogram
    #[arg(long, default_value_t = 2)]
    pub hist_sigfig: u8,

    /// Bytes captured per frame
    #[arg(long, default_value_t = 1024)]
    pub snaplen: i32,

    /// Print a progress line every N seconds
    #[arg(long, value_name = "SECS")]
    pub report_interval: Option<u64>,

    /// Print the final report as JSON
    #[arg(long)]
    pub json: bool,

    /// Log diagnostics (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Log every extracted key (trace level)
    #[arg(long)]
    pub very_verbose: bool,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.ofport == 0 {
            return Err(Error::Config("ofport must be non-zero".into()));
        }
        if !self.late_threshold.is_finite() || self.late_threshold < 0.0 {
            return Err(Error::Config("late-threshold must be a non-negative number of msec".into()));
        }
        if self.hist_low == 0 {
            return Err(Error::Config("hist-low must be at least 1".into()));
        }
        if self.hist_high < self.hist_low.saturating_mul(2) {
            return Err(Error::Config("hist-high must be at least twice hist-low".into()));
        }
        if self.hist_sigfig > MAX_SIGFIG {
            return Err(Error::Config(format!("hist-sigfig must be between 0 and {MAX_SIGFIG}")));
        }
        if self.snaplen <= 0 {
            return Err(Error::Config("snaplen must be positive".into()));
        }
        if self.report_interval == Some(0) {
            return Err(Error::Config("report-interval must be at least 1 second".into()));
        }
        Ok(())
    }

    pub fn late_threshold_ns(&self) -> i64 {
        (self.late_threshold * 1_000_000.0) as i64
    }

    pub fn histogram(&self) -> HistogramConfig {
        HistogramConfig {
            low: self.hist_low,
            high: self.hist_high,
            sigfig: self.hist_sigfig,
        }
    }

    pub fn log_level(&self) -> Level {
        match (self.verbose, self.very_verbose) {
            (_, true) => Level::TRACE,
            (true, _) => Level::DEBUG,
            (false, false) => Level::WARN,
        }
    }
}
