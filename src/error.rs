use thiserror::Error;

use crate::scenario::CorrelationKey;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A response was observed before its request. Either the clock went
    /// backwards or the pairing logic is broken; statistics are no longer
    /// trustworthy.
    #[error("negative latency of {latency_ns} ns for key [{key}]")]
    NegativeLatency { key: CorrelationKey, latency_ns: i64 },

    #[error("capture: {0}")]
    Capture(#[from] pcap::Error),

    #[error("unsupported link type {0}")]
    UnsupportedLinkType(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("histogram: {0}")]
    Histogram(#[from] hdrhistogram::CreationError),

    #[error("capture thread: {0}")]
    Join(#[from] tokio::task::JoinError),
}
