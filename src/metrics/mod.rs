pub mod collector;
pub mod percentiles;
pub mod progress;
pub mod report;

pub use collector::{Counters, HistogramConfig, LatencyStats};
pub use progress::Progress;
pub use report::Report;
