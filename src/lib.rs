//! Passive request/response latency measurement for OpenFlow 1.3 control
//! channels.
//!
//! Captured TCP segments are split into OpenFlow messages, a traffic
//! scenario derives a correlation key from each request and response, and
//! matched pairs feed a latency histogram that is reported at shutdown.

pub mod capture;
pub mod config;
pub mod correlation;
pub mod error;
pub mod metrics;
pub mod scenario;
pub mod session;
pub mod shutdown;
pub mod wire;

#[cfg(test)]
pub(crate) mod test_util;

pub use error::{Error, Result};
pub use session::Session;
