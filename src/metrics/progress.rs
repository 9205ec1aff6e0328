use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::StreamExt;

use super::collector::Counters;
use crate::session::Session;

/// Point-in-time view of a running session.
#[derive(Debug, Clone)]
pub struct Progress {
    pub counters: Counters,
    /// Latency samples recorded so far.
    pub samples: u64,
    /// Requests still waiting for a response.
    pub pending: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.counters;
        write!(
            f,
            "msgs={} req={}/{} resp={}/{} matched={} samples={} pending={} lost={} late={} orphan={}",
            c.of_messages_total,
            c.requests_registered,
            c.requests_total,
            c.responses_registered,
            c.responses_total,
            c.responses_matched,
            self.samples,
            self.pending,
            c.lost,
            c.late,
            c.orphan,
        )
    }
}

/// Prints a progress line every `every` until the task is dropped.
pub async fn run(session: Arc<Mutex<Session>>, every: Duration) {
    let mut ticks = IntervalStream::new(tokio::time::interval(every));
    // The first tick completes immediately.
    ticks.next().await;

    while ticks.next().await.is_some() {
        let progress = session.lock().progress();
        println!("  {progress}");
    }
}
