use tracing::{debug, trace};

use crate::capture::Segment;
use crate::correlation::{CheckIn, CheckOut, CorrelationTable};
use crate::error::Result;
use crate::metrics::{HistogramConfig, LatencyStats, Progress, Report};
use crate::scenario::TrafficScenario;
use crate::wire::{MessageWalker, OfpMessage};

/// One measurement run: the active scenario, the table of outstanding
/// requests and the statistics.
///
/// Constructed once in `main` and mutated only by the capture loop; the
/// shutdown path takes it over for the final report.
pub struct Session {
    scenario: Box<dyn TrafficScenario>,
    table: CorrelationTable,
    stats: LatencyStats,
    finalized: bool,
}

impl Session {
    pub fn new(
        scenario: Box<dyn TrafficScenario>,
        late_threshold_ns: i64,
        histogram: &HistogramConfig,
    ) -> Result<Self> {
        Ok(Self {
            scenario,
            table: CorrelationTable::new(late_threshold_ns),
            stats: LatencyStats::new(histogram)?,
            finalized: false,
        })
    }

    pub fn scenario_name(&self) -> &'static str {
        self.scenario.name()
    }

    pub fn stats(&self) -> &LatencyStats {
        &self.stats
    }

    /// Walks one TCP payload and feeds every message to the scenario.
    ///
    /// Only a negative latency is an error; malformed input just ends the
    /// walk of this segment.
    pub fn process_segment(&mut self, segment: &Segment<'_>) -> Result<()> {
        let mut walker = MessageWalker::new(segment.payload);
        for msg in walker.by_ref() {
            self.process_message(&msg, segment)?;
        }

        let stop = walker.stop_reason();
        if let Some(reason) = stop {
            debug!(src = %segment.src, dst = %segment.dst, ?reason, "abandoning rest of segment");
        }
        self.stats.record_segment(stop.is_some());
        Ok(())
    }

    fn process_message(&mut self, msg: &OfpMessage<'_>, segment: &Segment<'_>) -> Result<()> {
        self.stats.record_message();
        let now_ns = segment.timestamp_ns;

        if msg.msg_type == self.scenario.request_type() {
            // The switch sends the request.
            let key = self.scenario.request_key(msg, &segment.src);
            self.stats.record_request(key.is_some());
            if let Some(key) = key {
                trace!(%key, xid = msg.xid(), "C <-");
                let outcome = self.table.check_in(key, now_ns);
                if outcome == CheckIn::Superseded {
                    debug!(src = %segment.src, "request superseded before it was answered");
                }
                self.stats.record_check_in(outcome);
            }
        } else if msg.msg_type == self.scenario.response_type() {
            // The switch receives the response.
            let key = self.scenario.response_key(msg, &segment.dst);
            self.stats.record_response(key.is_some());
            if let Some(key) = key {
                trace!(%key, xid = msg.xid(), "C ->");
                let outcome = self.table.check_out(&key, now_ns)?;
                match outcome {
                    CheckOut::Matched { latency_ns, late } => trace!(latency_ns, late, "matched"),
                    CheckOut::Orphan => debug!(%key, "orphan response"),
                }
                self.stats.record_check_out(outcome);
            }
        }
        Ok(())
    }

    /// Counts every still-unanswered request as lost. Only the first call
    /// has an effect.
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }
        self.finalized = true;
        let unanswered = self.table.finalize();
        debug!(unanswered, "finalized correlation table");
        self.stats.record_unanswered(unanswered);
    }

    pub fn report(&self) -> Report {
        self.stats.report(self.scenario.name())
    }

    pub fn progress(&self) -> Progress {
        Progress {
            counters: self.stats.counters().clone(),
            samples: self.stats.histogram().len(),
            pending: self.table.pending(),
        }
    }
}
