use std::collections::HashMap;

use tracing::trace;

use crate::error::{Error, Result};
use crate::scenario::CorrelationKey;

/// State of one key in the table.
///
/// Resolved keys are kept so that a second response for the same request
/// is reported as an orphan instead of matching again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Pending(i64),
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckIn {
    Registered,
    /// The key already had an unanswered request, which is now counted as
    /// lost; the new request takes its place.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOut {
    Matched { latency_ns: i64, late: bool },
    Orphan,
}

/// Outstanding requests keyed by their correlation key.
///
/// Owned by the capture loop; there is exactly one writer.
#[derive(Debug)]
pub struct CorrelationTable {
    slots: HashMap<CorrelationKey, Slot>,
    late_threshold_ns: i64,
}

impl CorrelationTable {
    pub fn new(late_threshold_ns: i64) -> Self {
        Self {
            slots: HashMap::new(),
            late_threshold_ns,
        }
    }

    pub fn check_in(&mut self, key: CorrelationKey, now_ns: i64) -> CheckIn {
        match self.slots.insert(key, Slot::Pending(now_ns)) {
            Some(Slot::Pending(_)) => CheckIn::Superseded,
            _ => CheckIn::Registered,
        }
    }

    pub fn check_out(&mut self, key: &CorrelationKey, now_ns: i64) -> Result<CheckOut> {
        let Some(slot) = self.slots.get_mut(key) else {
            return Ok(CheckOut::Orphan);
        };
        let Slot::Pending(requested_at) = *slot else {
            trace!(%key, "response for an already answered request");
            return Ok(CheckOut::Orphan);
        };

        let latency_ns = now_ns - requested_at;
        if latency_ns < 0 {
            return Err(Error::NegativeLatency {
                key: key.clone(),
                latency_ns,
            });
        }

        *slot = Slot::Resolved;
        Ok(CheckOut::Matched {
            latency_ns,
            late: latency_ns > self.late_threshold_ns,
        })
    }

    /// Resolves every request still waiting for a response and returns how
    /// many there were. Called once at shutdown.
    pub fn finalize(&mut self) -> u64 {
        let mut remaining = 0;
        for slot in self.slots.values_mut() {
            if matches!(slot, Slot::Pending(_)) {
                *slot = Slot::Resolved;
                remaining += 1;
            }
        }
        remaining
    }

    /// Requests waiting for a response.
    pub fn pending(&self) -> usize {
        self.slots.values().filter(|s| matches!(s, Slot::Pending(_))).count()
    }

    /// Distinct keys ever seen.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
