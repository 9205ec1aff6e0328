//! Packet sources. Everything below the TCP payload is handled here; the
//! rest of the crate only ever sees [`Segment`]s.

pub mod decode;
pub mod pcap_source;

use parking_lot::Mutex;
use tracing::info;

use crate::error::Result;
use crate::scenario::Endpoint;
use crate::session::Session;

pub use decode::LinkKind;
pub use pcap_source::PcapSource;

/// Application data of one captured TCP segment.
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a> {
    pub src: Endpoint,
    pub dst: Endpoint,
    pub payload: &'a [u8],
    /// Observation time in nanoseconds. Only differences are meaningful.
    pub timestamp_ns: i64,
}

/// Result of one read from a [`SegmentSource`].
#[derive(Debug)]
pub enum Captured<'a> {
    Segment(Segment<'a>),
    /// A read timed out, or the frame was not a decodable TCP segment.
    Skipped,
    /// No more packets will arrive.
    Exhausted,
}

/// Something that hands out TCP segments, one at a time. The returned
/// segment borrows the source's buffer until the next call.
pub trait SegmentSource {
    fn next_segment(&mut self) -> Result<Captured<'_>>;
}

/// The capture loop: pull segments until the source is exhausted or the
/// session reports a fatal error. Blocks the calling thread.
pub fn run(source: &mut dyn SegmentSource, session: &Mutex<Session>) -> Result<()> {
    let mut skipped = 0u64;
    loop {
        match source.next_segment()? {
            Captured::Segment(segment) => session.lock().process_segment(&segment)?,
            Captured::Skipped => skipped += 1,
            Captured::Exhausted => {
                info!(skipped, "packet source exhausted");
                return Ok(());
            }
        }
    }
}
