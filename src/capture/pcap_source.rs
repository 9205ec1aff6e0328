use std::path::Path;
use std::time::Instant;

use pcap::{Activated, Active, Capture, Inactive, Offline, Precision};
use tracing::{info, trace};

use super::decode::{decode_segment, LinkKind};
use super::{Captured, SegmentSource};
use crate::error::Result;

/// Read timeout of a live capture. Reads that time out are skipped.
const READ_TIMEOUT_MS: i32 = 1_000;

/// `tcp and port <ofport>`: only control-channel traffic reaches the walker.
pub fn bpf_filter(ofport: u16) -> String {
    format!("tcp and port {ofport}")
}

/// Handle settings of a live capture.
///
/// Live segments are stamped when libpcap hands them over, so delivery must
/// not be batched: immediate mode is always on and the read timeout only
/// bounds how long a read blocks on an idle link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveSettings {
    pub snaplen: i32,
    pub promisc: bool,
    pub immediate: bool,
    pub timeout_ms: i32,
}

impl LiveSettings {
    pub fn new(snaplen: i32) -> Self {
        Self {
            snaplen,
            promisc: false,
            immediate: true,
            timeout_ms: READ_TIMEOUT_MS,
        }
    }

    fn apply(self, cap: Capture<Inactive>) -> Capture<Inactive> {
        cap.promisc(self.promisc)
            .immediate_mode(self.immediate)
            .snaplen(self.snaplen)
            .timeout(self.timeout_ms)
    }
}

/// Where segment timestamps come from.
enum Clock {
    /// Delivery time on a monotonic clock, relative to capture start.
    Monotonic(Instant),
    /// Timestamps recorded in the capture file (nanosecond precision).
    Recorded,
}

/// A libpcap handle, live or replaying a file, with the control-port
/// filter applied.
pub struct PcapSource<T: Activated + ?Sized> {
    cap: Capture<T>,
    link: LinkKind,
    clock: Clock,
}

impl PcapSource<Active> {
    pub fn live(device: &str, ofport: u16, snaplen: i32) -> Result<Self> {
        let settings = LiveSettings::new(snaplen);
        let mut cap = settings.apply(Capture::from_device(device)?).open()?;
        cap.filter(&bpf_filter(ofport), true)?;
        let link = LinkKind::from_linktype(cap.get_datalink())?;
        info!(device, ?link, ?settings, "live capture opened");

        Ok(Self {
            cap,
            link,
            clock: Clock::Monotonic(Instant::now()),
        })
    }
}

impl PcapSource<Offline> {
    pub fn offline(path: &Path, ofport: u16) -> Result<Self> {
        let mut cap = Capture::from_file_with_precision(path, Precision::Nano)?;
        cap.filter(&bpf_filter(ofport), true)?;
        let link = LinkKind::from_linktype(cap.get_datalink())?;
        info!(path = %path.display(), ?link, "replaying capture file");

        Ok(Self {
            cap,
            link,
            clock: Clock::Recorded,
        })
    }
}

impl<T: Activated + ?Sized> SegmentSource for PcapSource<T> {
    fn next_segment(&mut self) -> Result<Captured<'_>> {
        let packet = match self.cap.next_packet() {
            Ok(packet) => packet,
            Err(pcap::Error::TimeoutExpired) => return Ok(Captured::Skipped),
            Err(pcap::Error::NoMorePackets) => return Ok(Captured::Exhausted),
            Err(e) => return Err(e.into()),
        };

        let timestamp_ns = match self.clock {
            Clock::Monotonic(started) => started.elapsed().as_nanos() as i64,
            // With nanosecond precision `tv_usec` carries nanoseconds.
            Clock::Recorded => packet.header.ts.tv_sec as i64 * 1_000_000_000 + packet.header.ts.tv_usec as i64,
        };

        match decode_segment(packet.data, self.link, timestamp_ns) {
            Some(segment) => Ok(Captured::Segment(segment)),
            None => {
                trace!(caplen = packet.header.caplen, "frame is not a TCP segment");
                Ok(Captured::Skipped)
            }
        }
    }
}
