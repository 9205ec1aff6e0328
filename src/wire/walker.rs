use std::fmt;

use super::bytes::{read_u16_be, read_u32_be};
use super::ofp::{self, OFP_HEADER_LEN, OFP_LENGTH_OFFSET, OFP_VERSION_1_3, OFP_XID_OFFSET};

/// One OpenFlow message borrowed from a captured TCP payload.
///
/// `bytes` spans exactly `length` bytes, header included. The view cannot
/// outlive the segment buffer it was cut from.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct OfpMessage<'a> {
    pub version: u8,
    pub msg_type: u8,
    pub length: u16,
    pub bytes: &'a [u8],
}

impl<'a> OfpMessage<'a> {
    pub fn xid(&self) -> u32 {
        read_u32_be(self.bytes, OFP_XID_OFFSET).unwrap_or_default()
    }

    pub fn type_name(&self) -> &'static str {
        ofp::type_name(self.msg_type)
    }
}

impl fmt::Debug for OfpMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OfpMessage")
            .field("version", &self.version)
            .field("type", &self.type_name())
            .field("length", &self.length)
            .field("xid", &self.xid())
            .finish()
    }
}

/// Why a walk ended before consuming the whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStop {
    /// The declared length runs past the end of the segment.
    Overrun { offset: usize, declared: u16 },
    /// The declared length is shorter than the fixed header.
    ShortLength { offset: usize, declared: u16 },
    UnsupportedVersion { offset: usize, version: u8 },
}

/// Splits one TCP payload into OpenFlow messages.
///
/// Walking stops at the first anomaly and never tries to resynchronise:
/// without a sync marker a guessed offset would mis-type every message
/// after it. Messages that straddle segment boundaries are not reassembled.
pub struct MessageWalker<'a> {
    payload: &'a [u8],
    cursor: usize,
    stop: Option<WalkStop>,
    done: bool,
}

impl<'a> MessageWalker<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self {
            payload,
            cursor: 0,
            stop: None,
            done: false,
        }
    }

    /// Set once iteration hit a malformed message.
    pub fn stop_reason(&self) -> Option<WalkStop> {
        self.stop
    }

    fn halt(&mut self, reason: WalkStop) -> Option<OfpMessage<'a>> {
        self.stop = Some(reason);
        self.done = true;
        None
    }
}

impl<'a> Iterator for MessageWalker<'a> {
    type Item = OfpMessage<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.cursor + OFP_HEADER_LEN > self.payload.len() {
            self.done = true;
            return None;
        }

        let offset = self.cursor;
        let declared = read_u16_be(self.payload, offset + OFP_LENGTH_OFFSET)?;
        let end = offset + declared as usize;

        if end > self.payload.len() {
            return self.halt(WalkStop::Overrun { offset, declared });
        }
        if (declared as usize) < OFP_HEADER_LEN {
            return self.halt(WalkStop::ShortLength { offset, declared });
        }

        let version = self.payload[offset];
        let msg_type = self.payload[offset + 1];
        if version != OFP_VERSION_1_3 {
            return self.halt(WalkStop::UnsupportedVersion { offset, version });
        }

        self.cursor = end;
        Some(OfpMessage {
            version,
            msg_type,
            length: declared,
            bytes: &self.payload[offset..end],
        })
    }
}

impl std::iter::FusedIterator for MessageWalker<'_> {}
