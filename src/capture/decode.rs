use std::net::IpAddr;

use etherparse::{LaxNetSlice, LaxSlicedPacket, TransportSlice};
use pcap::Linktype;

use super::Segment;
use crate::error::{Error, Result};
use crate::scenario::Endpoint;

/// Framing of captured packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Ethernet,
    /// Bare IPv4/IPv6 packets, no link header.
    RawIp,
}

impl LinkKind {
    pub fn from_linktype(linktype: Linktype) -> Result<Self> {
        if linktype == Linktype::ETHERNET {
            Ok(Self::Ethernet)
        } else if linktype == Linktype::RAW || linktype == Linktype::IPV4 || linktype == Linktype::IPV6 {
            Ok(Self::RawIp)
        } else {
            let name = linktype.get_name().unwrap_or_else(|_| format!("{}", linktype.0));
            Err(Error::UnsupportedLinkType(name))
        }
    }
}

/// Slices a captured frame down to its TCP payload.
///
/// Parsing is lax: a frame cut short by the snapshot length still yields
/// whatever part of the payload was captured, and the walker drops the
/// incomplete message at the end. Returns `None` for anything that is not
/// TCP over IP.
pub fn decode_segment(data: &[u8], link: LinkKind, timestamp_ns: i64) -> Option<Segment<'_>> {
    let packet = match link {
        LinkKind::Ethernet => LaxSlicedPacket::from_ethernet(data).ok()?,
        LinkKind::RawIp => LaxSlicedPacket::from_ip(data).ok()?,
    };

    let (src_ip, dst_ip) = match packet.net? {
        LaxNetSlice::Ipv4(ip) => {
            let header = ip.header();
            (IpAddr::V4(header.source_addr()), IpAddr::V4(header.destination_addr()))
        }
        LaxNetSlice::Ipv6(ip) => {
            let header = ip.header();
            (IpAddr::V6(header.source_addr()), IpAddr::V6(header.destination_addr()))
        }
        #[allow(unreachable_patterns)]
        _ => return None,
    };

    let Some(TransportSlice::Tcp(tcp)) = packet.transport else {
        return None;
    };

    Some(Segment {
        src: Endpoint::new(src_ip, tcp.source_port()),
        dst: Endpoint::new(dst_ip, tcp.destination_port()),
        payload: tcp.payload(),
        timestamp_ns,
    })
}
