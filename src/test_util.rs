//! Builders for hand-made OpenFlow messages used across the unit tests.

use std::net::{IpAddr, Ipv4Addr};

use crate::scenario::Endpoint;
use crate::wire::bytes::round_up_pow2;
use crate::wire::ofp::*;
use crate::wire::OfpMessage;

pub const fn mac(last: u8) -> [u8; 6] {
    [0, 0, 0, 0, 0, last]
}

pub fn endpoint(ip: [u8; 4], port: u16) -> Endpoint {
    Endpoint::new(IpAddr::V4(Ipv4Addr::from(ip)), port)
}

pub fn ofp_header(msg_type: u8, length: u16, xid: u32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(length as usize);
    buf.push(OFP_VERSION_1_3);
    buf.push(msg_type);
    buf.extend_from_slice(&length.to_be_bytes());
    buf.extend_from_slice(&xid.to_be_bytes());
    buf
}

/// Views a complete message built by this module.
pub fn as_message(bytes: &[u8]) -> OfpMessage<'_> {
    OfpMessage {
        version: bytes[0],
        msg_type: bytes[1],
        length: u16::from_be_bytes([bytes[2], bytes[3]]),
        bytes,
    }
}

fn set_length(buf: &mut [u8]) {
    let len = buf.len() as u16;
    buf[OFP_LENGTH_OFFSET..OFP_LENGTH_OFFSET + 2].copy_from_slice(&len.to_be_bytes());
}

fn oxm(buf: &mut Vec<u8>, field: u8, value: &[u8]) {
    buf.extend_from_slice(&OFPXMC_OPENFLOW_BASIC.to_be_bytes());
    buf.push(field);
    buf.push(value.len() as u8);
    buf.extend_from_slice(value);
}

/// PACKET_IN whose match holds a single IN_PORT OXM, carrying an Ethernet
/// frame `dst -> src` with the given EtherType.
pub fn packet_in(dst: [u8; 6], src: [u8; 6], ethertype: u16) -> Vec<u8> {
    packet_in_with_match_len(dst, src, ethertype, 12)
}

/// PACKET_IN with an `ofp_match` of `match_len` bytes (at least 4) before
/// padding.
pub fn packet_in_with_match_len(dst: [u8; 6], src: [u8; 6], ethertype: u16, match_len: u16) -> Vec<u8> {
    assert!(match_len >= 4);
    let mut buf = ofp_header(OFPT_PACKET_IN, 0, 0x1234);

    buf.extend_from_slice(&u32::MAX.to_be_bytes()); // buffer_id: OFP_NO_BUFFER
    buf.extend_from_slice(&42u16.to_be_bytes()); // total_len
    buf.push(0); // reason: no match
    buf.push(0); // table_id
    buf.extend_from_slice(&[0; 8]); // cookie
    assert_eq!(buf.len(), PKTIN_MATCH_OFFSET);

    buf.extend_from_slice(&1u16.to_be_bytes()); // OFPMT_OXM
    buf.extend_from_slice(&match_len.to_be_bytes());
    if match_len == 12 {
        oxm(&mut buf, 0x00, &1u32.to_be_bytes());
    } else {
        buf.resize(PKTIN_MATCH_OFFSET + match_len as usize, 0);
    }
    buf.resize(PKTIN_MATCH_OFFSET + round_up_pow2(match_len as usize, MATCH_ALIGN_EXP), 0);
    buf.extend_from_slice(&[0; PKTIN_PAD_BYTES]);

    buf.extend_from_slice(&dst);
    buf.extend_from_slice(&src);
    buf.extend_from_slice(&ethertype.to_be_bytes());
    buf.extend_from_slice(&[0x5a; 28]);

    set_length(&mut buf);
    buf
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowModOrder {
    DstFirst,
    SrcFirst,
}

fn flow_mod_prefix() -> Vec<u8> {
    let mut buf = ofp_header(OFPT_FLOW_MOD, 0, 0x5678);
    buf.extend_from_slice(&[0; 8]); // cookie
    buf.extend_from_slice(&[0; 8]); // cookie_mask
    buf.push(0); // table_id
    buf.push(0); // command: OFPFC_ADD
    buf.extend_from_slice(&0u16.to_be_bytes()); // idle_timeout
    buf.extend_from_slice(&0u16.to_be_bytes()); // hard_timeout
    buf.extend_from_slice(&100u16.to_be_bytes()); // priority
    buf.extend_from_slice(&u32::MAX.to_be_bytes()); // buffer_id
    buf.extend_from_slice(&u32::MAX.to_be_bytes()); // out_port
    buf.extend_from_slice(&u32::MAX.to_be_bytes()); // out_group
    buf.extend_from_slice(&0u16.to_be_bytes()); // flags
    buf.extend_from_slice(&[0; 2]);
    assert_eq!(buf.len(), FLOWMOD_MATCH_OFFSET);
    buf
}

fn finish_match(buf: &mut Vec<u8>) {
    let match_len = buf.len() - FLOWMOD_MATCH_OFFSET;
    buf[FLOWMOD_MATCH_OFFSET + MATCH_LENGTH_OFFSET..FLOWMOD_MATCH_OFFSET + MATCH_LENGTH_OFFSET + 2]
        .copy_from_slice(&(match_len as u16).to_be_bytes());
    buf.resize(FLOWMOD_MATCH_OFFSET + round_up_pow2(match_len, MATCH_ALIGN_EXP), 0);
    set_length(buf);
}

/// FLOW_MOD matching on `eth_dst == dst && eth_src == src`.
pub fn flow_mod(dst: [u8; 6], src: [u8; 6], order: FlowModOrder) -> Vec<u8> {
    let mut buf = flow_mod_prefix();
    buf.extend_from_slice(&1u16.to_be_bytes());
    buf.extend_from_slice(&0u16.to_be_bytes());
    match order {
        FlowModOrder::DstFirst => {
            oxm(&mut buf, OXM_ETH_DST, &dst);
            oxm(&mut buf, OXM_ETH_SRC, &src);
        }
        FlowModOrder::SrcFirst => {
            oxm(&mut buf, OXM_ETH_SRC, &src);
            oxm(&mut buf, OXM_ETH_DST, &dst);
        }
    }
    finish_match(&mut buf);
    buf
}

/// FLOW_MOD with masked MAC matches (hasmask bit set, value || mask).
pub fn flow_mod_masked(dst: [u8; 6], src: [u8; 6]) -> Vec<u8> {
    let mut buf = flow_mod_prefix();
    buf.extend_from_slice(&1u16.to_be_bytes());
    buf.extend_from_slice(&0u16.to_be_bytes());
    oxm(&mut buf, OXM_ETH_DST | 1, &[dst, [0xff; 6]].concat());
    oxm(&mut buf, OXM_ETH_SRC | 1, &[src, [0xff; 6]].concat());
    finish_match(&mut buf);
    buf
}
