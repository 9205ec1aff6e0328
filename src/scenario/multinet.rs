//! Traffic produced by Multinet-style emulated switches: every PACKET_IN
//! carrying an ARP frame is answered by a FLOW_MOD matching exactly the
//! frame's destination and source MAC addresses.

use crate::wire::bytes::{read_u16_be, read_u8, round_up_pow2, slice_at};
use crate::wire::ofp::*;
use crate::wire::OfpMessage;

use super::{CorrelationKey, Endpoint, TrafficScenario};

const MAC_PAIR_LEN: usize = 2 * ETH_MAC_LEN;

#[derive(Debug, Clone, Copy, Default)]
pub struct Multinet;

impl Multinet {
    /// `dst_mac || src_mac` of the frame embedded in a PACKET_IN, if it is ARP.
    fn packet_in_seed(bytes: &[u8]) -> Option<&[u8]> {
        let match_len = read_u16_be(bytes, PKTIN_MATCH_OFFSET + MATCH_LENGTH_OFFSET)? as usize;
        let padded = round_up_pow2(match_len, MATCH_ALIGN_EXP);
        let data = PKTIN_MATCH_OFFSET + padded + PKTIN_PAD_BYTES;

        let eth = slice_at(bytes, data, ETH_HEADER_LEN)?;
        if read_u16_be(eth, ETH_TYPE_OFFSET)? != ETHERTYPE_ARP {
            return None;
        }
        slice_at(eth, ETH_DST_OFFSET, MAC_PAIR_LEN)
    }

    /// Reads one unmasked OpenFlow-basic OXM TLV at `offset`, returning
    /// `(field, value, next_offset)`.
    fn read_oxm(bytes: &[u8], offset: usize) -> Option<(u8, &[u8], usize)> {
        if read_u16_be(bytes, offset)? != OFPXMC_OPENFLOW_BASIC {
            return None;
        }
        let field = read_u8(bytes, offset + OXM_FIELD_OFFSET)?;
        let len = read_u8(bytes, offset + OXM_LENGTH_OFFSET)? as usize;
        let value = slice_at(bytes, offset + OXM_VALUE_OFFSET, len)?;
        Some((field, value, offset + OXM_VALUE_OFFSET + len))
    }

    /// The ETH_DST/ETH_SRC pair leading a FLOW_MOD match, as `dst || src`.
    fn flow_mod_seed(bytes: &[u8]) -> Option<[u8; MAC_PAIR_LEN]> {
        let (field0, value0, next) = Self::read_oxm(bytes, FLOWMOD_OXM0_OFFSET)?;
        let (field1, value1, _) = Self::read_oxm(bytes, next)?;
        if value0.len() != ETH_MAC_LEN || value1.len() != ETH_MAC_LEN {
            return None;
        }

        let (dst, src) = match (field0, field1) {
            (OXM_ETH_DST, OXM_ETH_SRC) => (value0, value1),
            (OXM_ETH_SRC, OXM_ETH_DST) => (value1, value0),
            _ => return None,
        };

        let mut seed = [0u8; MAC_PAIR_LEN];
        seed[..ETH_MAC_LEN].copy_from_slice(dst);
        seed[ETH_MAC_LEN..].copy_from_slice(src);
        Some(seed)
    }
}

impl TrafficScenario for Multinet {
    fn name(&self) -> &'static str {
        "multinet"
    }

    fn request_type(&self) -> u8 {
        OFPT_PACKET_IN
    }

    fn response_type(&self) -> u8 {
        OFPT_FLOW_MOD
    }

    fn request_key(&self, msg: &OfpMessage<'_>, endpoint: &Endpoint) -> Option<CorrelationKey> {
        let seed = Self::packet_in_seed(msg.bytes)?;
        Some(CorrelationKey::from_seed(seed, endpoint))
    }

    fn response_key(&self, msg: &OfpMessage<'_>, endpoint: &Endpoint) -> Option<CorrelationKey> {
        let seed = Self::flow_mod_seed(msg.bytes)?;
        Some(CorrelationKey::from_seed(&seed, endpoint))
    }
}
