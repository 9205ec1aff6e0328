//! OpenFlow 1.3 wire constants used by the walker and the scenarios.
//!
//! ```text
//! header:      version:1 | type:1 | length:2 | xid:4
//! PACKET_IN:   header | buffer_id:4 | total_len:2 | reason:1 | table_id:1
//!              | cookie:8 | ofp_match (padded to 8) | pad:2 | data
//! FLOW_MOD:    header | cookie:8 | cookie_mask:8 | table_id:1 | command:1
//!              | idle_timeout:2 | hard_timeout:2 | priority:2 | buffer_id:4
//!              | out_port:4 | out_group:4 | flags:2 | pad:2 | ofp_match ...
//! ofp_match:   type:2 | length:2 | OXM TLVs | zero padding
//! OXM TLV:     class:2 | field:7 + hasmask:1 | length:1 | value
//! ```

/// Wire version byte of OpenFlow 1.3.
pub const OFP_VERSION_1_3: u8 = 4;

pub const OFP_HEADER_LEN: usize = 8;
pub const OFP_LENGTH_OFFSET: usize = 2;
pub const OFP_XID_OFFSET: usize = 4;

pub const OFPT_HELLO: u8 = 0;
pub const OFPT_ERROR: u8 = 1;
pub const OFPT_ECHO_REQUEST: u8 = 2;
pub const OFPT_ECHO_REPLY: u8 = 3;
pub const OFPT_FEATURES_REQUEST: u8 = 5;
pub const OFPT_FEATURES_REPLY: u8 = 6;
pub const OFPT_PACKET_IN: u8 = 10;
pub const OFPT_FLOW_REMOVED: u8 = 11;
pub const OFPT_PORT_STATUS: u8 = 12;
pub const OFPT_PACKET_OUT: u8 = 13;
pub const OFPT_FLOW_MOD: u8 = 14;
pub const OFPT_MULTIPART_REQUEST: u8 = 18;
pub const OFPT_MULTIPART_REPLY: u8 = 19;
pub const OFPT_BARRIER_REQUEST: u8 = 20;
pub const OFPT_BARRIER_REPLY: u8 = 21;

/// Human-readable name of a message type, for logs.
pub fn type_name(msg_type: u8) -> &'static str {
    match msg_type {
        OFPT_HELLO => "HELLO",
        OFPT_ERROR => "ERROR",
        OFPT_ECHO_REQUEST => "ECHO_REQUEST",
        OFPT_ECHO_REPLY => "ECHO_REPLY",
        OFPT_FEATURES_REQUEST => "FEATURES_REQUEST",
        OFPT_FEATURES_REPLY => "FEATURES_REPLY",
        OFPT_PACKET_IN => "PACKET_IN",
        OFPT_FLOW_REMOVED => "FLOW_REMOVED",
        OFPT_PORT_STATUS => "PORT_STATUS",
        OFPT_PACKET_OUT => "PACKET_OUT",
        OFPT_FLOW_MOD => "FLOW_MOD",
        OFPT_MULTIPART_REQUEST => "MULTIPART_REQUEST",
        OFPT_MULTIPART_REPLY => "MULTIPART_REPLY",
        OFPT_BARRIER_REQUEST => "BARRIER_REQUEST",
        OFPT_BARRIER_REPLY => "BARRIER_REPLY",
        _ => "OTHER",
    }
}

// ── PACKET_IN ───────────────────────────────────────────────────

/// Start of `ofp_match` within a PACKET_IN.
pub const PKTIN_MATCH_OFFSET: usize = 24;
/// Padding between the (8-aligned) match and the frame data.
pub const PKTIN_PAD_BYTES: usize = 2;

pub const MATCH_LENGTH_OFFSET: usize = 2;
/// `ofp_match` is padded to a multiple of `2^MATCH_ALIGN_EXP` bytes.
pub const MATCH_ALIGN_EXP: u32 = 3;

// ── FLOW_MOD ────────────────────────────────────────────────────

pub const FLOWMOD_MATCH_OFFSET: usize = 48;
/// First OXM TLV of the FLOW_MOD match (match offset + type + length).
pub const FLOWMOD_OXM0_OFFSET: usize = FLOWMOD_MATCH_OFFSET + 4;

pub const OXM_FIELD_OFFSET: usize = 2;
pub const OXM_LENGTH_OFFSET: usize = 3;
pub const OXM_VALUE_OFFSET: usize = 4;

pub const OFPXMC_OPENFLOW_BASIC: u16 = 0x8000;
/// Field byte as it appears on the wire: `field << 1 | hasmask`.
pub const OXM_ETH_DST: u8 = 0x06;
pub const OXM_ETH_SRC: u8 = 0x08;

// ── Ethernet ────────────────────────────────────────────────────

pub const ETH_MAC_LEN: usize = 6;
pub const ETH_DST_OFFSET: usize = 0;
pub const ETH_SRC_OFFSET: usize = 6;
pub const ETH_TYPE_OFFSET: usize = 12;
pub const ETH_HEADER_LEN: usize = 14;

pub const ETHERTYPE_ARP: u16 = 0x0806;
