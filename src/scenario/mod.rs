//! Traffic scenarios decide which messages are requests and responses, and
//! how to derive the correlation key that ties a pair together.

pub mod multinet;

use std::fmt;
use std::net::IpAddr;

use clap::ValueEnum;
use serde::Serialize;

use crate::wire::OfpMessage;

pub use multinet::Multinet;

/// Address of the switch side of a message, supplied by the capture layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub ip: IpAddr,
    pub port: u16,
}

impl Endpoint {
    pub fn new(ip: IpAddr, port: u16) -> Self {
        Self { ip, port }
    }

    /// Appends `ip octets || be16(port)` to `out`.
    pub fn append_to(&self, out: &mut Vec<u8>) {
        match self.ip {
            IpAddr::V4(v4) => out.extend_from_slice(&v4.octets()),
            IpAddr::V6(v6) => out.extend_from_slice(&v6.octets()),
        }
        out.extend_from_slice(&self.port.to_be_bytes());
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ip {
            IpAddr::V4(ip) => write!(f, "{ip}:{}", self.port),
            IpAddr::V6(ip) => write!(f, "[{ip}]:{}", self.port),
        }
    }
}

/// Opaque pairing key. Always an owned copy, never a view into a capture
/// buffer.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CorrelationKey(Vec<u8>);

impl CorrelationKey {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// `seed || ip || be16(port)`
    pub fn from_seed(seed: &[u8], endpoint: &Endpoint) -> Self {
        let mut bytes = Vec::with_capacity(seed.len() + 18);
        bytes.extend_from_slice(seed);
        endpoint.append_to(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for CorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CorrelationKey({self})")
    }
}

impl fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// A request/response pairing rule.
///
/// `request_key` and `response_key` must be mirror images: for a genuine
/// pair they return byte-identical keys. Both are pure functions of the
/// message bytes and the endpoint.
pub trait TrafficScenario: Send + Sync {
    fn name(&self) -> &'static str;

    fn request_type(&self) -> u8;

    fn response_type(&self) -> u8;

    /// `endpoint` is the sender of the request.
    fn request_key(&self, msg: &OfpMessage<'_>, endpoint: &Endpoint) -> Option<CorrelationKey>;

    /// `endpoint` is the receiver of the response.
    fn response_key(&self, msg: &OfpMessage<'_>, endpoint: &Endpoint) -> Option<CorrelationKey>;
}

/// Scenarios selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    /// PACKET_IN carrying ARP answered by a FLOW_MOD on the MAC pair.
    #[default]
    Multinet,
}

impl ScenarioKind {
    pub fn build(self) -> Box<dyn TrafficScenario> {
        match self {
            Self::Multinet => Box::new(Multinet),
        }
    }
}
