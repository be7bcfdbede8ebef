// The JSON <-> OSC message envelope

use anyhow::Result;
use rosc::{encoder, OscMessage, OscPacket, OscType};
use serde::{Deserialize, Serialize};

/// Raw pose keypoints
pub const ADDR_POSE_DATA: &str = "/poseData";
/// Raw hand keypoints
pub const ADDR_POSE_HAND_DATA: &str = "/poseHandData";
/// Classified pose label from the browser, one string argument
pub const ADDR_POSE_LABEL: &str = "/poseLabel";
/// Predicted pose label from the OSC side, one string argument
pub const ADDR_PREDICT_POINT: &str = "/predictpoint";
/// Collision impact reports from the stage
pub const ADDR_COLLISION: &str = "/collision";

/// One OSC argument as it appears in the JSON frames. Everything
/// numeric travels as a double; the distinction between ints and floats
/// is not meaningful to either side of the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Arg {
    Number(f64),
    Text(String),
}

/// An address + argument list, the unit both transports carry. On the
/// WebSocket side it is a JSON object; on the UDP side an OSC message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub address: String,
    pub args: Vec<Arg>,
}

impl Envelope {
    pub fn new(address: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            address: address.into(),
            args,
        }
    }

    /// A `/poseLabel` envelope carrying one label string
    pub fn pose_label(label: &str) -> Self {
        Self::new(ADDR_POSE_LABEL, vec![Arg::Text(label.to_string())])
    }

    /// A `/collision` envelope naming the barrier role that was hit
    pub fn collision(role: &str) -> Self {
        Self::new(ADDR_COLLISION, vec![Arg::Text(role.to_string())])
    }

    /// The label string, if this is a `/poseLabel` or `/predictpoint`
    /// envelope
    pub fn label(&self) -> Option<&str> {
        if self.address != ADDR_POSE_LABEL && self.address != ADDR_PREDICT_POINT {
            return None;
        }
        self.args.iter().find_map(|arg| match arg {
            Arg::Text(s) => Some(s.as_str()),
            Arg::Number(_) => None,
        })
    }

    /// Build the OSC message for the UDP side
    pub fn to_osc(&self) -> OscMessage {
        OscMessage {
            addr: self.address.clone(),
            args: self
                .args
                .iter()
                .map(|arg| match arg {
                    Arg::Number(n) => OscType::Float(*n as f32),
                    Arg::Text(s) => OscType::String(s.clone()),
                })
                .collect(),
        }
    }

    /// Convert an incoming OSC message. Argument types outside the
    /// numeric/string subset are dropped; the pose pipeline never
    /// produces them.
    pub fn from_osc(msg: OscMessage) -> Self {
        let args = msg
            .args
            .into_iter()
            .filter_map(|arg| match arg {
                OscType::Float(f) => Some(Arg::Number(f as f64)),
                OscType::Double(d) => Some(Arg::Number(d)),
                OscType::Int(i) => Some(Arg::Number(i as f64)),
                OscType::Long(l) => Some(Arg::Number(l as f64)),
                OscType::String(s) => Some(Arg::Text(s)),
                _ => None,
            })
            .collect();
        Self {
            address: msg.addr,
            args,
        }
    }

    /// Flatten a decoded packet into envelopes, recursing through
    /// bundles (some OSC senders wrap every message in a bundle)
    pub fn from_packet(packet: OscPacket) -> Vec<Self> {
        match packet {
            OscPacket::Message(msg) => vec![Self::from_osc(msg)],
            OscPacket::Bundle(bundle) => bundle
                .content
                .into_iter()
                .flat_map(Self::from_packet)
                .collect(),
        }
    }

    /// Encode as OSC bytes for the UDP socket
    pub fn encode(&self) -> Result<Vec<u8>> {
        let packet = OscPacket::Message(self.to_osc());
        let encoded = encoder::encode(&packet)?;
        Ok(encoded)
    }
}
