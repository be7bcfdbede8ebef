// WebSocket <-> OSC relay

pub mod bridge;
pub mod envelope;

pub use envelope::{Arg, Envelope};
