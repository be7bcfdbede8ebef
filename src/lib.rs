//! A webcam-pose-driven 2D sprite stage.
//!
//! Classified pose labels arrive over the network and drive a sprite
//! character through a small platformer world: walking, gravity jumps,
//! jump-downs from walkways and wall climbs. The `relay` binary
//! bridges the browser-side pose pipeline (JSON over WebSocket) to the
//! UDP/OSC side; the `stage` binary runs the simulation.

pub mod config;
pub mod core;
pub mod engine;
pub mod game;
pub mod relay;
