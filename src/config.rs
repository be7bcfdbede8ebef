// TOML configuration for the stage and the relay

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::core::rect::Rect;
use crate::game::scene::{self, Barrier, BarrierRole};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown barrier role: {0}")]
    UnknownRole(String),
}

/// Top-level configuration, shared by both binaries. Every field has a
/// default so an empty file (or no file at all) yields a working setup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub relay: RelayConfig,
    pub stage: StageConfig,
    pub scene: SceneConfig,
}

impl Config {
    /// Load from a TOML file, or fall back to defaults when the file
    /// does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

/// The WebSocket <-> OSC relay endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Port the WebSocket server listens on
    pub ws_port: u16,
    /// UDP port OSC messages are sent to
    pub osc_send_port: u16,
    /// UDP port incoming OSC messages are received on
    pub osc_listen_port: u16,
    /// Host the OSC peer lives on
    pub osc_host: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            ws_port: 8081,
            osc_send_port: 9129,
            osc_listen_port: 9130,
            osc_host: "127.0.0.1".to_string(),
        }
    }
}

impl RelayConfig {
    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.ws_port)
    }

    pub fn osc_send_addr(&self) -> String {
        format!("{}:{}", self.osc_host, self.osc_send_port)
    }

    pub fn osc_listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.osc_listen_port)
    }
}

/// The stage binary: where to find the relay and the sprite assets,
/// and where the character starts
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// WebSocket URL of the relay. Empty means "derive from [relay]".
    pub relay_url: String,
    /// Directory holding `<label><n>.png` frame images
    pub asset_dir: String,
    pub spawn_x: f32,
    pub spawn_y: f32,
    /// Uniform sprite scale
    pub scale: f32,
    /// Draw hitboxes and allow live barrier authoring
    pub debug_overlay: bool,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            relay_url: String::new(),
            asset_dir: "assets/character".to_string(),
            spawn_x: 50.0,
            spawn_y: 225.0,
            scale: 0.13,
            debug_overlay: false,
        }
    }
}

/// World bounds and barrier layout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub world_width: f32,
    pub world_height: f32,
    /// Explicit barrier list; empty means the stock layout
    pub barriers: Vec<BarrierConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            world_width: 1000.0,
            world_height: 600.0,
            barriers: Vec::new(),
        }
    }
}

impl SceneConfig {
    pub fn world(&self) -> Rect {
        Rect::new(0.0, 0.0, self.world_width, self.world_height)
    }

    pub fn barriers(&self) -> Result<Vec<Barrier>, ConfigError> {
        if self.barriers.is_empty() {
            return Ok(scene::default_layout());
        }
        self.barriers.iter().map(BarrierConfig::to_barrier).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BarrierConfig {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "generic".to_string()
}

impl BarrierConfig {
    fn to_barrier(&self) -> Result<Barrier, ConfigError> {
        let role = BarrierRole::parse(&self.role)
            .ok_or_else(|| ConfigError::UnknownRole(self.role.clone()))?;
        Ok(Barrier::with_role(self.x, self.y, self.w, self.h, role))
    }
}
