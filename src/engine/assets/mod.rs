// Sprite frame assets
//
// Frames are loaded once at session start by filename convention
// (`<label><n>.png` under the image directory) and are immutable
// afterwards. Only the pixel dimensions are kept in memory; actual
// rasterization happens outside this crate.

mod frames;
mod loader;

pub use frames::{AnimationSet, Frame, FrameId};
pub use loader::FrameLoader;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("idle1.png".to_string());
        assert_eq!(err.to_string(), "Asset not found: idle1.png");
    }
}
