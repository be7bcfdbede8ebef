// Frame loading by filename convention

use super::{AnimationSet, AssetError, Frame, FrameId};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Loads sprite frame sequences from an image directory.
///
/// Frames follow the `<label><n>.png` convention with `n` starting at 1
/// (`walk_left1.png`, `walk_left2.png`, ...). A sequence ends at the
/// first missing index; a label with no `1` frame is simply absent.
pub struct FrameLoader {
    base_path: PathBuf,
}

impl FrameLoader {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for a frame
    pub fn resolve_path(&self, label: &str, index: u32) -> PathBuf {
        self.base_path.join(format!("{label}{index}.png"))
    }

    /// Load the frame sequence for one label, stopping at the first gap
    pub fn load_sequence(&self, label: &str) -> Result<Vec<Frame>> {
        let mut frames = Vec::new();

        for index in 1.. {
            let path = self.resolve_path(label, index);
            if !path.exists() {
                break;
            }

            let (width, height) = image::image_dimensions(&path).map_err(|e| {
                AssetError::LoadError(format!("{}: {e}", path.to_string_lossy()))
            })?;
            let name = format!("{label}{index}.png");
            frames.push(Frame::new(FrameId::from_path(&name), width, height));
        }

        Ok(frames)
    }

    /// Load every label in `labels`, skipping (with a warning) labels
    /// with no frames on disk. The character degrades gracefully when a
    /// sequence is missing, so absence is not an error here.
    pub fn load_set(&self, labels: &[&str]) -> Result<AnimationSet> {
        let mut set = AnimationSet::empty();

        for label in labels {
            let frames = self.load_sequence(label)?;
            if frames.is_empty() {
                log::warn!(
                    "no frames for '{}' under {}",
                    label,
                    self.base_path.to_string_lossy()
                );
            } else {
                log::debug!("loaded {} frame(s) for '{}'", frames.len(), label);
                set.insert(label, frames);
            }
        }

        Ok(set)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
