// Frame handles and per-label frame sequences

use std::collections::HashMap;

/// Unique identifier for a loaded frame image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

impl FrameId {
    /// Create a frame ID from the asset's file name
    pub fn from_path(path: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        path.hash(&mut hasher);
        Self(hasher.finish())
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// A single sprite frame: a handle plus its pixel dimensions.
/// The dimensions drive both on-screen size and the foot hitbox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub id: FrameId,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub fn new(id: FrameId, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }
}

/// Ordered, non-empty frame sequences keyed by animation label name.
/// Built once at construction; immutable thereafter.
#[derive(Debug, Clone, Default)]
pub struct AnimationSet {
    sequences: HashMap<String, Vec<Frame>>,
}

impl AnimationSet {
    /// An empty set; every lookup degrades to the placeholder path
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a frame sequence for a label. Empty sequences are ignored:
    /// the invariant is that a present label has at least one frame.
    pub fn insert(&mut self, label: &str, frames: Vec<Frame>) {
        if !frames.is_empty() {
            self.sequences.insert(label.to_string(), frames);
        }
    }

    /// Get the frame sequence for a label
    pub fn sequence(&self, label: &str) -> Option<&[Frame]> {
        self.sequences.get(label).map(|f| f.as_slice())
    }

    /// Get a single frame by label and index
    pub fn frame(&self, label: &str, index: usize) -> Option<&Frame> {
        self.sequences.get(label).and_then(|f| f.get(index))
    }

    /// Number of frames for a label (0 when the label is absent)
    pub fn len(&self, label: &str) -> usize {
        self.sequences.get(label).map(|f| f.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Build a synthetic set where every label shares the same frame
    /// dimensions: three frames for the walk cycles, one for the rest.
    /// Used headless and in tests, mirroring the shipped sprite pack.
    pub fn uniform(width: u32, height: u32) -> Self {
        let mut set = Self::default();
        for (label, count) in [
            ("idle", 1),
            ("walk_left", 3),
            ("walk_right", 3),
            ("walk_front", 3),
            ("walk_back", 3),
            ("jump_up", 1),
            ("jump_down", 1),
            ("crouch", 1),
            ("climb", 1),
        ] {
            let frames = (1..=count)
                .map(|n| {
                    let id = FrameId::from_path(&format!("{label}{n}.png"));
                    Frame::new(id, width, height)
                })
                .collect();
            set.insert(label, frames);
        }
        set
    }
}
