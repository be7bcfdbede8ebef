// Pose labels and animation labels

/// A pose classification arriving from the external classifier.
/// `Jump` and `Climb` are commands with their own transition logic;
/// the rest map directly onto an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseLabel {
    Idle,
    WalkLeft,
    WalkRight,
    WalkFront,
    WalkBack,
    Jump,
    Crouch,
    Climb,
}

impl PoseLabel {
    /// Parse a wire label string. Unknown labels yield `None` and are
    /// silently ignored upstream — a dropped classification just means
    /// the character keeps its current pose.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "idle" => Some(Self::Idle),
            "walk_left" => Some(Self::WalkLeft),
            "walk_right" => Some(Self::WalkRight),
            "walk_front" => Some(Self::WalkFront),
            "walk_back" => Some(Self::WalkBack),
            "jump" => Some(Self::Jump),
            "crouch" => Some(Self::Crouch),
            "climb" => Some(Self::Climb),
            _ => None,
        }
    }

    /// Whether this is one of the four walk directions
    pub fn is_walk(&self) -> bool {
        matches!(
            self,
            Self::WalkLeft | Self::WalkRight | Self::WalkFront | Self::WalkBack
        )
    }

    /// The animation this label selects directly, if any.
    /// `Jump` has no direct animation: the jump logic picks
    /// `JumpUp`/`JumpDown` itself.
    pub fn animation(&self) -> Option<AnimationLabel> {
        match self {
            Self::Idle => Some(AnimationLabel::Idle),
            Self::WalkLeft => Some(AnimationLabel::WalkLeft),
            Self::WalkRight => Some(AnimationLabel::WalkRight),
            Self::WalkFront => Some(AnimationLabel::WalkFront),
            Self::WalkBack => Some(AnimationLabel::WalkBack),
            Self::Crouch => Some(AnimationLabel::Crouch),
            Self::Climb => Some(AnimationLabel::Climb),
            Self::Jump => None,
        }
    }
}

/// The fixed set of frame sequences the character can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationLabel {
    Idle,
    WalkLeft,
    WalkRight,
    WalkFront,
    WalkBack,
    JumpUp,
    JumpDown,
    Crouch,
    Climb,
}

impl Default for AnimationLabel {
    fn default() -> Self {
        Self::Idle
    }
}

impl AnimationLabel {
    /// All labels, in asset-loading order
    pub const ALL: [AnimationLabel; 9] = [
        Self::Idle,
        Self::WalkLeft,
        Self::WalkRight,
        Self::WalkFront,
        Self::WalkBack,
        Self::JumpUp,
        Self::JumpDown,
        Self::Crouch,
        Self::Climb,
    ];

    /// The label name used for asset lookup (`<name><n>.png`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::WalkLeft => "walk_left",
            Self::WalkRight => "walk_right",
            Self::WalkFront => "walk_front",
            Self::WalkBack => "walk_back",
            Self::JumpUp => "jump_up",
            Self::JumpDown => "jump_down",
            Self::Crouch => "crouch",
            Self::Climb => "climb",
        }
    }

    /// Whether this is a walk cycle (drives the faster frame advance)
    pub fn is_walk(&self) -> bool {
        matches!(
            self,
            Self::WalkLeft | Self::WalkRight | Self::WalkFront | Self::WalkBack
        )
    }
}
