// Scene barriers

use crate::core::rect::Rect;

/// What a barrier means to the motion logic. Plain `Generic` barriers
/// only block walking; the other roles additionally participate in the
/// jump-down and climb transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarrierRole {
    /// Blocks walking, nothing else
    Generic,
    /// An elevated platform the character can jump down from
    Walkway,
    /// A wall the climb pose can scale
    Climbable,
    /// Where the jump-down descent ends up
    LandingTarget,
}

impl Default for BarrierRole {
    fn default() -> Self {
        Self::Generic
    }
}

impl BarrierRole {
    /// Parse a role name from configuration. Unknown names yield `None`
    /// so the config layer can report them instead of guessing.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "generic" => Some(Self::Generic),
            "walkway" => Some(Self::Walkway),
            "climbable" => Some(Self::Climbable),
            "landing_target" => Some(Self::LandingTarget),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Walkway => "walkway",
            Self::Climbable => "climbable",
            Self::LandingTarget => "landing_target",
        }
    }
}

/// An axis-aligned solid region of the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barrier {
    pub rect: Rect,
    pub role: BarrierRole,
}

impl Barrier {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            role: BarrierRole::Generic,
        }
    }

    pub fn with_role(x: f32, y: f32, w: f32, h: f32, role: BarrierRole) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            role,
        }
    }
}
