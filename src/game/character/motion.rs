// Character motion state

/// The character's vertical-motion sub-state. At most one of the jump,
/// jump-down and climb routines may move the character in a tick; the
/// enum makes the states mutually exclusive by construction, with
/// `Grounded` as the residual default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionState {
    /// On the ground; ordinary walk moves apply
    Grounded,
    /// Gravity jump in flight. `origin_y` is the launch height and acts
    /// as the floor when no barrier intercepts the descent.
    Jumping { velocity: f32, origin_y: f32 },
    /// Jump-down shortcut: constant-speed descent to a precomputed target
    FallingFromJumpDown { target_y: f32 },
    /// Climbing toward a target above a climbable barrier's top edge.
    /// The target is resolved on the first climbing tick.
    Climbing { target_y: Option<f32> },
}

impl Default for MotionState {
    fn default() -> Self {
        Self::Grounded
    }
}

impl MotionState {
    pub fn is_grounded(&self) -> bool {
        matches!(self, Self::Grounded)
    }

    pub fn is_jumping(&self) -> bool {
        matches!(self, Self::Jumping { .. })
    }

    pub fn is_climbing(&self) -> bool {
        matches!(self, Self::Climbing { .. })
    }

    /// Walk displacement is allowed only while grounded
    pub fn allows_walk(&self) -> bool {
        self.is_grounded()
    }
}
