// Character tuning constants
//
// One canonical set of movement constants, matched to the shipped
// sprite pack (~160 px tall frames at scale 0.13). Everything here is
// per-tick, not per-second: the simulation runs at a fixed rate and the
// physics is deliberately not time-scaled.

/// Movement and animation tuning for the character
#[derive(Debug, Clone)]
pub struct CharacterTuning {
    // Movement
    /// Walk displacement per tick (world units)
    pub speed: f32,
    /// Initial jump velocity (negative = upward)
    pub jump_strength: f32,
    /// Velocity added per tick while jumping
    pub gravity: f32,
    /// Constant descent speed for the jump-down shortcut
    pub fall_speed: f32,

    // Landing targets
    /// How far above a landing barrier's top the jump-down descent stops
    pub landing_offset: f32,
    /// How far above a climbable barrier's top the climb settles
    pub climb_offset: f32,
    /// Landing snap distance, in foot-hitbox heights above the barrier top
    pub landing_snap: f32,

    // Climb
    /// Exponential interpolation factor toward the climb target, per tick
    pub climb_smoothing: f32,
    /// Distance at which the climb is considered complete
    pub climb_epsilon: f32,

    // Presentation
    /// Exponential interpolation factor for the display position, per tick
    pub display_smoothing: f32,
    /// Frame advance per tick during walk cycles, at baseline speed
    pub walk_frame_advance: f32,
    /// Walk speed at which `walk_frame_advance` applies unscaled
    pub walk_baseline_speed: f32,
    /// Frame advance per tick for idle/jump/climb/crouch
    pub idle_frame_advance: f32,
}

pub const BASE_TUNING: CharacterTuning = CharacterTuning {
    speed: 0.8,
    jump_strength: -8.0,
    gravity: 0.35,
    fall_speed: 3.0,

    landing_offset: 26.0,
    climb_offset: 20.0,
    landing_snap: 1.2,

    climb_smoothing: 0.08,
    climb_epsilon: 2.0,

    display_smoothing: 0.3,
    walk_frame_advance: 0.12,
    walk_baseline_speed: 0.8,
    idle_frame_advance: 0.05,
};

impl Default for CharacterTuning {
    fn default() -> Self {
        BASE_TUNING
    }
}
