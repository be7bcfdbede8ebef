// Character entity: position, animation and platformer motion

use glam::Vec2;

use crate::core::math::lerp;
use crate::core::rect::Rect;
use crate::engine::assets::{AnimationSet, Frame, FrameId};
use crate::game::scene::{Barrier, BarrierRole};

use super::animation::AnimationPlayer;
use super::motion::MotionState;
use super::pose::{AnimationLabel, PoseLabel};
use super::tuning::CharacterTuning;

/// Fallback hitbox edge length while no frame is loaded yet
const PLACEHOLDER_BOX: f32 = 10.0;

/// A ready-to-draw sprite frame. The renderer outside this crate owns
/// the actual image data; we hand it the handle, the smoothed position
/// and the scaled size, plus the hitbox outline in debug mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub frame: FrameId,
    pub position: Vec2,
    pub size: Vec2,
    pub debug_box: Option<Rect>,
}

/// The pose-driven character.
///
/// `position` is authoritative for physics and collision;
/// `display_position` trails it with exponential smoothing and is never
/// read back by the motion code. All updates are total functions over
/// well-formed input: unknown labels and empty barrier lists are
/// no-ops, not errors.
#[derive(Debug, Clone)]
pub struct Character {
    position: Vec2,
    display_position: Vec2,
    scale: f32,

    animation: AnimationPlayer,
    motion: MotionState,
    frames: AnimationSet,
    tuning: CharacterTuning,

    /// World bounds the foot hitbox is clamped into during walk moves
    world: Rect,
}

impl Character {
    pub fn new(x: f32, y: f32, scale: f32, frames: AnimationSet) -> Self {
        let position = Vec2::new(x, y);
        Self {
            position,
            display_position: position,
            scale,
            animation: AnimationPlayer::new(),
            motion: MotionState::Grounded,
            frames,
            tuning: CharacterTuning::default(),
            world: Rect::new(0.0, 0.0, 1000.0, 600.0),
        }
    }

    /// Override the world bounds (default 1000x600)
    pub fn with_world(mut self, world: Rect) -> Self {
        self.world = world;
        self
    }

    /// Override the tuning constants
    pub fn with_tuning(mut self, tuning: CharacterTuning) -> Self {
        self.tuning = tuning;
        self
    }

    // --- pose input -------------------------------------------------

    /// React to a freshly classified pose. Called whenever a label
    /// arrives from the relay, which may be several times between two
    /// ticks or not for seconds at a stretch; only state is mutated,
    /// never I/O.
    pub fn change_pose(&mut self, label: PoseLabel, barriers: &[Barrier]) {
        match label {
            PoseLabel::Jump => self.start_jump(barriers),
            PoseLabel::Climb => self.start_climb(barriers),
            other => {
                if let Some(animation) = other.animation() {
                    self.animation.play(animation);
                }
            }
        }
    }

    fn start_jump(&mut self, barriers: &[Barrier]) {
        let foot = self.collision_box();

        // Jump-down shortcut: standing on a walkway with a landing
        // target drops straight down instead of launching. Takes
        // precedence over the gravity jump when both would apply.
        let on_walkway = barriers
            .iter()
            .any(|b| b.role == BarrierRole::Walkway && foot.touches_top_of(&b.rect));
        if on_walkway {
            if let Some(landing) = barriers
                .iter()
                .find(|b| b.role == BarrierRole::LandingTarget)
            {
                let target_y = landing.rect.y - self.tuning.landing_offset;
                self.motion = MotionState::FallingFromJumpDown { target_y };
                self.animation.play(AnimationLabel::JumpDown);
                return;
            }
        }

        // Re-entrant jump requests are ignored
        if self.motion.is_jumping() {
            return;
        }

        self.motion = MotionState::Jumping {
            velocity: self.tuning.jump_strength,
            origin_y: self.position.y,
        };
        self.animation.play(AnimationLabel::JumpUp);
    }

    fn start_climb(&mut self, barriers: &[Barrier]) {
        let foot = self.collision_box();
        let touching = barriers
            .iter()
            .any(|b| b.role == BarrierRole::Climbable && foot.intersects(&b.rect));
        if touching {
            self.motion = MotionState::Climbing { target_y: None };
            self.animation.play(AnimationLabel::Climb);
        }
    }

    // --- per-tick update --------------------------------------------

    /// Advance one simulation tick. Exactly one vertical-motion routine
    /// runs, selected by the motion state; animation advance and
    /// display smoothing always follow.
    pub fn update(&mut self, label: PoseLabel, barriers: &[Barrier]) {
        match self.motion {
            MotionState::Grounded => self.walk(label),
            MotionState::Jumping { velocity, origin_y } => {
                self.integrate_jump(velocity, origin_y, barriers)
            }
            MotionState::FallingFromJumpDown { target_y } => self.fall_to(target_y),
            MotionState::Climbing { target_y } => self.climb(target_y, barriers),
        }

        self.advance_animation();
        self.smooth_display();
    }

    fn walk(&mut self, label: PoseLabel) {
        let speed = self.tuning.speed;
        match label {
            PoseLabel::WalkLeft => self.position.x -= speed,
            PoseLabel::WalkRight => self.position.x += speed,
            PoseLabel::WalkFront => self.position.y += speed,
            PoseLabel::WalkBack => self.position.y -= speed,
            _ => return,
        }

        // Keep the foot hitbox inside the world bounds
        let foot = self.collision_box();
        if foot.x < self.world.x {
            self.position.x += self.world.x - foot.x;
        }
        if foot.right() > self.world.right() {
            self.position.x -= foot.right() - self.world.right();
        }
        if foot.y < self.world.y {
            self.position.y += self.world.y - foot.y;
        }
        if foot.bottom() > self.world.bottom() {
            self.position.y -= foot.bottom() - self.world.bottom();
        }
    }

    fn integrate_jump(&mut self, velocity: f32, origin_y: f32, barriers: &[Barrier]) {
        // Semi-implicit Euler, per tick rather than per second
        self.position.y += velocity;
        let next = velocity + self.tuning.gravity;

        if velocity < 0.0 && next >= 0.0 {
            // Apex reached: flip to the descending animation
            self.animation.switch(AnimationLabel::JumpDown);
        }

        // Only downward landings resolve a jump; ceilings are never
        // checked on the way up.
        if next >= 0.0 {
            let foot = self.collision_box();
            if let Some(hit) = barriers.iter().find(|b| foot.intersects(&b.rect)) {
                self.position.y = hit.rect.y - foot.h * self.tuning.landing_snap;
                self.land();
                return;
            }
            if self.position.y >= origin_y {
                // Nothing intercepted the descent: the launch height
                // is the floor
                self.position.y = origin_y;
                self.land();
                return;
            }
        }

        self.motion = MotionState::Jumping {
            velocity: next,
            origin_y,
        };
    }

    fn fall_to(&mut self, target_y: f32) {
        self.position.y += self.tuning.fall_speed;
        if self.position.y >= target_y {
            self.position.y = target_y;
            self.land();
        }
    }

    fn climb(&mut self, target_y: Option<f32>, barriers: &[Barrier]) {
        let foot = self.collision_box();
        let touched = barriers
            .iter()
            .find(|b| b.role == BarrierRole::Climbable && foot.intersects(&b.rect));

        let Some(barrier) = touched else {
            // Drifted off the wall: abort the climb
            self.land();
            return;
        };

        let target = target_y.unwrap_or(barrier.rect.y - self.tuning.climb_offset);
        self.position.y = lerp(self.position.y, target, self.tuning.climb_smoothing);

        if (self.position.y - target).abs() <= self.tuning.climb_epsilon {
            self.land();
        } else {
            self.motion = MotionState::Climbing {
                target_y: Some(target),
            };
        }
    }

    fn land(&mut self) {
        self.motion = MotionState::Grounded;
        self.animation.play(AnimationLabel::Idle);
    }

    fn advance_animation(&mut self) {
        let label = self.animation.current();
        let amount = if label.is_walk() {
            // Legs match the movement speed
            self.tuning.walk_frame_advance
                * (self.tuning.speed / self.tuning.walk_baseline_speed)
        } else {
            self.tuning.idle_frame_advance
        };
        let len = self.frames.len(label.as_str());
        self.animation.advance(amount, len);
    }

    fn smooth_display(&mut self) {
        let t = self.tuning.display_smoothing;
        self.display_position.x = lerp(self.display_position.x, self.position.x, t);
        self.display_position.y = lerp(self.display_position.y, self.position.y, t);
    }

    // --- reads ------------------------------------------------------

    /// The feet-only collision box: a thin rect near the bottom-center
    /// of the sprite, so contact reflects standing and landing rather
    /// than full-body overlap. Pure in `(position, scale, frame dims)`.
    pub fn collision_box(&self) -> Rect {
        match self.current_frame() {
            Some(frame) => {
                let s = self.scale;
                let w = frame.width as f32;
                let h = frame.height as f32;
                Rect::new(
                    self.position.x + w * 0.35 * s,
                    self.position.y + h * 0.9 * s,
                    w * 0.3 * s,
                    h * 0.1 * s,
                )
            }
            // No frame loaded yet: degrade to a small box at the anchor
            None => Rect::new(
                self.position.x,
                self.position.y,
                PLACEHOLDER_BOX,
                PLACEHOLDER_BOX,
            ),
        }
    }

    /// Build the draw command for the current frame, or `None` while
    /// its image has not been loaded. Pure read, no state mutation.
    pub fn display(&self, show_debug: bool) -> Option<Sprite> {
        let frame = self.current_frame()?;
        let size = Vec2::new(
            frame.width as f32 * self.scale,
            frame.height as f32 * self.scale,
        );
        Some(Sprite {
            frame: frame.id,
            position: self.display_position,
            size,
            debug_box: show_debug.then(|| self.collision_box()),
        })
    }

    fn current_frame(&self) -> Option<&Frame> {
        self.frames.frame(
            self.animation.current().as_str(),
            self.animation.display_frame(),
        )
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Teleport the character (also used by the scene's rollback)
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn display_position(&self) -> Vec2 {
        self.display_position
    }

    pub fn motion(&self) -> MotionState {
        self.motion
    }

    pub fn is_grounded(&self) -> bool {
        self.motion.is_grounded()
    }

    pub fn animation(&self) -> &AnimationPlayer {
        &self.animation
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn tuning(&self) -> &CharacterTuning {
        &self.tuning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // 100x160 frames at scale 0.13: foot box offset (4.55, 18.72),
    // size 3.9 x 2.08, matching the shipped sprite pack proportions.
    fn test_character() -> Character {
        Character::new(50.0, 225.0, 0.13, AnimationSet::uniform(100, 160))
    }

    fn no_barriers() -> Vec<Barrier> {
        Vec::new()
    }

    #[test]
    fn test_walk_right_scenario() {
        let mut c = test_character();
        let barriers = no_barriers();

        for _ in 0..3 {
            c.change_pose(PoseLabel::WalkRight, &barriers);
            c.update(PoseLabel::WalkRight, &barriers);
        }

        assert_relative_eq!(c.position().x, 52.4, epsilon = 1e-4);
        assert_relative_eq!(c.position().y, 225.0, epsilon = 1e-6);
        assert_eq!(c.animation().current(), AnimationLabel::WalkRight);
    }

    #[test]
    fn test_walk_front_and_back_axes() {
        let mut c = test_character();
        let barriers = no_barriers();

        c.update(PoseLabel::WalkFront, &barriers);
        assert_relative_eq!(c.position().y, 225.8, epsilon = 1e-4);

        c.update(PoseLabel::WalkBack, &barriers);
        c.update(PoseLabel::WalkBack, &barriers);
        assert_relative_eq!(c.position().y, 224.2, epsilon = 1e-4);
    }

    #[test]
    fn test_walk_clamps_to_world_bounds() {
        let mut c = test_character();
        let barriers = no_barriers();

        for _ in 0..200 {
            c.update(PoseLabel::WalkLeft, &barriers);
        }

        // Parked at the left edge (within float noise)
        let foot = c.collision_box();
        assert_relative_eq!(foot.x, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_jump_first_tick_scenario() {
        let mut c = test_character();
        let barriers = no_barriers();

        c.change_pose(PoseLabel::Jump, &barriers);
        assert_eq!(c.animation().current(), AnimationLabel::JumpUp);

        c.update(PoseLabel::Idle, &barriers);
        match c.motion() {
            MotionState::Jumping { velocity, origin_y } => {
                assert_relative_eq!(velocity, -7.65, epsilon = 1e-5);
                assert_relative_eq!(origin_y, 225.0, epsilon = 1e-6);
            }
            other => panic!("expected Jumping, got {other:?}"),
        }
        assert_relative_eq!(c.position().y, 217.0, epsilon = 1e-5);
        assert_eq!(c.animation().current(), AnimationLabel::JumpUp);
    }

    #[test]
    fn test_jump_request_is_idempotent_while_airborne() {
        let mut c = test_character();
        let barriers = no_barriers();

        c.change_pose(PoseLabel::Jump, &barriers);
        c.update(PoseLabel::Idle, &barriers);
        let mid_flight = c.motion();

        c.change_pose(PoseLabel::Jump, &barriers);
        assert_eq!(c.motion(), mid_flight);
    }

    #[test]
    fn test_jump_returns_to_launch_height_without_barriers() {
        let mut c = test_character();
        let barriers = no_barriers();

        c.change_pose(PoseLabel::Jump, &barriers);
        let mut ticks = 0;
        while !c.is_grounded() {
            c.update(PoseLabel::Idle, &barriers);
            ticks += 1;
            assert!(ticks < 300, "jump must resolve in bounded ticks");
        }

        assert_eq!(c.position().y, 225.0);
        assert_eq!(c.animation().current(), AnimationLabel::Idle);
    }

    #[test]
    fn test_jump_switches_to_descending_animation_at_apex() {
        let mut c = test_character();
        let barriers = no_barriers();

        c.change_pose(PoseLabel::Jump, &barriers);
        for _ in 0..300 {
            c.update(PoseLabel::Idle, &barriers);
            match c.motion() {
                MotionState::Jumping { velocity, .. } if velocity >= 0.0 => {
                    assert_eq!(c.animation().current(), AnimationLabel::JumpDown);
                    return;
                }
                MotionState::Jumping { .. } => {
                    assert_eq!(c.animation().current(), AnimationLabel::JumpUp);
                }
                _ => panic!("landed before reaching the apex"),
            }
        }
        panic!("apex never reached");
    }

    #[test]
    fn test_jump_lands_on_barrier_above_launch_height() {
        let mut c = test_character();
        // A ledge above the launch point, wide enough to catch the foot
        let barriers = vec![Barrier::new(0.0, 190.0, 1000.0, 10.0)];

        c.change_pose(PoseLabel::Jump, &barriers);
        let mut ticks = 0;
        while !c.is_grounded() {
            c.update(PoseLabel::Idle, &barriers);
            ticks += 1;
            assert!(ticks < 300, "jump must resolve in bounded ticks");
        }

        // Snapped above the barrier top: barrier.y - foot.h * 1.2
        let foot_h = 160.0 * 0.1 * 0.13;
        assert_relative_eq!(c.position().y, 190.0 - foot_h * 1.2, epsilon = 1e-3);
        assert_eq!(c.animation().current(), AnimationLabel::Idle);
    }

    #[test]
    fn test_walk_suppressed_while_airborne() {
        let mut c = test_character();
        let barriers = no_barriers();

        c.change_pose(PoseLabel::Jump, &barriers);
        let x_before = c.position().x;
        c.update(PoseLabel::WalkRight, &barriers);
        assert_eq!(c.position().x, x_before);
    }

    #[test]
    fn test_jump_down_shortcut_from_walkway() {
        let mut c = test_character();
        // Foot box sits at y in [243.72, 245.8]; the walkway top edge
        // at 244 is straddled, so jump-down wins over the gravity jump.
        let barriers = vec![
            Barrier::with_role(0.0, 244.0, 1000.0, 20.0, BarrierRole::Walkway),
            Barrier::with_role(0.0, 400.0, 1000.0, 20.0, BarrierRole::LandingTarget),
        ];

        c.change_pose(PoseLabel::Jump, &barriers);
        assert_eq!(
            c.motion(),
            MotionState::FallingFromJumpDown { target_y: 374.0 }
        );
        assert_eq!(c.animation().current(), AnimationLabel::JumpDown);

        let mut ticks = 0;
        while !c.is_grounded() {
            c.update(PoseLabel::Idle, &barriers);
            ticks += 1;
            assert!(ticks < 200, "jump-down must resolve in bounded ticks");
        }
        assert_eq!(c.position().y, 374.0);
        assert_eq!(c.animation().current(), AnimationLabel::Idle);
    }

    #[test]
    fn test_jump_down_without_landing_target_falls_back_to_jump() {
        let mut c = test_character();
        let barriers = vec![Barrier::with_role(
            0.0,
            244.0,
            1000.0,
            20.0,
            BarrierRole::Walkway,
        )];

        c.change_pose(PoseLabel::Jump, &barriers);
        assert!(c.motion().is_jumping());
        assert_eq!(c.animation().current(), AnimationLabel::JumpUp);
    }

    #[test]
    fn test_climb_requires_touching_climbable() {
        let mut c = test_character();
        // Climbable far away: the climb request is a no-op
        let barriers = vec![Barrier::with_role(
            800.0,
            240.0,
            100.0,
            60.0,
            BarrierRole::Climbable,
        )];

        c.change_pose(PoseLabel::Climb, &barriers);
        assert!(c.is_grounded());
        assert_eq!(c.animation().current(), AnimationLabel::Idle);
    }

    #[test]
    fn test_climb_converges_to_target_and_exits() {
        let mut c = test_character();
        // Wall overlapping the foot box; target is 20 above its top
        let barriers = vec![Barrier::with_role(
            40.0,
            240.0,
            100.0,
            60.0,
            BarrierRole::Climbable,
        )];

        c.change_pose(PoseLabel::Climb, &barriers);
        assert_eq!(c.motion(), MotionState::Climbing { target_y: None });
        assert_eq!(c.animation().current(), AnimationLabel::Climb);

        let mut ticks = 0;
        while !c.is_grounded() {
            c.update(PoseLabel::Idle, &barriers);
            ticks += 1;
            assert!(ticks < 200, "climb must terminate");
        }

        // Within epsilon of the target (240 - 20 = 220)
        assert!((c.position().y - 220.0).abs() <= 2.0);
        assert_eq!(c.animation().current(), AnimationLabel::Idle);
    }

    #[test]
    fn test_climb_aborts_when_no_longer_touching() {
        let mut c = test_character();
        let touching = vec![Barrier::with_role(
            40.0,
            240.0,
            100.0,
            60.0,
            BarrierRole::Climbable,
        )];
        c.change_pose(PoseLabel::Climb, &touching);
        assert!(c.motion().is_climbing());

        // The wall vanished (e.g. debug-mode re-authoring)
        let gone = no_barriers();
        c.update(PoseLabel::Idle, &gone);
        assert!(c.is_grounded());
        assert_eq!(c.animation().current(), AnimationLabel::Idle);
    }

    #[test]
    fn test_unknown_pose_is_ignored() {
        // Parse failure upstream means change_pose is never called;
        // the tick itself leaves a grounded idle character in place.
        let mut c = test_character();
        let barriers = no_barriers();
        let before = c.position();
        c.update(PoseLabel::Idle, &barriers);
        assert_eq!(c.position(), before);
        assert_eq!(c.animation().current(), AnimationLabel::Idle);
    }

    #[test]
    fn test_collision_box_is_pure() {
        let a = test_character();
        let b = test_character();
        assert_eq!(a.collision_box(), b.collision_box());

        let foot = a.collision_box();
        assert_relative_eq!(foot.x, 50.0 + 100.0 * 0.35 * 0.13, epsilon = 1e-5);
        assert_relative_eq!(foot.y, 225.0 + 160.0 * 0.9 * 0.13, epsilon = 1e-5);
        assert_relative_eq!(foot.w, 100.0 * 0.3 * 0.13, epsilon = 1e-5);
        assert_relative_eq!(foot.h, 160.0 * 0.1 * 0.13, epsilon = 1e-5);
    }

    #[test]
    fn test_missing_frames_degrade_gracefully() {
        let mut c = Character::new(50.0, 225.0, 0.13, AnimationSet::empty());
        let barriers = no_barriers();

        let foot = c.collision_box();
        assert_eq!(foot, Rect::new(50.0, 225.0, PLACEHOLDER_BOX, PLACEHOLDER_BOX));
        assert!(c.display(false).is_none());

        // Updates still run without panicking
        c.update(PoseLabel::WalkRight, &barriers);
        assert!(c.position().x > 50.0);
    }

    #[test]
    fn test_frame_index_stays_in_range() {
        let mut c = test_character();
        let barriers = no_barriers();
        c.change_pose(PoseLabel::WalkLeft, &barriers);

        for _ in 0..500 {
            c.update(PoseLabel::WalkLeft, &barriers);
            let index = c.animation().frame_index();
            assert!(index >= 0.0 && index < 3.0);
        }
    }

    #[test]
    fn test_display_smoothing_trails_position() {
        let mut c = test_character();
        let barriers = no_barriers();

        c.update(PoseLabel::WalkRight, &barriers);
        // One tick: display has covered 30% of the move
        assert!(c.display_position().x > 50.0);
        assert!(c.display_position().x < c.position().x);

        for _ in 0..100 {
            c.update(PoseLabel::Idle, &barriers);
        }
        // At rest the display position converges
        assert_relative_eq!(c.display_position().x, c.position().x, epsilon = 1e-3);
    }

    #[test]
    fn test_display_command_uses_smoothed_position() {
        let mut c = test_character();
        let barriers = no_barriers();
        c.update(PoseLabel::WalkRight, &barriers);

        let sprite = c.display(true).unwrap();
        assert_eq!(sprite.position, c.display_position());
        assert_relative_eq!(sprite.size.x, 13.0, epsilon = 1e-4);
        assert_relative_eq!(sprite.size.y, 20.8, epsilon = 1e-4);
        assert!(sprite.debug_box.is_some());
        assert!(c.display(false).unwrap().debug_box.is_none());
    }
}
