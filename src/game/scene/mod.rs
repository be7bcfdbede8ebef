// Scene: the character plus the barrier layout

pub mod barrier;

pub use barrier::{Barrier, BarrierRole};

use log::warn;

use crate::game::character::{Character, PoseLabel, Sprite};

/// Something that happened during a tick and is worth reporting
/// upstream (the stage forwards these to the relay).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    /// A walk move ran into a barrier and was rolled back
    CollisionImpact { role: BarrierRole },
}

/// The simulation scene. Owns the character and the barrier layout and
/// drives both from pose input; rendering and networking stay outside.
pub struct SceneContext {
    character: Character,
    barriers: Vec<Barrier>,
    /// The most recent classified pose, re-applied every tick so a walk
    /// keeps going between classifier messages
    active_pose: PoseLabel,
    debug_mode: bool,
}

impl SceneContext {
    pub fn new(character: Character, barriers: Vec<Barrier>) -> Self {
        Self {
            character,
            barriers,
            active_pose: PoseLabel::Idle,
            debug_mode: false,
        }
    }

    /// Enable debug mode: hitbox overlays and live barrier authoring
    pub fn with_debug(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    /// Feed a freshly classified pose into the scene. Transition logic
    /// (jump launch, climb attach) runs immediately; the label is then
    /// re-applied on every tick until the next one arrives.
    pub fn on_pose(&mut self, label: PoseLabel) {
        self.active_pose = label;
        self.character.change_pose(label, &self.barriers);
    }

    /// Advance the simulation by one tick.
    ///
    /// Walk moves into a barrier the foot box was previously clear of
    /// are rolled back to the pre-tick position. Pre-existing overlap
    /// never blocks: standing on a walkway straddles its top band, and
    /// a finished climb can leave the foot box clipping the wall.
    /// Airborne motion resolves its own collisions (landing snap,
    /// climb targets) and is never reverted.
    pub fn tick(&mut self) -> Vec<SceneEvent> {
        let was_grounded = self.character.is_grounded();
        let prev = self.character.position();
        let prev_foot = self.character.collision_box();

        self.character.update(self.active_pose, &self.barriers);

        let mut events = Vec::new();
        if was_grounded && self.character.is_grounded() && self.character.position() != prev {
            let foot = self.character.collision_box();
            let hit = self
                .barriers
                .iter()
                .find(|b| foot.intersects(&b.rect) && !prev_foot.intersects(&b.rect));
            if let Some(hit) = hit {
                self.character.set_position(prev);
                events.push(SceneEvent::CollisionImpact { role: hit.role });
            }
        }
        events
    }

    /// Add a barrier at runtime. Only allowed in debug mode; in normal
    /// operation the layout is fixed by configuration.
    pub fn add_barrier(&mut self, barrier: Barrier) {
        if !self.debug_mode {
            warn!("ignoring barrier added outside debug mode");
            return;
        }
        self.barriers.push(barrier);
    }

    /// The draw command for the current frame, with the hitbox outline
    /// attached in debug mode
    pub fn frame(&self) -> Option<Sprite> {
        self.character.display(self.debug_mode)
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn barriers(&self) -> &[Barrier] {
        &self.barriers
    }
}

/// The stock barrier layout for the 1000x600 world: a raised walkway at
/// spawn height, a climbable wall, the landing floor below the walkway
/// and one solid obstacle.
pub fn default_layout() -> Vec<Barrier> {
    vec![
        Barrier::with_role(0.0, 244.0, 1000.0, 20.0, BarrierRole::Walkway),
        Barrier::with_role(700.0, 180.0, 40.0, 84.0, BarrierRole::Climbable),
        Barrier::with_role(0.0, 400.0, 1000.0, 24.0, BarrierRole::LandingTarget),
        Barrier::with_role(300.0, 180.0, 60.0, 64.0, BarrierRole::Generic),
    ]
}
