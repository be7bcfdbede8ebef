// The pose-driven character controller

mod animation;
mod character;
mod motion;
mod pose;
mod tuning;

pub use animation::AnimationPlayer;
pub use character::{Character, Sprite};
pub use motion::MotionState;
pub use pose::{AnimationLabel, PoseLabel};
pub use tuning::{CharacterTuning, BASE_TUNING};
