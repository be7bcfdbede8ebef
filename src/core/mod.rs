// Core utilities shared by the controller and the scene

pub mod math;
pub mod rect;
