// Game modules: the pose-driven character and the scene around it

pub mod character;
pub mod scene;
