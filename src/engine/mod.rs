// Engine modules: asset loading and session timing

pub mod assets;
pub mod tick;
