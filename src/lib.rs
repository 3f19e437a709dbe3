pub mod core;
pub mod systems;
