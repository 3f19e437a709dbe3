// src/core/mod.rs - Shared types for the terrain scan effect
use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

pub mod components;
pub mod config;
pub mod despawn;
pub mod events;
pub mod material_params;

pub use components::*;
pub use config::*;
pub use despawn::*;
pub use events::*;
pub use material_params::*;

// === INPUT ===
#[derive(Actionlike, PartialEq, Eq, Hash, Clone, Copy, Debug, Reflect)]
pub enum PlayerAction {
    #[actionlike(DualAxis)]
    Move,
    Scan,
}

// === SCHEDULING ===

/// Update-schedule halves of the effect. Simulation state must be final
/// before any presentation system reads it in the same frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanSet {
    Simulate,
    Present,
}

pub struct ScanSchedulePlugin;

impl Plugin for ScanSchedulePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(Update, ScanSet::Present.after(ScanSet::Simulate));
    }
}
