use bevy::prelude::*;

use crate::core::events::FootstepSide;

#[derive(Component)]
pub struct Player;

/// Last non-zero movement direction. Stands in for the observing camera
/// bearing of a third-person rig in this top-down presentation.
#[derive(Component)]
pub struct Facing(pub Vec2);

impl Default for Facing {
    fn default() -> Self {
        Self(Vec2::Y)
    }
}

/// Distance accumulator driving footstep events, feet alternating.
#[derive(Component, Default)]
pub struct Stride {
    pub traveled: f32,
    pub next_side: FootstepSide,
}

/// Marker for spawned footprint decal entities.
#[derive(Component)]
pub struct FootprintDecal;

// Deferred despawn marker, consumed by despawn_marked_entities.
#[derive(Component)]
pub struct MarkedForDespawn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainKind {
    Regular,
    Steep,
    Dangerous,

    // Water terrains
    ShallowWater,
    DeepWater,
    DangerousWater,
}

impl TerrainKind {
    pub fn is_dangerous(self) -> bool {
        matches!(self, TerrainKind::Dangerous | TerrainKind::DangerousWater)
    }

    pub fn is_water(self) -> bool {
        matches!(
            self,
            TerrainKind::ShallowWater | TerrainKind::DeepWater | TerrainKind::DangerousWater
        )
    }
}

/// A rectangular patch of ground. Backs both the footstep probe and the
/// icon overlay. The normal is authored data: a top-down sensor overlap
/// has no contact normal to report.
#[derive(Component)]
pub struct TerrainPatch {
    pub kind: TerrainKind,
    pub half_extents: Vec2,
    pub normal: Vec3,
}
