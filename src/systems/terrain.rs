// src/systems/terrain.rs - Authored terrain patches backing the probe and
// the icon overlay
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::*;

const TERRAIN_Z: f32 = -12.0;
const WORLD_HALF_EXTENT: f32 = 9000.0;
const SCATTER_SEED: u64 = 7;
const SCATTER_COUNT: u32 = 48;

pub fn setup_terrain(mut commands: Commands) {
    // Base ground plate, so the probe always finds something under open
    // field.
    commands.spawn((
        Transform::default(),
        Collider::cuboid(WORLD_HALF_EXTENT, WORLD_HALF_EXTENT),
        Sensor,
        TerrainPatch {
            kind: TerrainKind::Regular,
            half_extents: Vec2::splat(WORLD_HALF_EXTENT),
            normal: Vec3::Z,
        },
    ));

    let mut rng = fastrand::Rng::with_seed(SCATTER_SEED);
    for _ in 0..SCATTER_COUNT {
        let kind = match rng.u8(0..8) {
            0 | 1 | 2 => TerrainKind::Steep,
            3 | 4 => TerrainKind::Dangerous,
            5 => TerrainKind::ShallowWater,
            6 => TerrainKind::DeepWater,
            _ => TerrainKind::DangerousWater,
        };
        let half_extents = Vec2::new(
            200.0 + rng.f32() * 600.0,
            200.0 + rng.f32() * 600.0,
        );
        let position = Vec2::new(
            (rng.f32() * 2.0 - 1.0) * WORLD_HALF_EXTENT * 0.8,
            (rng.f32() * 2.0 - 1.0) * WORLD_HALF_EXTENT * 0.8,
        );
        let normal = if kind == TerrainKind::Steep {
            // Tilted for steep ground; direction of the tilt is cosmetic.
            Vec3::new(0.35, 0.0, 0.94).normalize()
        } else {
            Vec3::Z
        };

        commands.spawn((
            Sprite {
                color: terrain_tint(kind),
                custom_size: Some(half_extents * 2.0),
                ..default()
            },
            Transform::from_translation(position.extend(TERRAIN_Z)),
            Collider::cuboid(half_extents.x, half_extents.y),
            Sensor,
            TerrainPatch {
                kind,
                half_extents,
                normal,
            },
        ));
    }
}

/// Kind of ground at a world point, smallest (most specific) patch first.
pub fn terrain_kind_at(
    terrain: &Query<(&Transform, &TerrainPatch)>,
    point: Vec2,
) -> Option<TerrainKind> {
    let mut best: Option<(f32, TerrainKind)> = None;
    for (transform, patch) in terrain.iter() {
        let offset = (point - transform.translation.truncate()).abs();
        if offset.x <= patch.half_extents.x && offset.y <= patch.half_extents.y {
            let area = patch.half_extents.x * patch.half_extents.y;
            if best.map_or(true, |(a, _)| area < a) {
                best = Some((area, patch.kind));
            }
        }
    }
    best.map(|(_, kind)| kind)
}

fn terrain_tint(kind: TerrainKind) -> Color {
    match kind {
        TerrainKind::Regular => Color::srgb(0.16, 0.20, 0.14),
        TerrainKind::Steep => Color::srgb(0.24, 0.21, 0.15),
        TerrainKind::Dangerous => Color::srgb(0.26, 0.13, 0.12),
        TerrainKind::ShallowWater => Color::srgb(0.10, 0.17, 0.24),
        TerrainKind::DeepWater => Color::srgb(0.07, 0.11, 0.20),
        TerrainKind::DangerousWater => Color::srgb(0.14, 0.10, 0.22),
    }
}
