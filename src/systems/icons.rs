// src/systems/icons.rs - Terrain icon reveal effect
use bevy::prelude::*;

use crate::core::*;
use crate::systems::scanner::ScannerState;
use crate::systems::terrain::terrain_kind_at;

// Icon palette, sRGB.
const ICON_BLUE: Color = Color::srgb(0.25, 0.81, 0.90);
const ICON_YELLOW: Color = Color::srgb(0.93, 0.87, 0.26);
const ICON_RED: Color = Color::srgb(0.86, 0.18, 0.26);
const ICON_GREEN: Color = Color::srgb(0.27, 0.59, 0.21);

/// Timing and placement of the icon reveal overlay. The elapsed clock sits
/// at -1 while the effect is idle.
///
/// Read-only collaborator of the footprint pool: highlighted footprints
/// tie their lifetime to this effect's total duration.
#[derive(Resource)]
pub struct IconEffect {
    elapsed: f32,
    started: bool,
    total: f32,
    grid_origin: Vec2,
    direction: Vec2,
}

impl Default for IconEffect {
    fn default() -> Self {
        Self {
            elapsed: -1.0,
            started: false,
            total: 0.0,
            grid_origin: Vec2::ZERO,
            direction: Vec2::Y,
        }
    }
}

impl IconEffect {
    pub fn is_active(&self) -> bool {
        self.elapsed >= 0.0 && self.elapsed <= self.total
    }

    pub fn total_duration(&self) -> f32 {
        self.total
    }

    pub fn remaining(&self) -> f32 {
        if self.is_active() {
            self.total - self.elapsed
        } else {
            0.0
        }
    }

    pub fn grid_origin(&self) -> Vec2 {
        self.grid_origin
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn tick(&mut self, dt: f32) {
        if self.started {
            self.elapsed += dt;
        }
        if self.elapsed > self.total {
            self.elapsed = -1.0;
            self.started = false;
        }
    }

    pub fn start(&mut self, total: f32, grid_origin: Vec2, direction: Vec2) {
        self.total = total;
        self.grid_origin = grid_origin;
        self.direction = direction;
        self.elapsed = 0.0;
        self.started = true;
    }
}

// === SYSTEMS ===

pub fn tick_icon_effect(mut icons: ResMut<IconEffect>, time: Res<Time>) {
    icons.tick(time.delta_secs());
}

pub fn start_icon_effect(
    mut scan_started: EventReader<ScanStartedEvent>,
    mut icons: ResMut<IconEffect>,
    scanner: Res<ScannerState>,
    config: Res<TerrainScanConfig>,
) {
    if scan_started.is_empty() {
        return;
    }
    scan_started.clear();

    let total = config
        .icons
        .total_effect_duration(config.scanner.total_scan_duration());

    // The grid sits ahead of the pulse origin along the flattened bearing,
    // covering the swept area rather than centering on the character.
    let direction = scanner.direction.truncate().normalize_or_zero();
    let offset = config.icons.grid_x as f32 * config.icons.padding / 2.0;
    icons.start(total, scanner.origin.truncate() + direction * offset, direction);
}

/// Overlays a terrain-kind icon on every grid cell the pulse has reached.
/// Danger icons show up ahead of the scan edge by the configured offset.
pub fn draw_terrain_icons(
    mut gizmos: Gizmos,
    icons: Res<IconEffect>,
    scanner: Res<ScannerState>,
    config: Res<TerrainScanConfig>,
    terrain: Query<(&Transform, &TerrainPatch)>,
) {
    if !icons.is_active() {
        return;
    }

    let cfg = &config.icons;
    let along = icons.direction();
    let across = along.perp();
    let scan_origin = scanner.origin.truncate();

    for gx in 0..cfg.grid_x {
        for gy in 0..cfg.grid_y {
            let local = Vec2::new(
                (gx as f32 - (cfg.grid_x - 1) as f32 / 2.0) * cfg.padding,
                (gy as f32 - (cfg.grid_y - 1) as f32 / 2.0) * cfg.padding,
            );
            let point = icons.grid_origin() + along * local.x + across * local.y;

            if !scanner.is_point_inside(point.extend(0.0)) {
                continue;
            }
            let Some(kind) = terrain_kind_at(&terrain, point) else {
                continue;
            };

            let reveal_range = if kind.is_dangerous() {
                scanner.range + cfg.danger_icon_appear_offset
            } else {
                scanner.range
            };
            if point.distance(scan_origin) > reveal_range {
                continue;
            }

            gizmos.circle_2d(point, icon_radius(kind), icon_color(kind));
        }
    }
}

fn icon_color(kind: TerrainKind) -> Color {
    match kind {
        TerrainKind::Regular => ICON_GREEN,
        TerrainKind::Steep => ICON_YELLOW,
        TerrainKind::Dangerous | TerrainKind::DangerousWater => ICON_RED,
        TerrainKind::ShallowWater | TerrainKind::DeepWater => ICON_BLUE,
    }
}

fn icon_radius(kind: TerrainKind) -> f32 {
    if kind.is_dangerous() || kind.is_water() {
        10.0
    } else {
        4.0
    }
}
