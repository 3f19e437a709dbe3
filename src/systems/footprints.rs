// src/systems/footprints.rs - Footprint decal pool
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::*;
use crate::systems::icons::IconEffect;
use crate::systems::scanner::ScannerState;

const FOOTPRINT_Z: f32 = -8.0;
/// Lateral offset of each foot from the body line.
const FOOT_OFFSET: f32 = 6.0;

/// Result of the ground probe beneath a foot.
pub struct GroundHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub forward: Vec2,
}

/// One placed ground decal. Placement is computed once at creation and
/// never moves; only the highlight status and its derived lifetime change.
pub struct FootprintRecord {
    pub location: Vec3,
    pub orientation: f32,
    pub side: FootstepSide,
    pub age: f32,
    pub lifetime: f32,
    pub is_highlighted: bool,
    /// Uniquely owned decal entity, released exactly once at eviction.
    pub decal: Entity,
}

/// Bounded, insertion-ordered collection of footprints, oldest first.
#[derive(Resource, Default)]
pub struct FootprintPool {
    records: Vec<FootprintRecord>,
}

impl FootprintPool {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[FootprintRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [FootprintRecord] {
        &mut self.records
    }

    /// Appends a record, evicting the oldest one first when the pool is at
    /// capacity. Returns the evicted record's decal; the caller must
    /// release it.
    pub fn push(&mut self, record: FootprintRecord, capacity: usize) -> Option<Entity> {
        let evicted = if self.records.len() >= capacity {
            Some(self.records.remove(0).decal)
        } else {
            None
        };
        self.records.push(record);

        debug_assert!(self.records.len() <= capacity);
        evicted
    }

    /// Ages every record and removes the expired ones. Returns the decals
    /// of the removed records; each decal is handed out exactly once.
    pub fn age(&mut self, dt: f32) -> Vec<Entity> {
        for record in &mut self.records {
            record.age += dt;
        }

        let mut released = Vec::new();
        self.records.retain(|record| {
            if record.age >= record.lifetime {
                released.push(record.decal);
                false
            } else {
                true
            }
        });

        debug_assert!(self.records.iter().all(|r| r.age <= r.lifetime));
        released
    }
}

/// Lifetime of a footprint given its highlight status. A highlighted
/// footprint outlives the remainder of the active reveal effect plus its
/// own highlight fade-out.
///
/// `scan_elapsed` is seconds since the current scan lifecycle started.
pub fn compute_lifetime(
    config: &FootprintConfig,
    highlighted: bool,
    icon_total: f32,
    scan_elapsed: f32,
) -> f32 {
    let mut lifetime = config.base_lifetime + config.fade_time;
    if highlighted {
        lifetime += (icon_total - scan_elapsed).max(0.0) + config.highlight_fade_time;
    }
    lifetime
}

/// Outcome of re-evaluating one record against a fresh pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReclassifyOutcome {
    Unchanged,
    /// Still highlighted: age and lifetime restart, no visual change.
    Refreshed,
    /// Highlight status flipped: restart plus a decal variant swap.
    SwapVariant,
}

/// Re-evaluates a single record against the new pulse. A footprint
/// re-caught by a later sweep restarts its countdown, but the decal
/// variant only swaps on an actual status change, so a re-confirmed
/// highlight does not flicker.
pub fn reclassify_record(
    record: &mut FootprintRecord,
    inside: bool,
    config: &FootprintConfig,
    icon_total: f32,
    scan_elapsed: f32,
) -> ReclassifyOutcome {
    let was_highlighted = record.is_highlighted;
    record.is_highlighted = inside;
    let changed = inside != was_highlighted;

    if !changed && !inside {
        return ReclassifyOutcome::Unchanged;
    }

    record.age = 0.0;
    record.lifetime = compute_lifetime(config, inside, icon_total, scan_elapsed);

    if changed {
        ReclassifyOutcome::SwapVariant
    } else {
        ReclassifyOutcome::Refreshed
    }
}

// === DECAL VARIANTS ===

/// Decal visuals are a pure function of (side, highlighted): the two sides
/// mirror each other, highlighted prints glow.
pub fn footprint_sprite(config: &FootprintConfig, side: FootstepSide, highlighted: bool) -> Sprite {
    Sprite {
        color: footprint_color(highlighted),
        custom_size: Some(config.decal_size),
        flip_x: side == FootstepSide::Right,
        ..default()
    }
}

fn footprint_color(highlighted: bool) -> Color {
    if highlighted {
        Color::srgba(0.25, 0.81, 0.90, 0.9)
    } else {
        Color::srgba(0.13, 0.11, 0.09, 0.75)
    }
}

/// Lays the decal across the travel direction, the way a foot falls.
pub fn footprint_orientation(forward: Vec2) -> f32 {
    forward.to_angle() + std::f32::consts::FRAC_PI_2
}

// === SYSTEMS ===

fn ground_probe(
    rapier: &RapierContext,
    terrain: &Query<&TerrainPatch>,
    position: Vec2,
    facing: Vec2,
    side: FootstepSide,
) -> Option<GroundHit> {
    let lateral = match side {
        FootstepSide::Left => facing.perp() * FOOT_OFFSET,
        FootstepSide::Right => facing.perp() * -FOOT_OFFSET,
    };
    let point = position + lateral;

    // Overlapping patches: the smallest one wins, it is the most specific
    // piece of authored ground under the foot.
    let mut best: Option<(f32, &TerrainPatch)> = None;
    rapier.intersections_with_point(point, QueryFilter::default(), |entity| {
        if let Ok(patch) = terrain.get(entity) {
            let area = patch.half_extents.x * patch.half_extents.y;
            if best.as_ref().map_or(true, |(a, _)| area < *a) {
                best = Some((area, patch));
            }
        }
        true
    });

    let (_, patch) = best?;
    Some(GroundHit {
        point: point.extend(0.0),
        normal: patch.normal,
        forward: facing,
    })
}

pub fn handle_footsteps(
    mut commands: Commands,
    mut footsteps: EventReader<FootstepEvent>,
    mut pool: ResMut<FootprintPool>,
    rapier: ReadRapierContext,
    scanner: Res<ScannerState>,
    icons: Res<IconEffect>,
    config: Res<TerrainScanConfig>,
    player: Query<(&Transform, &Facing), With<Player>>,
    terrain: Query<&TerrainPatch>,
    time: Res<Time>,
) {
    if footsteps.is_empty() {
        return;
    }
    let Ok((transform, facing)) = player.single() else {
        return;
    };
    let Ok(rapier) = rapier.single() else {
        return;
    };

    let icon_total = config
        .icons
        .total_effect_duration(config.scanner.total_scan_duration());

    for footstep in footsteps.read() {
        let Some(hit) = ground_probe(
            &rapier,
            &terrain,
            transform.translation.truncate(),
            facing.0,
            footstep.side,
        ) else {
            // Probe miss: no footstep.
            continue;
        };

        let highlighted = icons.is_active() && scanner.is_point_inside(hit.point);
        let scan_elapsed = (time.elapsed_secs_f64() - scanner.start_time) as f32;
        let lifetime = compute_lifetime(&config.footprints, highlighted, icon_total, scan_elapsed);

        // The record is the single source of the placement; the decal is
        // rendered from its fields.
        let record = FootprintRecord {
            location: hit.point,
            orientation: footprint_orientation(hit.forward),
            side: footstep.side,
            age: 0.0,
            lifetime,
            is_highlighted: highlighted,
            decal: commands.spawn_empty().id(),
        };
        commands.entity(record.decal).insert((
            footprint_sprite(&config.footprints, record.side, record.is_highlighted),
            Transform::from_translation(record.location.truncate().extend(FOOTPRINT_Z))
                .with_rotation(Quat::from_rotation_z(record.orientation)),
            FootprintDecal,
        ));

        let evicted = pool.push(record, config.footprints.max_footprints);

        if let Some(evicted) = evicted {
            commands.entity(evicted).insert(MarkedForDespawn);
        }
    }
}

pub fn age_footprints(
    mut commands: Commands,
    mut pool: ResMut<FootprintPool>,
    mut material_params: ResMut<MaterialParams>,
    scanner: Res<ScannerState>,
    config: Res<TerrainScanConfig>,
    time: Res<Time>,
) {
    for decal in pool.age(time.delta_secs()) {
        commands.entity(decal).insert(MarkedForDespawn);
    }

    // Shader-side highlight fade clock, relative to the end of the icon
    // reveal effect.
    let icon_total = config
        .icons
        .total_effect_duration(config.scanner.total_scan_duration());
    let scan_elapsed = (time.elapsed_secs_f64() - scanner.start_time) as f32;
    let relative = (scan_elapsed - icon_total).clamp(0.0, config.footprints.highlight_fade_time);
    material_params.set_scalar(params::FOOTPRINT_RELATIVE_HIGHLIGHT_TIME, relative);
}

/// Re-evaluates every surviving footprint against the freshly started
/// pulse.
pub fn reclassify_on_scan(
    mut scan_started: EventReader<ScanStartedEvent>,
    mut pool: ResMut<FootprintPool>,
    mut decals: Query<&mut Sprite, With<FootprintDecal>>,
    scanner: Res<ScannerState>,
    config: Res<TerrainScanConfig>,
    time: Res<Time>,
) {
    if scan_started.is_empty() {
        return;
    }
    scan_started.clear();

    let icon_total = config
        .icons
        .total_effect_duration(config.scanner.total_scan_duration());
    let scan_elapsed = (time.elapsed_secs_f64() - scanner.start_time) as f32;

    for record in pool.records_mut() {
        let inside = scanner.is_point_inside(record.location);
        let outcome = reclassify_record(
            record,
            inside,
            &config.footprints,
            icon_total,
            scan_elapsed,
        );

        if outcome == ReclassifyOutcome::SwapVariant {
            if let Ok(mut sprite) = decals.get_mut(record.decal) {
                *sprite = footprint_sprite(&config.footprints, record.side, record.is_highlighted);
            }
        }
    }
}

/// Fades each decal out over the final `fade_time` of its lifetime.
pub fn fade_footprint_decals(
    pool: Res<FootprintPool>,
    config: Res<TerrainScanConfig>,
    mut decals: Query<&mut Sprite, With<FootprintDecal>>,
) {
    for record in pool.records() {
        let Ok(mut sprite) = decals.get_mut(record.decal) else {
            continue;
        };

        let fade_start = record.lifetime - config.footprints.fade_time;
        if record.age > fade_start {
            let t = ((record.age - fade_start) / config.footprints.fade_time).clamp(0.0, 1.0);
            sprite
                .color
                .set_alpha(footprint_color(record.is_highlighted).alpha() * (1.0 - t));
        }
    }
}
