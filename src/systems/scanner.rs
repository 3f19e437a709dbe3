// src/systems/scanner.rs - Scan pulse engine
use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::core::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPhase {
    #[default]
    Inactive,
    Spawning,
    Prewarm,
    Expanding,
}

/// State of the scan pulse at a given frame. Replaced wholesale each time
/// a new lifecycle starts; origin and direction stay frozen for the
/// lifetime of one pulse.
///
/// Note: `phase_elapsed` is relative to the current phase, not to the
/// start of the whole lifecycle.
#[derive(Resource, Debug, Clone, Default)]
pub struct ScannerState {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Half the arc aperture, in degrees.
    pub half_angle: f32,
    pub phase: ScanPhase,
    pub phase_elapsed: f32,
    pub start_time: f64,
    pub range: f32,
    pub speed: f32,
    pub opacity: f32,
    pub dark_circle_opacity: f32,
}

impl ScannerState {
    pub fn is_active(&self) -> bool {
        self.phase != ScanPhase::Inactive
    }

    /// Starts a new lifecycle from the given origin and bearing. A pulse
    /// that is already running absorbs the trigger instead of queueing it.
    /// Returns whether the lifecycle actually started.
    pub fn start_lifecycle(
        &mut self,
        config: &ScannerConfig,
        origin: Vec3,
        direction: Vec3,
        now: f64,
    ) -> bool {
        if self.is_active() {
            return false;
        }

        *self = Self {
            origin,
            direction: direction.normalize_or_zero(),
            half_angle: config.arc_angle / 2.0,
            phase: ScanPhase::Spawning,
            phase_elapsed: 0.0,
            start_time: now,
            range: config.initial_range,
            speed: config.initial_speed,
            opacity: 0.0,
            dark_circle_opacity: 1.0,
        };
        true
    }

    /// Advances the phase machine by `dt` seconds. No-op while inactive.
    pub fn tick(&mut self, config: &ScannerConfig, dt: f32) {
        if !self.is_active() {
            return;
        }

        self.phase_elapsed += dt;

        // At most one transition per tick: configured durations are large
        // relative to frame time. The overflow remainder carries into the
        // next phase so no sub-frame time is lost at the boundary.
        match self.phase {
            ScanPhase::Spawning if self.phase_elapsed >= config.spawn_duration => {
                self.phase_elapsed -= config.spawn_duration;
                self.phase = ScanPhase::Prewarm;
            }
            ScanPhase::Prewarm if self.phase_elapsed >= config.prewarm_duration => {
                self.phase_elapsed -= config.prewarm_duration;
                self.phase = ScanPhase::Expanding;
            }
            ScanPhase::Expanding if self.phase_elapsed >= config.expansion_duration => {
                self.phase = ScanPhase::Inactive;
            }
            _ => {}
        }

        self.update_speed_and_range(config, dt);
        self.update_opacity(config);
    }

    fn update_speed_and_range(&mut self, config: &ScannerConfig, dt: f32) {
        // Split-delta rule: when a phase boundary fell inside this tick,
        // the part of dt spent before the boundary integrates at the old
        // phase's speed, the remainder at the recomputed one. Range growth
        // stays continuous across the boundary.
        if dt > self.phase_elapsed {
            self.range += (dt - self.phase_elapsed) * self.speed;
        }

        self.speed = match self.phase {
            ScanPhase::Spawning => {
                let t = (self.phase_elapsed / config.spawn_duration).clamp(0.0, 1.0);
                config.initial_speed.lerp(config.prewarm_speed, t)
            }
            ScanPhase::Prewarm => config.prewarm_speed,
            ScanPhase::Expanding => {
                if self.phase_elapsed <= config.max_speed_duration {
                    let t = (self.phase_elapsed / config.max_speed_duration).clamp(0.0, 1.0);
                    config.prewarm_speed.lerp(config.max_speed, t)
                } else {
                    let t = ((self.phase_elapsed - config.max_speed_duration)
                        / (config.expansion_duration - config.max_speed_duration))
                        .clamp(0.0, 1.0);
                    config.max_speed.lerp(config.final_speed, t)
                }
            }
            ScanPhase::Inactive => 0.0,
        };

        self.range += dt.min(self.phase_elapsed) * self.speed;
    }

    fn update_opacity(&mut self, config: &ScannerConfig) {
        match self.phase {
            ScanPhase::Spawning => {
                let t = (self.phase_elapsed / config.spawn_duration).clamp(0.0, 1.0);
                self.opacity = config.spawn_final_opacity * t;
                self.dark_circle_opacity = 1.0;
            }
            // Held as-is.
            ScanPhase::Prewarm => {}
            ScanPhase::Expanding => {
                let fadeout_start = config.expansion_duration - config.fadeout_duration;
                if self.phase_elapsed >= fadeout_start {
                    let t = ((self.phase_elapsed - fadeout_start) / config.fadeout_duration)
                        .clamp(0.0, 1.0);
                    self.opacity = config.spawn_final_opacity.lerp(0.0, t);
                }

                let dark_fadeout_start =
                    config.expansion_duration - config.dark_circle_fadeout_duration;
                if self.phase_elapsed >= dark_fadeout_start {
                    let t = ((self.phase_elapsed - dark_fadeout_start)
                        / config.dark_circle_fadeout_duration)
                        .clamp(0.0, 1.0);
                    self.dark_circle_opacity = 1.0 - t;
                }
            }
            ScanPhase::Inactive => {
                self.opacity = 0.0;
                self.dark_circle_opacity = 0.0;
            }
        }
    }

    /// Returns true if the point lies inside the pulse's azimuthal sweep.
    ///
    /// Angular gate only: the pulse rendering handles the radial cutoff,
    /// so range is deliberately ignored here. Both vectors are projected
    /// onto the ground plane before the cosine comparison.
    pub fn is_point_inside(&self, point: Vec3) -> bool {
        let to_point = (point - self.origin).truncate();
        // A zero-distance point sits inside any aperture.
        if to_point.length_squared() <= f32::EPSILON {
            return true;
        }

        let cos_between = self
            .direction
            .truncate()
            .normalize_or_zero()
            .dot(to_point.normalize());
        cos_between >= self.half_angle.to_radians().cos()
    }
}

// === SYSTEMS ===

pub fn handle_scan_input(
    mut scan_requests: EventWriter<ScanRequestedEvent>,
    player: Query<&ActionState<PlayerAction>, With<Player>>,
) {
    let Ok(action_state) = player.single() else {
        return;
    };

    if action_state.just_pressed(&PlayerAction::Scan) {
        scan_requests.write(ScanRequestedEvent);
    }
}

pub fn begin_scan_lifecycle(
    mut scan_requests: EventReader<ScanRequestedEvent>,
    mut scan_started: EventWriter<ScanStartedEvent>,
    mut scanner: ResMut<ScannerState>,
    mut material_params: ResMut<MaterialParams>,
    config: Res<TerrainScanConfig>,
    player: Query<(&Transform, &Facing), With<Player>>,
    time: Res<Time>,
) {
    if scan_requests.is_empty() {
        return;
    }
    scan_requests.clear();

    let Ok((transform, facing)) = player.single() else {
        return;
    };

    let started = scanner.start_lifecycle(
        &config.scanner,
        transform.translation,
        facing.0.extend(0.0),
        time.elapsed_secs_f64(),
    );
    if !started {
        // Already running: the trigger is rate-limited by the phase
        // machine itself.
        return;
    }

    material_params.set_vector(params::TERRAIN_SCAN_ORIGIN, scanner.origin);
    material_params.set_vector(params::TERRAIN_SCAN_DIRECTION, scanner.direction);

    info!("scan pulse started at {:?}", scanner.origin.truncate());
    scan_started.write(ScanStartedEvent);
}

pub fn tick_scanner(
    mut scanner: ResMut<ScannerState>,
    mut material_params: ResMut<MaterialParams>,
    config: Res<TerrainScanConfig>,
    time: Res<Time>,
) {
    if !scanner.is_active() {
        return;
    }

    scanner.tick(&config.scanner, time.delta_secs());

    material_params.set_scalar(params::TERRAIN_SCAN_RANGE, scanner.range);
    material_params.set_scalar(params::EFFECT_OPACITY, scanner.opacity);
    material_params.set_scalar(params::DARK_CIRCLE_OPACITY, scanner.dark_circle_opacity);
}

/// Seeds the parameter sink with the session-constant values and zeroed
/// animated ones, before the first frame renders anything.
pub fn setup_scan_material_params(
    mut material_params: ResMut<MaterialParams>,
    config: Res<TerrainScanConfig>,
) {
    material_params.set_scalar(params::TERRAIN_SCAN_RANGE, 0.0);
    material_params.set_scalar(params::EFFECT_OPACITY, 0.0);
    material_params.set_scalar(params::DARK_CIRCLE_OPACITY, 0.0);
    material_params.set_scalar(params::TERRAIN_SCAN_ARC_ANGLE, config.scanner.arc_angle);
    material_params.set_scalar(params::DARK_CIRCLE_SIZE, config.scanner.dark_circle_size);
    material_params.set_scalar(
        params::FOOTPRINT_HIGHLIGHT_FADE_TIME,
        config.footprints.highlight_fade_time,
    );
}

// === PRESENTATION ===

const ARC_SEGMENTS: u32 = 48;

pub fn draw_scan_pulse(
    mut gizmos: Gizmos,
    scanner: Res<ScannerState>,
    config: Res<TerrainScanConfig>,
) {
    if !scanner.is_active() {
        return;
    }

    let origin = scanner.origin.truncate();
    let direction = scanner.direction.truncate().normalize_or_zero();
    let center_angle = direction.to_angle();
    let half = scanner.half_angle.to_radians();
    let color = Color::srgba(0.86, 0.98, 1.0, scanner.opacity);

    let mut prev: Option<Vec2> = None;
    for i in 0..=ARC_SEGMENTS {
        let angle = center_angle - half + (i as f32 / ARC_SEGMENTS as f32) * 2.0 * half;
        let point = origin + Vec2::from_angle(angle) * scanner.range;
        if let Some(prev) = prev {
            gizmos.line_2d(prev, point, color);
        }
        prev = Some(point);
    }
    gizmos.line_2d(
        origin,
        origin + Vec2::from_angle(center_angle - half) * scanner.range,
        color,
    );
    gizmos.line_2d(
        origin,
        origin + Vec2::from_angle(center_angle + half) * scanner.range,
        color,
    );

    let dark = Color::srgba(0.05, 0.08, 0.12, scanner.dark_circle_opacity * 0.8);
    gizmos.circle_2d(origin, config.scanner.dark_circle_size, dark);
}
