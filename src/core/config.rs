// src/core/config.rs - Scan effect configuration and tuning
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

const CONFIG_PATH: &str = "data/config/terrain_scan.json";

#[derive(Resource, Serialize, Deserialize, Clone, Default)]
pub struct TerrainScanConfig {
    pub scanner: ScannerConfig,
    pub footprints: FootprintConfig,
    pub icons: IconsConfig,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ScannerConfig {
    /// Full aperture of the scan arc, in degrees.
    pub arc_angle: f32,

    pub spawn_duration: f32,
    pub prewarm_duration: f32,
    pub expansion_duration: f32,
    pub fadeout_duration: f32,
    pub dark_circle_fadeout_duration: f32,

    pub initial_range: f32,
    pub initial_speed: f32,
    pub prewarm_speed: f32,
    pub max_speed: f32,
    /// How long the expansion phase spends accelerating to max speed; the
    /// remainder decelerates to final speed.
    pub max_speed_duration: f32,
    pub final_speed: f32,

    pub spawn_final_opacity: f32,
    pub dark_circle_size: f32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            arc_angle: 120.0,
            spawn_duration: 0.2,
            prewarm_duration: 0.3,
            expansion_duration: 2.5,
            fadeout_duration: 1.7,
            dark_circle_fadeout_duration: 1.7,
            initial_range: 500.0,
            initial_speed: 2000.0,
            prewarm_speed: 200.0,
            max_speed: 20000.0,
            max_speed_duration: 0.3,
            final_speed: 500.0,
            spawn_final_opacity: 0.55,
            dark_circle_size: 800.0,
        }
    }
}

impl ScannerConfig {
    pub fn total_scan_duration(&self) -> f32 {
        self.spawn_duration + self.prewarm_duration + self.expansion_duration
    }

    /// Closed-form range reached at the end of a lifecycle. For each phase
    /// the range grows linearly or at a linearly interpolated speed, so the
    /// integral is duration times average speed.
    pub fn final_range(&self) -> f32 {
        self.initial_range
            + self.spawn_duration * (self.initial_speed + self.prewarm_speed) / 2.0
            + self.prewarm_duration * self.prewarm_speed
            + self.max_speed_duration * (self.prewarm_speed + self.max_speed) / 2.0
            + (self.expansion_duration - self.max_speed_duration)
                * (self.max_speed + self.final_speed) / 2.0
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.spawn_duration <= 0.0
            || self.prewarm_duration <= 0.0
            || self.expansion_duration <= 0.0
        {
            return Err("scanner phase durations must be positive".into());
        }
        if self.arc_angle <= 0.0 || self.arc_angle > 360.0 {
            return Err("scanner arc_angle must be in (0, 360]".into());
        }
        if self.max_speed_duration <= 0.0 || self.max_speed_duration >= self.expansion_duration {
            return Err("scanner max_speed_duration must fall inside the expansion phase".into());
        }
        if self.fadeout_duration <= 0.0 || self.fadeout_duration > self.expansion_duration {
            return Err("scanner fadeout_duration must fit inside the expansion phase".into());
        }
        if self.dark_circle_fadeout_duration <= 0.0
            || self.dark_circle_fadeout_duration > self.expansion_duration
        {
            return Err("scanner dark_circle_fadeout_duration must fit inside the expansion phase".into());
        }
        if self.initial_speed < 0.0
            || self.prewarm_speed < 0.0
            || self.max_speed < 0.0
            || self.final_speed < 0.0
        {
            return Err("scanner speeds must be non-negative".into());
        }
        if self.initial_range < 0.0 {
            return Err("scanner initial_range must be non-negative".into());
        }
        if !(0.0..=1.0).contains(&self.spawn_final_opacity) {
            return Err("scanner spawn_final_opacity must be in [0, 1]".into());
        }
        if self.dark_circle_size <= 0.0 {
            return Err("scanner dark_circle_size must be positive".into());
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone)]
pub struct FootprintConfig {
    pub max_footprints: usize,
    pub base_lifetime: f32,
    /// Seconds a footprint takes to fade permanently at the end of its
    /// lifetime.
    pub fade_time: f32,
    /// Seconds the highlight effect takes to fade back into a regular
    /// footprint.
    pub highlight_fade_time: f32,
    pub decal_size: Vec2,
    /// Distance between footstep plants of the moving character.
    pub stride_length: f32,
}

impl Default for FootprintConfig {
    fn default() -> Self {
        Self {
            max_footprints: 99,
            base_lifetime: 10.0,
            fade_time: 5.0,
            highlight_fade_time: 10.0,
            decal_size: Vec2::new(10.0, 22.0),
            stride_length: 48.0,
        }
    }
}

impl FootprintConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_footprints == 0 {
            return Err("footprint max_footprints must be at least 1".into());
        }
        if self.base_lifetime <= 0.0 {
            return Err("footprint base_lifetime must be positive".into());
        }
        if self.fade_time < 0.0 || self.highlight_fade_time < 0.0 {
            return Err("footprint fade times must be non-negative".into());
        }
        if self.decal_size.cmple(Vec2::ZERO).any() {
            return Err("footprint decal_size must be positive".into());
        }
        if self.stride_length <= 0.0 {
            return Err("footprint stride_length must be positive".into());
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone)]
pub struct IconsConfig {
    pub grid_x: u32,
    pub grid_y: u32,
    /// Distance between neighbouring icons in the grid.
    pub padding: f32,

    /// Each cycle is a single reveal-fade animation.
    pub total_animation_cycles: u32,
    pub opacity_animation_speed: f32,
    /// Strength of the fade step; lower values give a sharper animation.
    pub fade_intensity_factor: f32,
    pub danger_icon_fadeout_time: f32,
    /// How far ahead of the scan edge danger icons show up.
    pub danger_icon_appear_offset: f32,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            grid_x: 75,
            grid_y: 140,
            padding: 60.0,
            total_animation_cycles: 2,
            opacity_animation_speed: 2000.0,
            fade_intensity_factor: 4000.0,
            danger_icon_fadeout_time: 5.0,
            danger_icon_appear_offset: 2000.0,
        }
    }
}

impl IconsConfig {
    pub fn icons_area_x(&self) -> f32 {
        (self.grid_x - 1) as f32 * self.padding
    }

    pub fn icons_area_y(&self) -> f32 {
        (self.grid_y - 1) as f32 * self.padding
    }

    fn max_effect_distance(&self) -> f32 {
        (self.icons_area_x().powi(2) + (self.icons_area_y() / 2.0).powi(2)).sqrt()
    }

    pub fn reveal_animation_duration(&self) -> f32 {
        self.max_effect_distance() / self.opacity_animation_speed
    }

    pub fn fade_animation_duration(&self) -> f32 {
        (self.max_effect_distance() + self.fade_intensity_factor) / self.opacity_animation_speed
    }

    /// Full duration of the icon reveal effect for a scan of the given
    /// total duration.
    pub fn total_effect_duration(&self, scan_total: f32) -> f32 {
        scan_total
            + self.danger_icon_fadeout_time
            + self.fade_animation_duration()
            + (self.reveal_animation_duration() + self.fade_animation_duration())
                * self.total_animation_cycles as f32
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.grid_x < 2 || self.grid_y < 2 {
            return Err("icons grid must be at least 2x2".into());
        }
        if self.padding <= 0.0 {
            return Err("icons padding must be positive".into());
        }
        if self.opacity_animation_speed <= 0.0 {
            return Err("icons opacity_animation_speed must be positive".into());
        }
        if self.fade_intensity_factor < 0.0
            || self.danger_icon_fadeout_time < 0.0
            || self.danger_icon_appear_offset < 0.0
        {
            return Err("icons animation parameters must be non-negative".into());
        }
        Ok(())
    }
}

impl TerrainScanConfig {
    pub fn load() -> Self {
        let config = match std::fs::read_to_string(CONFIG_PATH) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    error!("Failed to parse {CONFIG_PATH}: {e}");
                    Self::default()
                }
            },
            Err(e) => {
                warn!("No scan config at {CONFIG_PATH} ({e}), using defaults");
                Self::default()
            }
        };
        config.validated()
    }

    /// Startup validation gate. Tuning is fixed for the whole session, so a
    /// bad file is rejected wholesale rather than patched up.
    pub fn validated(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                error!("Invalid scan config: {e}; falling back to defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.scanner.validate()?;
        self.footprints.validate()?;
        self.icons.validate()
    }
}
