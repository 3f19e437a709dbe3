use bevy::prelude::*;
use std::collections::HashMap;

/// Names of the shader-facing parameters the effect drives.
pub mod params {
    pub const TERRAIN_SCAN_RANGE: &str = "_Terrain_Scan_Range";
    pub const TERRAIN_SCAN_ORIGIN: &str = "_Terrain_Scan_Origin";
    pub const TERRAIN_SCAN_DIRECTION: &str = "_Terrain_Scan_Direction";
    pub const TERRAIN_SCAN_ARC_ANGLE: &str = "_Terrain_Scan_Arc_Angle";
    pub const EFFECT_OPACITY: &str = "_Effect_Opacity";
    pub const DARK_CIRCLE_OPACITY: &str = "_Dark_Circle_Opacity";
    pub const DARK_CIRCLE_SIZE: &str = "_Dark_Circle_Size";
    pub const FOOTPRINT_HIGHLIGHT_FADE_TIME: &str = "_Footprint_Highlight_Fade_Time";
    pub const FOOTPRINT_RELATIVE_HIGHLIGHT_TIME: &str = "_Footprint_Relative_Highlight_Time";
}

/// Named-parameter sink for values that would drive shader uniforms in a
/// full rendering stack. The simulation only ever writes to it; whatever
/// renders the effect reads it.
#[derive(Resource, Default)]
pub struct MaterialParams {
    scalars: HashMap<&'static str, f32>,
    vectors: HashMap<&'static str, Vec3>,
}

impl MaterialParams {
    pub fn set_scalar(&mut self, name: &'static str, value: f32) {
        self.scalars.insert(name, value);
    }

    pub fn set_vector(&mut self, name: &'static str, value: Vec3) {
        self.vectors.insert(name, value);
    }

    pub fn scalar(&self, name: &str) -> Option<f32> {
        self.scalars.get(name).copied()
    }

    pub fn vector(&self, name: &str) -> Option<Vec3> {
        self.vectors.get(name).copied()
    }
}
