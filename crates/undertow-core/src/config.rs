use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DEPTH_FOG_DENSITY_FACTOR, DEFAULT_FAR_PLANE_MULTIPLIER, DEFAULT_FILTER_OCEAN_DATA,
    MAX_DEPTH_FOG_DENSITY_FACTOR, MAX_FILTER_OCEAN_DATA, MIN_DEPTH_FOG_DENSITY_FACTOR,
};
use crate::error::UnderwaterError;

/// Debug switches. All off by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DebugOverrides {
    /// Show the ocean mask instead of the composited effect.
    #[serde(default)]
    pub view_ocean_mask: bool,
    /// Skip drawing into the ocean mask.
    #[serde(default)]
    pub disable_ocean_mask: bool,
    /// Keep the effect running even when the viewer is well above the water.
    #[serde(default)]
    pub disable_height_above_water_optimization: bool,
    /// Turn off the mask edge artifact correction in the effect pass.
    #[serde(default)]
    pub disable_artifact_correction: bool,
}

/// Host-settable tunables for one underwater effect instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnderwaterConfig {
    /// Cascade offset used when sampling ocean data. Smooths flicker under camera motion.
    #[serde(default = "default_filter_ocean_data")]
    pub filter_ocean_data: i32,
    /// Draw a meniscus at the water/air boundary.
    #[serde(default = "default_true")]
    pub meniscus: bool,
    /// Scales the depth fog density when underwater.
    #[serde(default = "default_depth_fog_density_factor")]
    pub depth_fog_density_factor: f32,
    /// Composite before the transparent stage so transparent objects can apply
    /// the fog themselves. Read once when the passes are attached.
    #[serde(default)]
    pub before_transparent: bool,
    /// Mirror ocean material parameters every frame instead of only on the first.
    #[serde(default = "default_true")]
    pub copy_ocean_material_params_each_frame: bool,
    /// Scales the far plane used for the horizon line.
    #[serde(default = "default_far_plane_multiplier")]
    pub far_plane_multiplier: f32,
    #[serde(default)]
    pub debug: DebugOverrides,
}

fn default_true() -> bool {
    true
}

fn default_filter_ocean_data() -> i32 {
    DEFAULT_FILTER_OCEAN_DATA
}

fn default_depth_fog_density_factor() -> f32 {
    DEFAULT_DEPTH_FOG_DENSITY_FACTOR
}

fn default_far_plane_multiplier() -> f32 {
    DEFAULT_FAR_PLANE_MULTIPLIER
}

impl Default for UnderwaterConfig {
    fn default() -> Self {
        Self {
            filter_ocean_data: DEFAULT_FILTER_OCEAN_DATA,
            meniscus: true,
            depth_fog_density_factor: DEFAULT_DEPTH_FOG_DENSITY_FACTOR,
            before_transparent: false,
            copy_ocean_material_params_each_frame: true,
            far_plane_multiplier: DEFAULT_FAR_PLANE_MULTIPLIER,
            debug: DebugOverrides::default(),
        }
    }
}

impl UnderwaterConfig {
    /// Clamp every bounded field into range. NaN falls back to the default.
    pub fn sanitized(self) -> Self {
        let mut out = self;

        let filter = self.filter_ocean_data.clamp(0, MAX_FILTER_OCEAN_DATA);
        if filter != self.filter_ocean_data {
            log::warn!(
                "filter_ocean_data {} out of range 0..={}, clamped to {}",
                self.filter_ocean_data,
                MAX_FILTER_OCEAN_DATA,
                filter
            );
            out.filter_ocean_data = filter;
        }

        out.depth_fog_density_factor = clamp_f32(
            "depth_fog_density_factor",
            self.depth_fog_density_factor,
            MIN_DEPTH_FOG_DENSITY_FACTOR,
            MAX_DEPTH_FOG_DENSITY_FACTOR,
            DEFAULT_DEPTH_FOG_DENSITY_FACTOR,
        );

        out.far_plane_multiplier = clamp_f32(
            "far_plane_multiplier",
            self.far_plane_multiplier,
            0.0,
            1.0,
            DEFAULT_FAR_PLANE_MULTIPLIER,
        );

        out
    }
}

fn clamp_f32(name: &str, value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        log::warn!("{name} is NaN, using default {fallback}");
        return fallback;
    }
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("{name} {value} out of range {min}..={max}, clamped to {clamped}");
    }
    clamped
}

/// Parse an underwater config from RON and clamp it into range.
pub fn load_config_from_str(ron_str: &str) -> Result<UnderwaterConfig, UnderwaterError> {
    let options = ron::Options::default();
    let config: UnderwaterConfig = options
        .from_str(ron_str)
        .map_err(|e| UnderwaterError::ConfigParse(e.to_string()))?;
    Ok(config.sanitized())
}
