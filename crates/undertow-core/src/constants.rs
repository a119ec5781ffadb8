//! Shared constants for the underwater effect.
//! Values that also appear in shader code are kept here so both sides agree.

/// Viewer height above the water surface (world units) beyond which the effect
/// is skipped. The comparison is strict: exactly this height is still active.
pub const HEIGHT_ABOVE_WATER_THRESHOLD: f32 = 2.0;

/// Number of ocean data LOD cascades.
pub const MAX_LOD_COUNT: i32 = 15;

/// Largest allowed cascade offset when sampling ocean data. The last LOD is
/// excluded because it cross-fades data in and out.
pub const MAX_FILTER_OCEAN_DATA: i32 = MAX_LOD_COUNT - 2;

/// Default cascade offset: shift as far as allowed.
pub const DEFAULT_FILTER_OCEAN_DATA: i32 = MAX_FILTER_OCEAN_DATA;

/// Lower bound of the depth fog density factor.
pub const MIN_DEPTH_FOG_DENSITY_FACTOR: f32 = 0.01;

/// Upper bound of the depth fog density factor.
pub const MAX_DEPTH_FOG_DENSITY_FACTOR: f32 = 1.0;

/// Default depth fog density factor (no scaling).
pub const DEFAULT_DEPTH_FOG_DENSITY_FACTOR: f32 = 1.0;

/// Default far plane multiplier for horizon line placement.
pub const DEFAULT_FAR_PLANE_MULTIPLIER: f32 = 0.68;

/// Eye pass index used when no stereo rendering is running.
pub const NO_EYE_PASS: i32 = -1;

/// Direction in which the ambient light probe is evaluated. The zero vector
/// keeps only the direction-independent terms of the L2 expansion.
pub const AMBIENT_SAMPLE_DIRECTION: [f32; 3] = [0.0, 0.0, 0.0];
