use undertow_core::constants::HEIGHT_ABOVE_WATER_THRESHOLD;

use crate::ocean::OceanProvider;

/// Decide whether the underwater effect should run this frame.
///
/// Inactive when there is no ocean, or when the height optimization is on and
/// the viewer is more than [`HEIGHT_ABOVE_WATER_THRESHOLD`] above the surface.
pub fn is_active<O: OceanProvider + ?Sized>(ocean: &O, disable_height_optimization: bool) -> bool {
    if !ocean.has_active_world() {
        return false;
    }

    if !disable_height_optimization
        && ocean.viewer_height_above_water() > HEIGHT_ABOVE_WATER_THRESHOLD
    {
        return false;
    }

    true
}
