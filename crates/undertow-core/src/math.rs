use glam::{Mat4, Vec4};

/// Invert `m`, returning `None` when it is singular or produces non-finite values.
///
/// No magnitude threshold is applied to the determinant: its size scales with
/// the matrix, so wide orthographic views legitimately have tiny determinants.
pub fn checked_inverse(m: Mat4) -> Option<Mat4> {
    let det = m.determinant();
    if !det.is_finite() || det == 0.0 {
        return None;
    }
    let inv = m.inverse();
    inv.is_finite().then_some(inv)
}

/// Convert one sRGB-encoded channel to linear.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert an sRGB colour to linear. Alpha is left untouched.
pub fn srgb_color_to_linear(color: Vec4) -> Vec4 {
    Vec4::new(
        srgb_to_linear(color.x),
        srgb_to_linear(color.y),
        srgb_to_linear(color.z),
        color.w,
    )
}

/// Element-wise relative comparison: |a - b| <= tol * max(1, |a|, |b|).
pub fn mat4_relative_eq(a: &Mat4, b: &Mat4, tol: f32) -> bool {
    a.to_cols_array()
        .iter()
        .zip(b.to_cols_array().iter())
        .all(|(x, y)| (x - y).abs() <= tol * 1.0f32.max(x.abs()).max(y.abs()))
}
