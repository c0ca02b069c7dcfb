// Centralized tolerances and helpers for robust geometry

pub const EPS_LEN: f32 = 1e-6; // zero-length segment threshold

#[inline]
pub fn clamp01(x: f32) -> f32 {
    x.max(0.0).min(1.0)
}
