// Shared tolerances for layout math

pub const EPS_LEN: f32 = 1e-6;            // zero-length vector threshold

// Adaptive flattening cap
pub const MAX_FLATTEN_DEPTH: u32 = 16;

#[inline] pub fn clamp01(x: f32) -> f32 { x.max(0.0).min(1.0) }
#[inline] pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool { (a - b).abs() <= eps }

use crate::model::Vec2;

/// Unit vector and original length; zero-length input yields `(ZERO, 0.0)`.
#[inline]
pub fn norm2(v: Vec2) -> (Vec2, f32) {
    let len = v.length();
    if len > EPS_LEN { (v * (1.0 / len), len) } else { (Vec2::ZERO, 0.0) }
}

#[inline]
pub fn approx_eq_vec(a: Vec2, b: Vec2, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps)
}
