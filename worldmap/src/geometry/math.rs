use super::tolerance::{clamp01, EPS_LEN};
use crate::model::Vec2;

pub fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Rotate `v` counter-clockwise (y-down: clockwise on screen) by `angle` radians.
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// Signed angle in (-pi, pi] taking `from` onto `to`.
pub fn signed_angle(from: Vec2, to: Vec2) -> f32 {
    if from.length() <= EPS_LEN || to.length() <= EPS_LEN {
        return 0.0;
    }
    from.cross(to).atan2(from.dot(to))
}

/// Squared distance from `p` to segment `a..b`, and the clamped parameter of the projection.
pub fn seg_distance_sq(p: Vec2, a: Vec2, b: Vec2) -> (f32, f32) {
    let v = b - a;
    let w = p - a;
    let vv = v.dot(v);
    let t = if vv > 0.0 { clamp01(w.dot(v) / vv) } else { 0.0 };
    let proj = a + v * t;
    let d = p - proj;
    (d.dot(d), t)
}

pub fn dist_point_to_seg_sq(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    seg_distance_sq(p, a, b).0
}
