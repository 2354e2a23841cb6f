use super::cubic::CubicBezier;
use super::math::dist_point_to_seg_sq;
use super::tolerance::MAX_FLATTEN_DEPTH;
use crate::model::Vec2;

/// Append a polyline approximation of `c` (excluding `c.p0`) to `points`.
pub fn flatten_cubic(points: &mut Vec<Vec2>, c: &CubicBezier, tol: f32, depth: u32) {
    let d1 = dist_point_to_seg_sq(c.p1, c.p0, c.p3);
    let d2 = dist_point_to_seg_sq(c.p2, c.p0, c.p3);
    if d1.max(d2) <= tol * tol || depth > MAX_FLATTEN_DEPTH {
        points.push(c.p3);
        return;
    }
    let (a, b) = c.split_at(0.5);
    flatten_cubic(points, &a, tol, depth + 1);
    flatten_cubic(points, &b, tol, depth + 1);
}
