//! Procedural placement of points along a path curve.
//!
//! A curve with `segment_count` gaps is sampled at `i = 0..=segment_count`.
//! Sample 0 is the leading anchor at `start`; nodes occupy the following samples.

use super::cubic::CubicBezier;
use super::flatten::flatten_cubic;
use super::math::{lerp, rotate, signed_angle};
use super::tolerance::{norm2, EPS_LEN};
use crate::model::{CurveMode, PathShape, Vec2};

const MAX_ARC_STEPS: usize = 256;

/// Number of gaps between samples for a path of `node_count` nodes.
pub fn segment_count(node_count: usize, end_with_empty: bool) -> usize {
    node_count + usize::from(end_with_empty)
}

/// Sample `i` of `segment_count` along the curve. `segment_count == 0` collapses onto `start`.
pub fn point_at(shape: &PathShape, i: usize, segment_count: usize) -> Vec2 {
    if segment_count == 0 {
        return shape.start;
    }
    point_at_t(shape, i as f32 / segment_count as f32)
}

/// Point at curve parameter `t` in [0, 1].
pub fn point_at_t(shape: &PathShape, t: f32) -> Vec2 {
    match shape.mode {
        CurveMode::Line => lerp(shape.start, shape.end, t),
        CurveMode::Arc => {
            let center = shape.handle1;
            rotate(shape.start - center, arc_angle(shape) * t) + center
        }
        CurveMode::Bezier => bezier_of(shape).eval(t),
    }
}

/// Signed sweep of an arc shape, from `start` to `end` around `handle1`.
pub fn arc_angle(shape: &PathShape) -> f32 {
    signed_angle(shape.start - shape.handle1, shape.end - shape.handle1)
}

pub fn arc_radius(shape: &PathShape) -> f32 {
    shape.start.distance_to(shape.handle1)
}

fn bezier_of(shape: &PathShape) -> CubicBezier {
    CubicBezier::new(shape.start, shape.handle1, shape.handle2, shape.end)
}

/// Spacing between adjacent samples.
///
/// Undefined for bezier curves, which have no uniform spacing: callers must not ask,
/// and get `None` if they do. `None` as well when there is no gap to measure.
pub fn distance_between_points(shape: &PathShape, segment_count: usize) -> Option<f32> {
    if segment_count == 0 {
        return None;
    }
    match shape.mode {
        CurveMode::Line => Some(shape.start.distance_to(shape.end) / segment_count as f32),
        CurveMode::Arc => {
            let step = arc_angle(shape) / segment_count as f32;
            let first = shape.start - shape.handle1;
            Some(first.distance_to(rotate(first, step)))
        }
        CurveMode::Bezier => None,
    }
}

/// New `end` that makes adjacent samples `target` apart. `start` is the fixed anchor.
///
/// Arcs keep their current winding; a target wider than the diameter saturates at a
/// half-turn step. Bezier curves are not solvable and return `None`.
///
/// Arc sweep is measured in (-π, π], so an arc solve only round-trips through
/// [`distance_between_points`] while `step * segment_count` stays within a half
/// turn. Past that the placed end wraps and reads back as a shorter sweep.
pub fn solve_distance_between_points(
    shape: &PathShape,
    segment_count: usize,
    target: f32,
) -> Option<Vec2> {
    if segment_count == 0 || !target.is_finite() || target < 0.0 {
        return None;
    }
    let segments = segment_count as f32;
    match shape.mode {
        CurveMode::Line => {
            let (dir, len) = norm2(shape.end - shape.start);
            let dir = if len > 0.0 { dir } else { Vec2::new(1.0, 0.0) };
            Some(shape.start + dir * (target * segments))
        }
        CurveMode::Arc => {
            let radius = arc_radius(shape);
            if radius <= EPS_LEN {
                return None;
            }
            let step = (target / (2.0 * radius)).clamp(-1.0, 1.0).asin() * 2.0;
            let winding = if arc_angle(shape) < 0.0 { -1.0 } else { 1.0 };
            let total = step * segments * winding;
            Some(rotate(shape.start - shape.handle1, total) + shape.handle1)
        }
        CurveMode::Bezier => None,
    }
}

/// Length of the whole curve; bezier length is approximated within `tolerance`.
pub fn curve_length(shape: &PathShape, tolerance: f32) -> f32 {
    match shape.mode {
        CurveMode::Line => shape.start.distance_to(shape.end),
        CurveMode::Arc => arc_radius(shape) * arc_angle(shape).abs(),
        CurveMode::Bezier => bezier_of(shape).arc_length(tolerance),
    }
}

/// Polyline through the curve, starting at `start`, deviating at most `tolerance`.
pub fn flatten(shape: &PathShape, tolerance: f32) -> Vec<Vec2> {
    let mut points = vec![shape.start];
    match shape.mode {
        CurveMode::Line => points.push(shape.end),
        CurveMode::Arc => {
            let radius = arc_radius(shape);
            let sweep = arc_angle(shape);
            let steps = if radius <= tolerance || sweep.abs() <= EPS_LEN {
                1
            } else {
                // sagitta of each chord stays within tolerance
                let max_step = 2.0 * (1.0 - tolerance / radius).clamp(-1.0, 1.0).acos();
                ((sweep.abs() / max_step).ceil() as usize).clamp(1, MAX_ARC_STEPS)
            };
            points.extend((1..=steps).map(|i| point_at(shape, i, steps)));
        }
        CurveMode::Bezier => flatten_cubic(&mut points, &bezier_of(shape), tolerance, 0),
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tolerance::approx_eq_vec;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn line_endpoints_and_thirds() {
        let shape = PathShape::line(v(0.0, 0.0), v(100.0, 0.0));
        assert_eq!(point_at(&shape, 0, 3), shape.start);
        assert!(approx_eq_vec(point_at(&shape, 3, 3), shape.end, 1e-4));
        assert!(approx_eq_vec(point_at(&shape, 1, 3), v(33.333_332, 0.0), 1e-3));
        assert!(approx_eq_vec(point_at(&shape, 2, 3), v(66.666_664, 0.0), 1e-3));
    }

    #[test]
    fn zero_segments_collapse_to_start() {
        let shape = PathShape::line(v(5.0, 5.0), v(10.0, 5.0));
        assert_eq!(point_at(&shape, 0, 0), shape.start);
        assert_eq!(distance_between_points(&shape, 0), None);
        assert_eq!(solve_distance_between_points(&shape, 0, 4.0), None);
    }

    #[test]
    fn segment_count_adds_trailing_slot() {
        assert_eq!(segment_count(3, false), 3);
        assert_eq!(segment_count(3, true), 4);
        assert_eq!(segment_count(0, false), 0);
    }

    #[test]
    fn arc_samples_stay_on_circle() {
        let shape = PathShape::arc(v(0.0, 0.0), v(10.0, 0.0), v(0.0, 10.0));
        for i in 0..=4 {
            let p = point_at(&shape, i, 4);
            assert!((p.length() - 10.0).abs() < 1e-4, "sample {} off circle: {:?}", i, p);
        }
        assert!(approx_eq_vec(point_at(&shape, 4, 4), shape.end, 1e-4));
        let mid = point_at(&shape, 2, 4);
        let h = 10.0 * std::f32::consts::FRAC_1_SQRT_2;
        assert!(approx_eq_vec(mid, v(h, h), 1e-4));
    }

    #[test]
    fn arc_chord_distance() {
        let shape = PathShape::arc(v(0.0, 0.0), v(10.0, 0.0), v(-10.0, 0.0001));
        // half-turn in two steps: chord of a quarter turn
        let d = distance_between_points(&shape, 2).unwrap();
        assert!((d - 10.0 * 2f32.sqrt()).abs() < 1e-2, "got {}", d);
    }

    #[test]
    fn solve_line_keeps_start_and_direction() {
        let shape = PathShape::line(v(10.0, 10.0), v(10.0, 20.0));
        let end = solve_distance_between_points(&shape, 4, 5.0).unwrap();
        assert!(approx_eq_vec(end, v(10.0, 30.0), 1e-4));
    }

    #[test]
    fn solve_degenerate_line_points_right() {
        let shape = PathShape::line(v(1.0, 1.0), v(1.0, 1.0));
        let end = solve_distance_between_points(&shape, 2, 3.0).unwrap();
        assert!(approx_eq_vec(end, v(7.0, 1.0), 1e-4));
    }

    #[test]
    fn solve_arc_round_trip() {
        let shape = PathShape::arc(v(50.0, 50.0), v(80.0, 50.0), v(50.0, 80.0));
        let end = solve_distance_between_points(&shape, 5, 6.0).unwrap();
        let solved = PathShape { end, ..shape };
        assert!((arc_radius(&solved) - end.distance_to(shape.handle1)).abs() < 1e-3);
        let d = distance_between_points(&solved, 5).unwrap();
        assert!((d - 6.0).abs() < 1e-3, "got {}", d);
    }

    #[test]
    fn solve_arc_keeps_clockwise_winding() {
        let shape = PathShape::arc(v(0.0, 0.0), v(10.0, 0.0), v(0.0, -10.0));
        assert!(arc_angle(&shape) < 0.0);
        let end = solve_distance_between_points(&shape, 3, 2.0).unwrap();
        assert!(end.y < 0.0);
    }

    #[test]
    fn bezier_distance_is_undefined() {
        let shape = PathShape::bezier(v(0.0, 0.0), v(0.0, 10.0), v(10.0, 10.0), v(10.0, 0.0));
        assert_eq!(distance_between_points(&shape, 3), None);
        assert_eq!(solve_distance_between_points(&shape, 3, 1.0), None);
        assert!(approx_eq_vec(point_at(&shape, 3, 3), shape.end, 1e-4));
    }

    #[test]
    fn flatten_ends_on_curve_end() {
        let arc = PathShape::arc(v(0.0, 0.0), v(100.0, 0.0), v(0.0, 100.0));
        let pts = flatten(&arc, 0.25);
        assert!(pts.len() > 2);
        assert_eq!(pts[0], arc.start);
        assert!(approx_eq_vec(*pts.last().unwrap(), arc.end, 1e-3));

        let bez = PathShape::bezier(v(0.0, 0.0), v(0.0, 50.0), v(50.0, 50.0), v(50.0, 0.0));
        let pts = flatten(&bez, 0.25);
        assert!(approx_eq_vec(*pts.last().unwrap(), bez.end, 1e-4));
    }

    #[test]
    fn arc_length_is_radius_times_sweep() {
        let arc = PathShape::arc(v(0.0, 0.0), v(10.0, 0.0), v(0.0, 10.0));
        let len = curve_length(&arc, 0.1);
        assert!((len - 10.0 * std::f32::consts::FRAC_PI_2).abs() < 1e-3);
    }
}
