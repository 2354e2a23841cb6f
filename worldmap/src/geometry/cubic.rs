//! Cubic bezier for bezier-mode paths: `start`, `handle1`, `handle2`, `end` map onto `p0..p3`.

use super::math::lerp;
use super::tolerance::MAX_FLATTEN_DEPTH;
use crate::model::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    pub p3: Vec2,
}

impl CubicBezier {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        CubicBezier { p0, p1, p2, p3 }
    }

    /// Point at `t` in [0, 1], Bernstein form.
    pub fn eval(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        let (b0, b1, b2, b3) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        self.p0 * b0 + self.p1 * b1 + self.p2 * b2 + self.p3 * b3
    }

    /// De Casteljau split into the `0..t` and `t..1` halves.
    pub fn split_at(&self, t: f32) -> (CubicBezier, CubicBezier) {
        let [a, b, c] = [
            lerp(self.p0, self.p1, t),
            lerp(self.p1, self.p2, t),
            lerp(self.p2, self.p3, t),
        ];
        let (ab, bc) = (lerp(a, b, t), lerp(b, c, t));
        let mid = lerp(ab, bc, t);
        (
            CubicBezier::new(self.p0, a, ab, mid),
            CubicBezier::new(mid, bc, c, self.p3),
        )
    }

    fn hull_length(&self) -> f32 {
        self.p0.distance_to(self.p1) + self.p1.distance_to(self.p2) + self.p2.distance_to(self.p3)
    }

    /// Length within `tolerance`: halves the curve until hull and chord agree.
    pub fn arc_length(&self, tolerance: f32) -> f32 {
        let mut total = 0.0;
        let mut stack = vec![(*self, 0u32)];
        while let Some((c, depth)) = stack.pop() {
            let chord = c.p0.distance_to(c.p3);
            let hull = c.hull_length();
            if hull - chord <= tolerance || depth >= MAX_FLATTEN_DEPTH {
                total += (chord + hull) * 0.5;
            } else {
                let (l, r) = c.split_at(0.5);
                stack.push((r, depth + 1));
                stack.push((l, depth + 1));
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tolerance::approx_eq_vec;

    fn hump() -> CubicBezier {
        CubicBezier::new(
            Vec2::ZERO,
            Vec2::new(0.0, 30.0),
            Vec2::new(30.0, 30.0),
            Vec2::new(30.0, 0.0),
        )
    }

    #[test]
    fn eval_hits_endpoints_and_apex() {
        let c = hump();
        assert_eq!(c.eval(0.0), c.p0);
        assert!(approx_eq_vec(c.eval(1.0), c.p3, 1e-5));
        assert!(approx_eq_vec(c.eval(0.5), Vec2::new(15.0, 22.5), 1e-4));
    }

    #[test]
    fn halves_trace_the_whole_curve() {
        let c = hump();
        let (l, r) = c.split_at(0.25);
        for i in 0..=8 {
            let t = i as f32 / 8.0;
            assert!(approx_eq_vec(l.eval(t), c.eval(t * 0.25), 1e-4), "left t={}", t);
            assert!(approx_eq_vec(r.eval(t), c.eval(0.25 + t * 0.75), 1e-4), "right t={}", t);
        }
    }

    #[test]
    fn collinear_length_is_exact() {
        let c = CubicBezier::new(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(20.0, 0.0),
            Vec2::new(30.0, 0.0),
        );
        assert!((c.arc_length(0.01) - 30.0).abs() < 1e-4);
        let bent = hump().arc_length(0.01);
        assert!(bent > 30.0 * 1.5 && bent < 90.0, "got {}", bent);
    }
}
