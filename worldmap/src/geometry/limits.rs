// Caps on host-supplied values; a mistyped count must not allocate millions of slots

pub const MAX_RECORDS: usize = 100_000;

// Numeric bounds
pub const COORD_MIN: f32 = -10_000_000.0;
pub const COORD_MAX: f32 =  10_000_000.0;

#[inline]
pub fn in_coord_bounds(x: f32) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }

#[inline]
pub fn vec_in_bounds(v: crate::model::Vec2) -> bool { in_coord_bounds(v.x) && in_coord_bounds(v.y) }
