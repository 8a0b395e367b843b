//! Corner generation and the separating-axis overlap predicate.

use nalgebra::Vector2;

use super::types::{Aabb, SquarePose};

/// Four corners in fixed winding order. `P0` is the unrotated top-left, so
/// `P0→P1` and `P0→P3` are the two adjacent, orthogonal edges used as
/// separating axes elsewhere.
pub fn corners(pose: &SquarePose, side: f64) -> [Vector2<f64>; 4] {
    let c = pose.center(side);
    let (sin, cos) = pose.rotation_deg.to_radians().sin_cos();
    let h = side / 2.0;
    [
        Vector2::new(-h, -h),
        Vector2::new(h, -h),
        Vector2::new(h, h),
        Vector2::new(-h, h),
    ]
    .map(|p| Vector2::new(c.x + p.x * cos - p.y * sin, c.y + p.x * sin + p.y * cos))
}

/// Axis-aligned bounding box of the rotated square.
pub fn aabb(pose: &SquarePose, side: f64) -> Aabb {
    let pts = corners(pose, side);
    let mut min = pts[0];
    let mut max = pts[0];
    for p in &pts[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Aabb { min, max }
}

/// Projection interval of `points` onto the unit axis `u`, relative to `origin`.
#[inline]
pub(super) fn project_span(
    u: Vector2<f64>,
    origin: Vector2<f64>,
    points: &[Vector2<f64>; 4],
) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for p in points {
        let t = u.dot(&(p - origin));
        lo = lo.min(t);
        hi = hi.max(t);
    }
    (lo, hi)
}

/// Directional half of the SAT test: does either of `reference`'s two edge
/// axes separate it from `other`? Projections are taken relative to `P0`;
/// a span entirely outside `[0, side]` proves separation (touching counts
/// as separated).
fn separated_on(reference: &[Vector2<f64>; 4], other: &[Vector2<f64>; 4], side: f64) -> bool {
    let p0 = reference[0];
    for k in [1, 3] {
        let u = (reference[k] - p0) / side;
        let (lo, hi) = project_span(u, p0, other);
        if hi <= 0.0 || lo >= side {
            return true;
        }
    }
    false
}

/// Exact interior-overlap test between two placed squares.
///
/// A fast AABB rejection first, then the two-axis SAT test run with each
/// square as reference. Edge-touching squares do not overlap; there are no
/// false negatives, which is what gates every board mutation.
pub fn overlaps(a: &SquarePose, b: &SquarePose, side: f64) -> bool {
    if !aabb(a, side).intersects(&aabb(b, side)) {
        return false;
    }
    let ca = corners(a, side);
    let cb = corners(b, side);
    !separated_on(&ca, &cb, side) && !separated_on(&cb, &ca, side)
}
