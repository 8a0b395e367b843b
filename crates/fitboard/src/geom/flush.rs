//! Least-penetration ("flush") search.
//!
//! When a proposed move collides, the board does not reject it outright: it
//! pushes the moving square out of one offending square along the face
//! normal with the smallest penetration, then re-checks the collection.
//! This module computes that single push; the bounded retry loop lives on
//! the board.

use nalgebra::Vector2;

use super::sat::{corners, overlaps};
use super::types::{GeomCfg, SquarePose};

/// Projection interval of four corners on `u` in absolute coordinates.
#[inline]
fn span(u: Vector2<f64>, points: &[Vector2<f64>; 4]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for p in points {
        let t = u.dot(p);
        lo = lo.min(t);
        hi = hi.max(t);
    }
    (lo, hi)
}

/// Append a unit direction unless a parallel (or anti-parallel) one is
/// already present.
fn push_axis(axes: &mut Vec<Vector2<f64>>, u: Vector2<f64>, eps: f64) {
    if axes.iter().all(|a| a.dot(&u).abs() < 1.0 - eps) {
        axes.push(u);
    }
}

/// Minimum-translation vector that moves `moving` out of `other`.
///
/// Candidate axes are the two face-normal directions of each square,
/// deduplicated. An axis only informs the resolution if the two projection
/// intervals overlap on it; for those, the penetration depth is the shorter
/// of the two interval orderings, and the push direction is the one that
/// moves `moving` away from `other`. Returns `None` when the squares do not
/// actually overlap (a non-overlapping pair can still project onto shared
/// intervals, which would fabricate a push).
pub fn flush_vector(
    moving: &SquarePose,
    other: &SquarePose,
    side: f64,
    cfg: GeomCfg,
) -> Option<Vector2<f64>> {
    if !overlaps(moving, other, side) {
        return None;
    }
    let cm = corners(moving, side);
    let co = corners(other, side);

    let mut axes: Vec<Vector2<f64>> = Vec::with_capacity(4);
    for cs in [&cm, &co] {
        for k in [1, 3] {
            push_axis(&mut axes, (cs[k] - cs[0]) / side, cfg.eps);
        }
    }

    let mut best: Option<(Vector2<f64>, f64)> = None;
    for u in axes {
        let (m_lo, m_hi) = span(u, &cm);
        let (o_lo, o_hi) = span(u, &co);
        if m_hi <= o_lo || o_hi <= m_lo {
            // Separated on this axis already; it cannot resolve the contact.
            continue;
        }
        // Push down-axis by (m_hi − o_lo) or up-axis by (o_hi − m_lo),
        // whichever displacement is shorter.
        let (depth, dir) = if m_hi - o_lo < o_hi - m_lo {
            (m_hi - o_lo, -u)
        } else {
            (o_hi - m_lo, u)
        };
        if depth <= 0.0 {
            continue;
        }
        match best {
            Some((_, d)) if depth >= d => {}
            _ => best = Some((dir, depth)),
        }
    }
    best.map(|(dir, depth)| dir * depth)
}
