//! Wire-format boundary.
//!
//! A square travels outside the engine as a center point plus a unit
//! orientation vector; inside it is a reference point plus a rotation in
//! degrees. The orientation vector points along the center-to-corner
//! diagonal, hence the fixed 45° offset between its angle and the square's
//! rotation. Corner export is rounded to a fixed precision so the receiving
//! side computes the same bounding box the board displayed.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::geom::{corners, overlaps, SquarePose};
use crate::snap::{normalize_deg, round_decimal};

/// Decimal places for exported corner coordinates.
const SUBMIT_DECIMALS: i32 = 10;

/// Offset between the orientation vector's angle and the stored rotation.
const ORIENTATION_OFFSET_DEG: f64 = 45.0;

/// External representation: square center `(cx, cy)` and orientation unit
/// vector `(ux, uy)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireSquare {
    pub cx: f64,
    pub cy: f64,
    pub ux: f64,
    pub uy: f64,
}

impl WireSquare {
    /// Engine pose: reference point = center − half-extent; rotation from
    /// the orientation vector's angle plus the diagonal offset, normalized
    /// to `[0, 360)`.
    pub fn to_pose(&self, side: f64) -> SquarePose {
        let h = side / 2.0;
        let rotation = normalize_deg(self.uy.atan2(self.ux).to_degrees() + ORIENTATION_OFFSET_DEG);
        SquarePose {
            reference: Vector2::new(self.cx - h, self.cy - h),
            rotation_deg: rotation,
        }
    }

    /// Inverse of [`WireSquare::to_pose`].
    pub fn from_pose(pose: &SquarePose, side: f64) -> Self {
        let c = pose.center(side);
        let theta = (pose.rotation_deg - ORIENTATION_OFFSET_DEG).to_radians();
        Self {
            cx: c.x,
            cy: c.y,
            ux: theta.cos(),
            uy: theta.sin(),
        }
    }
}

/// Corner coordinates for submission, rounded so the server-side objective
/// matches the displayed one regardless of accumulation order.
pub fn submission_corners(pose: &SquarePose, side: f64) -> [[f64; 2]; 4] {
    corners(pose, side).map(|p| {
        [
            round_decimal(p.x, SUBMIT_DECIMALS),
            round_decimal(p.y, SUBMIT_DECIMALS),
        ]
    })
}

/// Pairwise collision scan over a full layout; returns the offending index
/// pairs (empty means the layout satisfies the non-overlap invariant).
pub fn validate_layout(layout: &[WireSquare], side: f64) -> Vec<(usize, usize)> {
    let poses: Vec<SquarePose> = layout.iter().map(|w| w.to_pose(side)).collect();
    let mut conflicts = Vec::new();
    for i in 0..poses.len() {
        for j in i + 1..poses.len() {
            if overlaps(&poses[i], &poses[j], side) {
                conflicts.push((i, j));
            }
        }
    }
    conflicts
}
