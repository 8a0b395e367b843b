//! Basic value types shared by the geometry functions.
//!
//! - `GeomCfg`: centralizes the tolerance for axis deduplication and
//!   degenerate-interval guards.
//! - `SquarePose`: immutable placement of one square, distinct from the
//!   board-owned entity that carries an identity and lifecycle.
//! - `Aabb`: axis-aligned box used for cheap rejection and the objective.

use nalgebra::Vector2;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Slack for direction deduplication and positive-depth checks.
    pub eps: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self { eps: 1e-9 }
    }
}

/// Placement of one square: unrotated top-left corner in world coordinates
/// plus a rotation in degrees applied about the square's own center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SquarePose {
    pub reference: Vector2<f64>,
    pub rotation_deg: f64,
}

impl SquarePose {
    #[inline]
    pub fn new(x: f64, y: f64, rotation_deg: f64) -> Self {
        Self {
            reference: Vector2::new(x, y),
            rotation_deg,
        }
    }

    /// Center of the square, the fixed point of its rotation.
    #[inline]
    pub fn center(&self, side: f64) -> Vector2<f64> {
        self.reference + Vector2::new(side / 2.0, side / 2.0)
    }

    #[inline]
    pub fn with_reference(self, reference: Vector2<f64>) -> Self {
        Self { reference, ..self }
    }

    #[inline]
    pub fn translated(self, delta: Vector2<f64>) -> Self {
        Self {
            reference: self.reference + delta,
            ..self
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl Aabb {
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Interior intersection test (strict: shared edges do not intersect).
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.max.x <= other.min.x
            || other.max.x <= self.min.x
            || self.max.y <= other.min.y
            || other.max.y <= self.min.y)
    }

    /// Component-wise union of two boxes.
    #[inline]
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: Vector2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vector2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}
