//! Board aggregate: square entities and their lifecycle.
//!
//! Purpose
//! - Own the collection of placed squares and enforce the one invariant that
//!   matters: at rest, no two squares' rotated outlines intersect with
//!   positive area. Every public operation either commits a legal state or
//!   leaves the previous one untouched.
//!
//! Why this design
//! - The collection is an explicit aggregate, not ambient state, so several
//!   boards can coexist in one process (tests run them side by side).
//! - Callers submit proposed positions/rotations; the board snaps, clamps,
//!   collision-checks, and for moves resolves conflicts through a bounded
//!   least-penetration loop instead of rejecting outright.

use std::fmt;

use nalgebra::Vector2;
use thiserror::Error;

use crate::convert::WireSquare;
use crate::geom::{self, flush_vector, GeomCfg, SquarePose};
use crate::snap::{normalize_deg, round_decimal, SnapCfg};

#[cfg(test)]
mod tests;

/// Decimal places used when reporting the objective value.
const OBJECTIVE_DECIMALS: i32 = 5;

/// Retry bound for the flush loop. A square squeezed between neighbours can
/// oscillate, so the loop must not be open-ended; on exhaustion the move
/// reverts.
const MAX_FLUSH_ITERS: usize = 8;

/// Opaque square identity. Assigned monotonically at creation, never reused,
/// not even after `clear`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SquareId(u64);

impl fmt::Display for SquareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sq-{}", self.0)
    }
}

/// Gesture-interpretation tag. Affects how external input maps onto a
/// square, never its geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Move,
    Rotate,
}

/// A placed square: identity plus pose plus interaction mode. The pose is
/// the value consumed by all geometry functions.
#[derive(Clone, Copy, Debug)]
pub struct Square {
    pub id: SquareId,
    pub pose: SquarePose,
    pub mode: Mode,
}

/// Board-level configuration.
#[derive(Clone, Copy, Debug)]
pub struct BoardCfg {
    /// Side length shared by every square, in world units.
    pub side: f64,
    /// Extent of the finite workspace; reference points are clamped to
    /// `[0, board_size − side]` per axis.
    pub board_size: f64,
}

impl Default for BoardCfg {
    fn default() -> Self {
        Self {
            side: 56.0,
            board_size: 10_000.0,
        }
    }
}

impl BoardCfg {
    /// Origin of the unit coordinate system (the board center); also the
    /// snap-grid origin.
    #[inline]
    pub fn origin(&self) -> f64 {
        self.board_size / 2.0
    }
}

/// Operation failures. All are local and recoverable; a failed operation
/// never leaves the collection overlapping.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("no square with id {0}")]
    UnknownSquare(SquareId),
    #[error("value is not a finite number")]
    NonFinite,
    #[error("placement would overlap another square")]
    Collision,
}

/// Absolute numeric edit from the selection panel: the reference point in
/// unit coordinates measured from the board center, plus a rotation in
/// degrees.
#[derive(Clone, Copy, Debug)]
pub struct SquareEdit {
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
}

/// The square collection and every operation that may mutate it.
#[derive(Clone, Debug, Default)]
pub struct Board {
    cfg: BoardCfg,
    snap: SnapCfg,
    geom: GeomCfg,
    squares: Vec<Square>,
    next_id: u64,
}

impl Board {
    pub fn new(cfg: BoardCfg) -> Self {
        debug_assert!(cfg.side > 0.0 && cfg.board_size > cfg.side);
        Self {
            cfg,
            ..Self::default()
        }
    }

    #[inline]
    pub fn cfg(&self) -> BoardCfg {
        self.cfg
    }

    #[inline]
    pub fn snap(&self) -> &SnapCfg {
        &self.snap
    }

    #[inline]
    pub fn snap_mut(&mut self) -> &mut SnapCfg {
        &mut self.snap
    }

    #[inline]
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    pub fn get(&self, id: SquareId) -> Option<&Square> {
        self.squares.iter().find(|s| s.id == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Reference point in unit coordinates from the board center (the
    /// values shown and edited in the selection panel).
    pub fn unit_coords(&self, pose: &SquarePose) -> Vector2<f64> {
        let o = self.cfg.origin();
        (pose.reference - Vector2::new(o, o)) / self.cfg.side
    }

    fn index_of(&self, id: SquareId) -> Result<usize, BoardError> {
        self.squares
            .iter()
            .position(|s| s.id == id)
            .ok_or(BoardError::UnknownSquare(id))
    }

    fn clamp_reference(&self, p: Vector2<f64>) -> Vector2<f64> {
        let hi = self.cfg.board_size - self.cfg.side;
        Vector2::new(p.x.clamp(0.0, hi), p.y.clamp(0.0, hi))
    }

    fn snapped_reference(&self, x: f64, y: f64) -> Vector2<f64> {
        let o = self.cfg.origin();
        let side = self.cfg.side;
        self.clamp_reference(Vector2::new(
            self.snap.snap_position(x, o, side),
            self.snap.snap_position(y, o, side),
        ))
    }

    /// Does `candidate` overlap any square other than `exclude`?
    pub fn would_collide(&self, candidate: &SquarePose, exclude: Option<SquareId>) -> bool {
        self.colliding_with(candidate, exclude).is_some()
    }

    /// One concrete offending square (first found, no ordering guarantee).
    pub fn colliding_with(
        &self,
        candidate: &SquarePose,
        exclude: Option<SquareId>,
    ) -> Option<&Square> {
        self.squares
            .iter()
            .filter(|s| Some(s.id) != exclude)
            .find(|s| geom::overlaps(candidate, &s.pose, self.cfg.side))
    }

    /// Place a new axis-aligned square with its top-left near `(x, y)`.
    /// The position is snapped and clamped; a colliding placement is
    /// rejected silently.
    pub fn create_square(&mut self, x: f64, y: f64) -> Option<SquareId> {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        let pose = SquarePose {
            reference: self.snapped_reference(x, y),
            rotation_deg: 0.0,
        };
        if self.would_collide(&pose, None) {
            return None;
        }
        self.next_id += 1;
        let id = SquareId(self.next_id);
        self.squares.push(Square {
            id,
            pose,
            mode: Mode::default(),
        });
        Some(id)
    }

    /// Move a square's reference point toward `(x, y)`: snap, clamp,
    /// collision-check, and on collision flush to the nearest legal
    /// position. Always commits a legal position and returns it; if
    /// resolution fails within its bound the pre-move position stands.
    pub fn move_square(&mut self, id: SquareId, x: f64, y: f64) -> Result<Vector2<f64>, BoardError> {
        let idx = self.index_of(id)?;
        if !(x.is_finite() && y.is_finite()) {
            return Err(BoardError::NonFinite);
        }
        let start = self.squares[idx].pose;
        let mut candidate = start.with_reference(self.snapped_reference(x, y));
        if self.would_collide(&candidate, Some(id)) {
            candidate = self.resolve(candidate, id).unwrap_or(start);
        }
        self.squares[idx].pose = candidate;
        Ok(candidate.reference)
    }

    /// Bounded least-penetration loop. Each pass picks one offending square,
    /// pushes the candidate out along the axis of least penetration, and
    /// re-tests the whole collection; `None` means the bound was exhausted
    /// (or a push was swallowed by the workspace clamp) and the caller must
    /// revert.
    fn resolve(&self, start: SquarePose, id: SquareId) -> Option<SquarePose> {
        let mut candidate = start;
        for _ in 0..MAX_FLUSH_ITERS {
            let other = match self.colliding_with(&candidate, Some(id)) {
                None => return Some(candidate),
                Some(sq) => sq.pose,
            };
            let push = flush_vector(&candidate, &other, self.cfg.side, self.geom)?;
            let pushed = self.clamp_reference(candidate.reference + push);
            if pushed == candidate.reference {
                return None;
            }
            candidate = candidate.with_reference(pushed);
        }
        if self.would_collide(&candidate, Some(id)) {
            None
        } else {
            Some(candidate)
        }
    }

    /// Rotate a square to `deg` (snapped, normalized to `[0, 360)`). A
    /// rotation into a collision is rejected and the previous rotation is
    /// kept; there is deliberately no flush for rotation conflicts. Returns
    /// the committed rotation.
    pub fn rotate_square(&mut self, id: SquareId, deg: f64) -> Result<f64, BoardError> {
        let idx = self.index_of(id)?;
        if !deg.is_finite() {
            return Err(BoardError::NonFinite);
        }
        let snapped = normalize_deg(self.snap.snap_rotation(deg));
        let current = self.squares[idx].pose;
        let candidate = SquarePose {
            rotation_deg: snapped,
            ..current
        };
        if self.would_collide(&candidate, Some(id)) {
            return Ok(current.rotation_deg);
        }
        self.squares[idx].pose = candidate;
        Ok(snapped)
    }

    /// Absolute numeric edit. Non-finite input or a resulting collision
    /// leaves the square at its last valid values and reports the failure so
    /// the caller can flash its feedback; the board state is unchanged in
    /// both cases.
    pub fn edit_square(&mut self, id: SquareId, edit: SquareEdit) -> Result<(), BoardError> {
        let idx = self.index_of(id)?;
        if !(edit.x.is_finite() && edit.y.is_finite() && edit.rotation_deg.is_finite()) {
            return Err(BoardError::NonFinite);
        }
        let o = self.cfg.origin();
        let side = self.cfg.side;
        let reference = self.clamp_reference(Vector2::new(
            o + edit.x * side,
            o + edit.y * side,
        ));
        let rotation = normalize_deg(self.snap.snap_rotation(edit.rotation_deg));
        let candidate = SquarePose {
            reference,
            rotation_deg: rotation,
        };
        if self.would_collide(&candidate, Some(id)) {
            return Err(BoardError::Collision);
        }
        self.squares[idx].pose = candidate;
        Ok(())
    }

    pub fn set_mode(&mut self, id: SquareId, mode: Mode) -> Result<(), BoardError> {
        let idx = self.index_of(id)?;
        self.squares[idx].mode = mode;
        Ok(())
    }

    /// Flip between move and rotate (the double-click gesture). Returns the
    /// new mode.
    pub fn toggle_mode(&mut self, id: SquareId) -> Result<Mode, BoardError> {
        let idx = self.index_of(id)?;
        let next = match self.squares[idx].mode {
            Mode::Move => Mode::Rotate,
            Mode::Rotate => Mode::Move,
        };
        self.squares[idx].mode = next;
        Ok(next)
    }

    /// Remove one square; returns whether it existed.
    pub fn delete_square(&mut self, id: SquareId) -> bool {
        let before = self.squares.len();
        self.squares.retain(|s| s.id != id);
        self.squares.len() != before
    }

    /// Remove every square. Identities are not reset.
    pub fn clear(&mut self) {
        self.squares.clear();
    }

    /// Side of the minimal enclosing axis-aligned square, in unit squares,
    /// rounded to a fixed precision so a layout always reports one value.
    /// `None` for an empty board.
    pub fn enclosing_square_side(&self) -> Option<f64> {
        let side = self.cfg.side;
        let mut it = self.squares.iter();
        let mut bounds = geom::aabb(&it.next()?.pose, side);
        for sq in it {
            bounds = bounds.union(&geom::aabb(&sq.pose, side));
        }
        let units = bounds.width().max(bounds.height()) / side;
        Some(round_decimal(units, OBJECTIVE_DECIMALS))
    }

    /// Replace the collection with a submitted layout. Squares are installed
    /// verbatim (the submission pipeline validated them); identities are
    /// freshly assigned.
    pub fn load_layout(&mut self, layout: &[WireSquare]) {
        self.clear();
        for wire in layout {
            self.next_id += 1;
            self.squares.push(Square {
                id: SquareId(self.next_id),
                pose: wire.to_pose(self.cfg.side),
                mode: Mode::default(),
            });
        }
    }

    /// Export the current layout through the wire format.
    pub fn export_layout(&self) -> Vec<WireSquare> {
        self.squares
            .iter()
            .map(|s| WireSquare::from_pose(&s.pose, self.cfg.side))
            .collect()
    }
}
