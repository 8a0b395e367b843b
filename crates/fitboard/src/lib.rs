//! Placement engine for the square-packing board.
//!
//! The board holds fixed-size squares on a large plane, keeps them from
//! overlapping, and reports the side of the smallest axis-aligned square
//! enclosing the layout. Geometry (corners, SAT overlap, least-penetration
//! flush) lives in [`geom`]; quantization in [`snap`]; the stateful aggregate
//! and its lifecycle operations in [`board`]; the wire-format boundary in
//! [`convert`].
//!
//! Rendering, viewport mapping, and pointer dispatch are external: callers
//! submit proposed positions/rotations and read back committed state.

pub mod board;
pub mod cases;
pub mod convert;
pub mod geom;
pub mod sample;
pub mod snap;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Convenience re-exports so callers can name the core types directly.
pub use board::{Board, BoardCfg, BoardError, Mode, Square, SquareEdit, SquareId};
pub use geom::{GeomCfg, SquarePose};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::board::{Board, BoardCfg, BoardError, Mode, Square, SquareEdit, SquareId};
    pub use crate::convert::{submission_corners, validate_layout, WireSquare};
    pub use crate::geom::{aabb, corners, flush_vector, overlaps, Aabb, GeomCfg, SquarePose};
    pub use crate::snap::{normalize_deg, round_decimal, SnapCfg, MIN_GRID_PITCH};
    pub use nalgebra::Vector2 as Vec2;
}
