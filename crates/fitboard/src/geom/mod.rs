//! Rotated-square geometry.
//!
//! Purpose
//! - Pure functions over [`SquarePose`]: corner generation, axis-aligned
//!   bounds, the exact SAT overlap predicate, and the least-penetration
//!   flush search used to resolve illegal moves.
//!
//! Why this design
//! - A square has only two distinct edge-normal directions, so SAT reduces
//!   to projecting the other square's corners onto two unit edges per
//!   reference square. The same projections measure penetration depth for
//!   the flush search, so both live here.
//! - Everything is side-effect free; the stateful board in `crate::board`
//!   owns the collection and calls in with copies of poses.

mod flush;
mod sat;
mod types;

pub use flush::flush_vector;
pub use sat::{aabb, corners, overlaps};
pub use types::{Aabb, GeomCfg, SquarePose};
