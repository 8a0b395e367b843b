//! Seeded random placements (test and bench support).
//!
//! Draws are reproducible through a replay token `(seed, index)` mixed into
//! a single RNG, so a failing case can be replayed from its token alone.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::geom::SquarePose;

/// Scatter configuration.
#[derive(Clone, Copy, Debug)]
pub struct ScatterCfg {
    /// Half-extent of the sampling window around the board center, in world
    /// units.
    pub spread: f64,
    /// Also draw a uniform rotation per square? Axis-aligned otherwise.
    pub rotate: bool,
}

impl Default for ScatterCfg {
    fn default() -> Self {
        Self {
            spread: 500.0,
            rotate: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw one pose uniformly inside the window around `center`.
pub fn draw_pose(cfg: ScatterCfg, center: Vector2<f64>, tok: ReplayToken) -> SquarePose {
    let mut rng = tok.to_std_rng();
    let x = center.x + rng.gen_range(-cfg.spread..cfg.spread);
    let y = center.y + rng.gen_range(-cfg.spread..cfg.spread);
    let rot = if cfg.rotate {
        rng.gen::<f64>() * 360.0
    } else {
        0.0
    };
    SquarePose::new(x, y, rot)
}

/// Attempt `count` placements through the board's own create/rotate
/// operations; colliding draws are skipped the way the board skips them.
/// Returns the number of squares actually placed.
pub fn scatter(board: &mut Board, cfg: ScatterCfg, count: usize, tok: ReplayToken) -> usize {
    let mut rng = tok.to_std_rng();
    let o = board.cfg().origin();
    let mut placed = 0;
    for _ in 0..count {
        let x = o + rng.gen_range(-cfg.spread..cfg.spread);
        let y = o + rng.gen_range(-cfg.spread..cfg.spread);
        if let Some(id) = board.create_square(x, y) {
            placed += 1;
            if cfg.rotate {
                // Rejected rotations keep the square axis-aligned; fine here.
                let _ = board.rotate_square(id, rng.gen::<f64>() * 360.0);
            }
        }
    }
    placed
}
