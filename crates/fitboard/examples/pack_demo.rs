//! Scatter a handful of squares and watch the engine keep them apart.
//!
//! Usage:
//!   cargo run -p fitboard --example pack_demo -- [count]
//!
//! Prints the placed count, the objective before and after dragging every
//! square toward the board center, and the final layout in unit coordinates.

use fitboard::sample::{scatter, ReplayToken, ScatterCfg};
use fitboard::{Board, BoardCfg};

fn main() {
    let count: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);

    let mut board = Board::new(BoardCfg::default());
    let placed = scatter(
        &mut board,
        ScatterCfg::default(),
        count * 3,
        ReplayToken { seed: 2026, index: 0 },
    );
    println!(
        "placed {placed} squares, objective {:?}",
        board.enclosing_square_side()
    );

    // Drag everything toward the center; collisions flush outward.
    let o = board.cfg().origin();
    let ids: Vec<_> = board.squares().iter().map(|s| s.id).collect();
    for id in ids {
        board.move_square(id, o, o).expect("square exists");
    }
    println!(
        "after compaction, objective {:?}",
        board.enclosing_square_side()
    );

    for sq in board.squares() {
        let u = board.unit_coords(&sq.pose);
        println!(
            "{}: x={:.3} y={:.3} rot={:.1}",
            sq.id, u.x, u.y, sq.pose.rotation_deg
        );
    }
}
