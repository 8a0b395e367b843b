use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fitboard::cases::is_known_optimal;
use fitboard::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Layout tools for the square-packing board")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Validate a layout file: overlaps, objective, submission gate
    Check {
        #[arg(long)]
        input: String,
    },
    /// Print the minimal enclosing square side of a layout
    Objective {
        #[arg(long)]
        input: String,
    },
    /// Apply a scripted gesture sequence to a fresh board
    Replay {
        #[arg(long)]
        input: String,
        /// Write the resulting layout here
        #[arg(long)]
        out: Option<String>,
    },
}

/// Layout file body, the same shape the submission endpoint accepts.
#[derive(Serialize, Deserialize)]
struct LayoutFile {
    squares: Vec<WireSquare>,
}

/// One scripted gesture. Squares are addressed by creation order; positions
/// are unit coordinates measured from the board center.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Gesture {
    Create { x: f64, y: f64 },
    Move { square: usize, x: f64, y: f64 },
    Rotate { square: usize, degrees: f64 },
    Edit { square: usize, x: f64, y: f64, rotation: f64 },
    Delete { square: usize },
    Clear,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Check { input } => check(&input),
        Action::Objective { input } => objective(&input),
        Action::Replay { input, out } => replay(&input, out.as_deref()),
    }
}

fn read_layout(path: &str) -> Result<Vec<WireSquare>> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {path}"))?;
    let file: LayoutFile =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {path}"))?;
    Ok(file.squares)
}

fn check(input: &str) -> Result<()> {
    let layout = read_layout(input)?;
    let cfg = BoardCfg::default();
    let conflicts = validate_layout(&layout, cfg.side);
    for &(i, j) in &conflicts {
        tracing::warn!(i, j, "overlapping pair");
    }

    let mut board = Board::new(cfg);
    board.load_layout(&layout);
    println!("squares: {}", board.len());
    println!("conflicts: {}", conflicts.len());
    match board.enclosing_square_side() {
        Some(v) => println!("objective: {v}"),
        None => println!("objective: -"),
    }
    if is_known_optimal(board.len() as u64) {
        println!("submission: closed (count is already known optimal)");
    } else {
        println!("submission: open");
    }

    if conflicts.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("{} overlapping pair(s)", conflicts.len())
    }
}

fn objective(input: &str) -> Result<()> {
    let layout = read_layout(input)?;
    let mut board = Board::new(BoardCfg::default());
    board.load_layout(&layout);
    match board.enclosing_square_side() {
        Some(v) => println!("{v}"),
        None => println!("-"),
    }
    Ok(())
}

fn lookup(created: &[Option<SquareId>], index: usize) -> Option<SquareId> {
    created.get(index).copied().flatten()
}

fn replay(input: &str, out: Option<&str>) -> Result<()> {
    let bytes = std::fs::read(input).with_context(|| format!("reading {input}"))?;
    let script: Vec<Gesture> =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {input}"))?;

    let mut board = Board::new(BoardCfg::default());
    let o = board.cfg().origin();
    let side = board.cfg().side;
    // Deleted squares keep their slot so later steps keep their numbering.
    let mut created: Vec<Option<SquareId>> = Vec::new();

    for (step, gesture) in script.into_iter().enumerate() {
        match gesture {
            Gesture::Create { x, y } => {
                let id = board.create_square(o + x * side, o + y * side);
                tracing::info!(step, placed = id.is_some(), "create");
                created.push(id);
            }
            Gesture::Move { square, x, y } => match lookup(&created, square) {
                Some(id) => match board.move_square(id, o + x * side, o + y * side) {
                    Ok(p) => tracing::info!(step, x = p.x, y = p.y, "move"),
                    Err(err) => tracing::warn!(step, %err, "move skipped"),
                },
                None => tracing::warn!(step, square, "unknown square"),
            },
            Gesture::Rotate { square, degrees } => match lookup(&created, square) {
                Some(id) => match board.rotate_square(id, degrees) {
                    Ok(deg) => tracing::info!(step, deg, "rotate"),
                    Err(err) => tracing::warn!(step, %err, "rotate skipped"),
                },
                None => tracing::warn!(step, square, "unknown square"),
            },
            Gesture::Edit { square, x, y, rotation } => match lookup(&created, square) {
                Some(id) => {
                    let edit = SquareEdit {
                        x,
                        y,
                        rotation_deg: rotation,
                    };
                    match board.edit_square(id, edit) {
                        Ok(()) => tracing::info!(step, "edit"),
                        Err(err) => tracing::warn!(step, %err, "edit rejected"),
                    }
                }
                None => tracing::warn!(step, square, "unknown square"),
            },
            Gesture::Delete { square } => match lookup(&created, square) {
                Some(id) => {
                    board.delete_square(id);
                    tracing::info!(step, "delete");
                }
                None => tracing::warn!(step, square, "unknown square"),
            },
            Gesture::Clear => {
                board.clear();
                tracing::info!(step, "clear");
            }
        }
    }

    println!("squares: {}", board.len());
    match board.enclosing_square_side() {
        Some(v) => println!("objective: {v}"),
        None => println!("objective: -"),
    }

    if let Some(out) = out {
        let out_path = Path::new(out);
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = LayoutFile {
            squares: board.export_layout(),
        };
        std::fs::write(out, serde_json::to_vec_pretty(&file)?)
            .with_context(|| format!("writing {out}"))?;
    }
    Ok(())
}
