use super::*;
use crate::geom;
use proptest::prelude::*;

fn board() -> Board {
    Board::new(BoardCfg::default())
}

/// World coordinates offset from the board center, where the snap grid is
/// anchored.
fn at(board: &Board, dx: f64, dy: f64) -> (f64, f64) {
    let o = board.cfg().origin();
    (o + dx, o + dy)
}

fn assert_no_overlaps(board: &Board) {
    let side = board.cfg().side;
    let sqs = board.squares();
    for i in 0..sqs.len() {
        for j in i + 1..sqs.len() {
            assert!(
                !geom::overlaps(&sqs[i].pose, &sqs[j].pose, side),
                "{} and {} overlap",
                sqs[i].id,
                sqs[j].id
            );
        }
    }
}

#[test]
fn create_rejects_colliding_placement() {
    let mut b = board();
    let (x, y) = at(&b, 0.0, 0.0);
    assert!(b.create_square(x, y).is_some());
    // Half a side to the right: overlaps, silently rejected.
    let (x2, y2) = at(&b, 28.0, 0.0);
    assert!(b.create_square(x2, y2).is_none());
    assert_eq!(b.len(), 1);
    // Exactly one side to the right: touching is legal.
    let (x3, y3) = at(&b, 56.0, 0.0);
    assert!(b.create_square(x3, y3).is_some());
    assert_no_overlaps(&b);
}

#[test]
fn ids_are_monotonic_and_never_reused() {
    let mut b = board();
    let (x, y) = at(&b, 0.0, 0.0);
    let first = b.create_square(x, y).unwrap();
    assert!(b.delete_square(first));
    let second = b.create_square(x, y).unwrap();
    assert!(second > first);
    b.clear();
    let (x2, y2) = at(&b, 112.0, 0.0);
    let third = b.create_square(x2, y2).unwrap();
    assert!(third > second);
}

#[test]
fn move_commits_snapped_position() {
    let mut b = board();
    let (x, y) = at(&b, 0.0, 0.0);
    let id = b.create_square(x, y).unwrap();
    // 3 px off the grid snaps to the nearest 0.1-unit line (5.6 px).
    let committed = b.move_square(id, x + 3.0, y).unwrap();
    assert!((committed.x - (x + 5.6)).abs() < 1e-9);
    assert!((committed.y - y).abs() < 1e-9);
    // Snapping an already committed position is a no-op.
    let again = b.move_square(id, committed.x, committed.y).unwrap();
    assert!((again - committed).norm() < 1e-9);
}

#[test]
fn move_onto_occupied_spot_flushes_out() {
    let mut b = board();
    let (ax, ay) = at(&b, 0.0, 0.0);
    b.create_square(ax, ay).unwrap();
    let (cx, cy) = at(&b, 112.0, 0.0);
    let mover = b.create_square(cx, cy).unwrap();
    // Drag exactly onto the first square: resolved one full side away.
    let committed = b.move_square(mover, ax, ay).unwrap();
    let a_ref = b.squares()[0].pose.reference;
    assert!(((committed - a_ref).norm() - 56.0).abs() < 1e-9);
    assert_no_overlaps(&b);
}

#[test]
fn squeezed_move_reverts_within_iteration_bound() {
    let mut b = board();
    let (ax, ay) = at(&b, 0.0, 0.0);
    b.create_square(ax, ay).unwrap();
    let (bx, by) = at(&b, 100.8, 0.0);
    b.create_square(bx, by).unwrap();
    // The gap between the two is narrower than a square.
    let (cx, cy) = at(&b, 0.0, 168.0);
    let mover = b.create_square(cx, cy).unwrap();
    let before = b.get(mover).unwrap().pose;
    let (tx, ty) = at(&b, 50.4, 0.0);
    let committed = b.move_square(mover, tx, ty).unwrap();
    assert!((committed - before.reference).norm() < 1e-9);
    assert_eq!(b.get(mover).unwrap().pose, before);
    assert_no_overlaps(&b);
}

#[test]
fn rotation_snaps_and_normalizes() {
    let mut b = board();
    let (x, y) = at(&b, 0.0, 0.0);
    let id = b.create_square(x, y).unwrap();
    assert_eq!(b.rotate_square(id, 22.4).unwrap(), 15.0);
    assert_eq!(b.rotate_square(id, -90.0).unwrap(), 270.0);
    b.snap_mut().set_rotation_snap(false);
    let free = b.rotate_square(id, 22.4).unwrap();
    assert!((free - 22.4).abs() < 1e-12);
    let sq = b.get(id).unwrap();
    assert!((0.0..360.0).contains(&sq.pose.rotation_deg));
}

#[test]
fn colliding_rotation_is_rejected_without_flush() {
    let mut b = board();
    let (ax, ay) = at(&b, 0.0, 0.0);
    b.create_square(ax, ay).unwrap();
    let (bx, by) = at(&b, 56.0, 0.0);
    let id = b.create_square(bx, by).unwrap();
    // 45° would swing the corner into the touching neighbour.
    let committed = b.rotate_square(id, 45.0).unwrap();
    assert_eq!(committed, 0.0);
    assert_eq!(b.get(id).unwrap().pose.rotation_deg, 0.0);
    assert_no_overlaps(&b);
}

#[test]
fn edit_commits_absolute_values() {
    let mut b = board();
    let (x, y) = at(&b, 0.0, 0.0);
    let id = b.create_square(x, y).unwrap();
    b.edit_square(
        id,
        SquareEdit {
            x: 2.0,
            y: -1.0,
            rotation_deg: 30.0,
        },
    )
    .unwrap();
    let pose = b.get(id).unwrap().pose;
    let units = b.unit_coords(&pose);
    assert!((units.x - 2.0).abs() < 1e-9);
    assert!((units.y + 1.0).abs() < 1e-9);
    assert_eq!(pose.rotation_deg, 30.0);
}

#[test]
fn edit_reverts_on_collision_and_bad_input() {
    let mut b = board();
    let (ax, ay) = at(&b, 0.0, 0.0);
    b.create_square(ax, ay).unwrap();
    let (bx, by) = at(&b, 112.0, 0.0);
    let id = b.create_square(bx, by).unwrap();
    let before = b.get(id).unwrap().pose;

    let half_on_top = SquareEdit {
        x: 0.5,
        y: 0.0,
        rotation_deg: 0.0,
    };
    assert_eq!(b.edit_square(id, half_on_top), Err(BoardError::Collision));
    assert_eq!(b.get(id).unwrap().pose, before);

    let garbage = SquareEdit {
        x: f64::NAN,
        y: 0.0,
        rotation_deg: 0.0,
    };
    assert_eq!(b.edit_square(id, garbage), Err(BoardError::NonFinite));
    assert_eq!(b.get(id).unwrap().pose, before);
    assert_no_overlaps(&b);
}

#[test]
fn objective_of_reference_layouts() {
    let mut b = board();
    assert_eq!(b.enclosing_square_side(), None);

    let (ax, ay) = at(&b, 0.0, 0.0);
    b.create_square(ax, ay).unwrap();
    let (bx, by) = at(&b, 56.0, 0.0);
    b.create_square(bx, by).unwrap();
    assert_eq!(b.enclosing_square_side(), Some(2.0));

    let (fx, fy) = at(&b, 560.0, 560.0);
    b.create_square(fx, fy).unwrap();
    assert_eq!(b.enclosing_square_side(), Some(11.0));

    b.clear();
    assert_eq!(b.enclosing_square_side(), None);
}

#[test]
fn rotated_square_widens_the_objective() {
    let mut b = board();
    let (x, y) = at(&b, 0.0, 0.0);
    let id = b.create_square(x, y).unwrap();
    assert_eq!(b.enclosing_square_side(), Some(1.0));
    b.rotate_square(id, 45.0).unwrap();
    let objective = b.enclosing_square_side().unwrap();
    assert!((objective - std::f64::consts::SQRT_2).abs() < 1e-4);
}

#[test]
fn out_of_bounds_placement_is_clamped() {
    let mut b = board();
    let id = b.create_square(20_000.0, -6_000.0).unwrap();
    let reference = b.get(id).unwrap().pose.reference;
    assert_eq!(reference.x, 10_000.0 - 56.0);
    assert_eq!(reference.y, 0.0);
}

#[test]
fn mode_toggle_flips_between_move_and_rotate() {
    let mut b = board();
    let (x, y) = at(&b, 0.0, 0.0);
    let id = b.create_square(x, y).unwrap();
    assert_eq!(b.get(id).unwrap().mode, Mode::Move);
    assert_eq!(b.toggle_mode(id).unwrap(), Mode::Rotate);
    assert_eq!(b.toggle_mode(id).unwrap(), Mode::Move);
    b.set_mode(id, Mode::Rotate).unwrap();
    assert_eq!(b.get(id).unwrap().mode, Mode::Rotate);
}

#[test]
fn unknown_ids_are_reported() {
    let mut b = board();
    let (x, y) = at(&b, 0.0, 0.0);
    let id = b.create_square(x, y).unwrap();
    b.delete_square(id);
    assert!(matches!(
        b.move_square(id, x, y),
        Err(BoardError::UnknownSquare(_))
    ));
    assert!(!b.delete_square(id));
}

#[test]
fn layout_export_and_load_round_trip() {
    let mut b = board();
    let (ax, ay) = at(&b, 0.0, 0.0);
    b.create_square(ax, ay).unwrap();
    let (bx, by) = at(&b, 112.0, 56.0);
    let id = b.create_square(bx, by).unwrap();
    b.rotate_square(id, 30.0).unwrap();

    let layout = b.export_layout();
    let mut restored = board();
    restored.load_layout(&layout);
    assert_eq!(restored.len(), 2);
    for (orig, back) in b.squares().iter().zip(restored.squares()) {
        assert!((orig.pose.reference - back.pose.reference).norm() < 1e-9);
        assert!((orig.pose.rotation_deg - back.pose.rotation_deg).abs() < 1e-9);
    }
    assert_no_overlaps(&restored);
}

/// One step of a random gesture script.
#[derive(Clone, Debug)]
enum Gesture {
    Create { dx: f64, dy: f64 },
    Move { pick: usize, dx: f64, dy: f64 },
    Rotate { pick: usize, deg: f64 },
    Edit { pick: usize, x: f64, y: f64, deg: f64 },
    Delete { pick: usize },
}

fn arb_gesture() -> impl Strategy<Value = Gesture> {
    let coord = -300.0..300.0f64;
    prop_oneof![
        (coord.clone(), coord.clone()).prop_map(|(dx, dy)| Gesture::Create { dx, dy }),
        (any::<usize>(), coord.clone(), coord.clone())
            .prop_map(|(pick, dx, dy)| Gesture::Move { pick, dx, dy }),
        (any::<usize>(), -720.0..720.0f64).prop_map(|(pick, deg)| Gesture::Rotate { pick, deg }),
        (any::<usize>(), -5.0..5.0f64, -5.0..5.0f64, -720.0..720.0f64)
            .prop_map(|(pick, x, y, deg)| Gesture::Edit { pick, x, y, deg }),
        any::<usize>().prop_map(|pick| Gesture::Delete { pick }),
    ]
}

fn pick_id(board: &Board, pick: usize) -> Option<SquareId> {
    if board.is_empty() {
        None
    } else {
        Some(board.squares()[pick % board.len()].id)
    }
}

proptest! {
    /// The non-overlap invariant holds after every public operation,
    /// including rejected and resolved ones.
    #[test]
    fn invariant_survives_any_gesture_sequence(script in prop::collection::vec(arb_gesture(), 1..40)) {
        let mut b = board();
        let o = b.cfg().origin();
        for gesture in script {
            match gesture {
                Gesture::Create { dx, dy } => {
                    let _ = b.create_square(o + dx, o + dy);
                }
                Gesture::Move { pick, dx, dy } => {
                    if let Some(id) = pick_id(&b, pick) {
                        b.move_square(id, o + dx, o + dy).unwrap();
                    }
                }
                Gesture::Rotate { pick, deg } => {
                    if let Some(id) = pick_id(&b, pick) {
                        b.rotate_square(id, deg).unwrap();
                    }
                }
                Gesture::Edit { pick, x, y, deg } => {
                    if let Some(id) = pick_id(&b, pick) {
                        let _ = b.edit_square(id, SquareEdit { x, y, rotation_deg: deg });
                    }
                }
                Gesture::Delete { pick } => {
                    if let Some(id) = pick_id(&b, pick) {
                        b.delete_square(id);
                    }
                }
            }
            assert_no_overlaps(&b);
            for sq in b.squares() {
                prop_assert!((0.0..360.0).contains(&sq.pose.rotation_deg));
            }
        }
    }
}
