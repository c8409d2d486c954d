use flotilla::board::{AttackError, AttackOutcome, Board, CellState, PlaceError};
use flotilla::coord::Coordinate;
use flotilla::ships::{Orientation, Roster, ShipSpec};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn spec(name: &str, length: usize) -> ShipSpec {
    ShipSpec::new(name, length).unwrap()
}

fn coord(row: usize, col: usize) -> Coordinate {
    Coordinate::new(row, col)
}

#[test]
fn place_records_cells_in_order() {
    let mut board = Board::new(10);
    let id = board
        .place(spec("Cruiser", 3), coord(2, 2), Orientation::Horizontal)
        .unwrap();

    assert_eq!(board.ship(id).cells(), &[coord(2, 2), coord(2, 3), coord(2, 4)]);
    for col in 2..5 {
        assert_eq!(board.cell(coord(2, col)), Some(CellState::Occupied));
        assert_eq!(board.ship_at(coord(2, col)), Some(id));
    }
    assert_eq!(board.cell(coord(2, 5)), Some(CellState::Empty));
}

#[test]
fn place_vertical_extends_down() {
    let mut board = Board::new(10);
    let id = board
        .place(spec("Battleship", 4), coord(3, 7), Orientation::Vertical)
        .unwrap();
    assert_eq!(
        board.ship(id).cells(),
        &[coord(3, 7), coord(4, 7), coord(5, 7), coord(6, 7)]
    );
}

#[test]
fn out_of_bounds_placement_never_mutates() {
    let mut board = Board::new(10);
    // Column 6 + length 5 runs past the right edge.
    assert_eq!(
        board.place(spec("Carrier", 5), coord(0, 6), Orientation::Horizontal),
        Err(PlaceError::OutOfBounds)
    );
    assert_eq!(
        board.place(spec("Battleship", 4), coord(7, 0), Orientation::Vertical),
        Err(PlaceError::OutOfBounds)
    );

    assert_eq!(board.ships().count(), 0);
    for row in 0..10 {
        for col in 0..10 {
            assert_eq!(board.cell(coord(row, col)), Some(CellState::Empty));
        }
    }
}

#[test]
fn board_length_ship_must_be_edge_aligned() {
    let mut board = Board::new(10);
    board
        .place(spec("Dreadnought", 10), coord(0, 0), Orientation::Horizontal)
        .unwrap();

    let mut board = Board::new(10);
    assert_eq!(
        board.place(spec("Dreadnought", 10), coord(0, 1), Orientation::Horizontal),
        Err(PlaceError::OutOfBounds)
    );
}

#[test]
fn overlapping_placement_rejected() {
    let mut board = Board::new(10);
    board
        .place(spec("Minesweeper", 2), coord(0, 0), Orientation::Horizontal)
        .unwrap();
    assert_eq!(
        board.place(spec("Submarine", 3), coord(0, 1), Orientation::Vertical),
        Err(PlaceError::Overlap)
    );
    assert_eq!(board.ships().count(), 1);
}

#[test]
fn touching_placement_rejected_including_diagonals() {
    let mut board = Board::new(10);
    board
        .place(spec("Minesweeper", 2), coord(0, 0), Orientation::Horizontal)
        .unwrap();

    // (1, 2) touches (0, 1) corner to corner.
    assert_eq!(
        board.place(spec("Patrol", 2), coord(1, 2), Orientation::Horizontal),
        Err(PlaceError::Overlap)
    );
    assert_eq!(board.ships().count(), 1);

    // One full row of clearance is fine.
    board
        .place(spec("Patrol", 2), coord(2, 0), Orientation::Horizontal)
        .unwrap();
    assert_eq!(board.ships().count(), 2);
}

#[test]
fn attack_on_open_water_is_a_miss_and_idempotent() {
    let mut board = Board::new(10);
    board
        .place(spec("Minesweeper", 2), coord(0, 0), Orientation::Horizontal)
        .unwrap();

    assert_eq!(board.receive_attack(coord(5, 5)), Ok(AttackOutcome::Miss));
    assert_eq!(board.cell(coord(5, 5)), Some(CellState::Miss));

    // A repeat lands in the same water.
    assert_eq!(board.receive_attack(coord(5, 5)), Ok(AttackOutcome::Miss));
    assert_eq!(board.cell(coord(5, 5)), Some(CellState::Miss));
}

#[test]
fn repeated_hits_do_not_grow_the_hit_set() {
    let mut board = Board::new(10);
    let id = board
        .place(spec("Cruiser", 3), coord(2, 2), Orientation::Horizontal)
        .unwrap();

    assert_eq!(board.receive_attack(coord(2, 2)), Ok(AttackOutcome::Hit(id)));
    assert_eq!(board.receive_attack(coord(2, 2)), Ok(AttackOutcome::Hit(id)));
    assert_eq!(board.ship(id).hit_count(), 1);
    assert!(!board.ship(id).is_sunk());
}

#[test]
fn sinking_a_lone_ship_sinks_the_fleet() {
    let mut board = Board::new(10);
    let id = board
        .place(spec("Cruiser", 3), coord(2, 2), Orientation::Horizontal)
        .unwrap();

    assert_eq!(board.receive_attack(coord(2, 2)), Ok(AttackOutcome::Hit(id)));
    assert!(!board.ship(id).is_sunk());
    assert_eq!(board.receive_attack(coord(2, 3)), Ok(AttackOutcome::Hit(id)));
    assert!(!board.all_sunk());
    assert_eq!(board.receive_attack(coord(2, 4)), Ok(AttackOutcome::Hit(id)));

    assert!(board.ship(id).is_sunk());
    assert!(board.all_sunk());
    assert_eq!(board.cell(coord(2, 3)), Some(CellState::Hit));
}

#[test]
fn fleet_is_not_sunk_while_any_ship_floats() {
    let mut board = Board::new(10);
    let first = board
        .place(spec("Minesweeper", 2), coord(0, 0), Orientation::Horizontal)
        .unwrap();
    let second = board
        .place(spec("Patrol", 2), coord(5, 5), Orientation::Vertical)
        .unwrap();

    board.receive_attack(coord(0, 0)).unwrap();
    board.receive_attack(coord(0, 1)).unwrap();
    assert!(board.ship(first).is_sunk());
    assert!(!board.all_sunk());

    board.receive_attack(coord(5, 5)).unwrap();
    board.receive_attack(coord(6, 5)).unwrap();
    assert!(board.ship(second).is_sunk());
    assert!(board.all_sunk());
}

#[test]
fn attack_outside_the_grid_is_invalid() {
    let mut board = Board::new(10);
    board
        .place(spec("Minesweeper", 2), coord(0, 0), Orientation::Horizontal)
        .unwrap();
    assert_eq!(
        board.receive_attack(coord(10, 0)),
        Err(AttackError::InvalidCoordinate(coord(10, 0)))
    );
    assert_eq!(
        board.receive_attack(coord(0, 10)),
        Err(AttackError::InvalidCoordinate(coord(0, 10)))
    );
}

#[test]
fn random_placement_fits_the_classic_fleet() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut board = Board::new(10);
    let roster = Roster::default();
    for ship in roster.iter() {
        board.place_random(&mut rng, ship.clone()).unwrap();
    }

    let ships: Vec<_> = board.ships().map(|(_, ship)| ship).collect();
    let occupied: usize = ships.iter().map(|ship| ship.cells().len()).sum();
    assert_eq!(occupied, roster.total_cells());

    // No pair of ships shares a cell or touches, diagonals included.
    for i in 0..ships.len() {
        for j in i + 1..ships.len() {
            for &a in ships[i].cells() {
                for &b in ships[j].cells() {
                    let dr = (a.row as isize - b.row as isize).abs();
                    let dc = (a.col as isize - b.col as isize).abs();
                    assert!(
                        dr > 1 || dc > 1,
                        "ships {} and {} touch at {} / {}",
                        i,
                        j,
                        a,
                        b
                    );
                }
            }
        }
    }
}

#[test]
fn random_placement_reports_a_full_board() {
    // Two full-width ships exhaust a 3x3 board: with the no-touching rule
    // nothing else fits, so the third placement must give up rather than
    // sample forever.
    let mut board = Board::new(3);
    board
        .place(spec("First", 3), coord(0, 0), Orientation::Horizontal)
        .unwrap();
    board
        .place(spec("Second", 3), coord(2, 0), Orientation::Horizontal)
        .unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(
        board.place_random(&mut rng, spec("Third", 3)),
        Err(PlaceError::BoardFull)
    );
    assert_eq!(board.ships().count(), 2);
}
