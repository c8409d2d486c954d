use flotilla::board::{Board, CellState};
use flotilla::coord::Coordinate;
use flotilla::ships::{Orientation, Roster, ShipSpec};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deploy the classic fleet at random from the given seed. Returns `None`
/// in the astronomically unlikely case the bounded placer gives up.
fn random_fleet(seed: u64) -> Option<Board> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new(10);
    let roster = Roster::default();
    for ship in roster.iter() {
        if board.place_random(&mut rng, ship.clone()).is_err() {
            return None;
        }
    }
    Some(board)
}

fn cell_states(board: &Board) -> Vec<CellState> {
    board.rows().flatten().collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_fleets_never_overlap_or_touch(seed in any::<u64>()) {
        let board = match random_fleet(seed) {
            Some(board) => board,
            None => return Ok(()),
        };
        let ships: Vec<_> = board.ships().map(|(_, ship)| ship).collect();

        let occupied: usize = ships.iter().map(|ship| ship.cells().len()).sum();
        prop_assert_eq!(occupied, Roster::default().total_cells());

        for i in 0..ships.len() {
            for j in i + 1..ships.len() {
                for &a in ships[i].cells() {
                    for &b in ships[j].cells() {
                        let dr = (a.row as isize - b.row as isize).abs();
                        let dc = (a.col as isize - b.col as isize).abs();
                        prop_assert!(
                            dr > 1 || dc > 1,
                            "ships {} and {} touch at {} / {}", i, j, a, b
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn attacks_are_idempotent(seed in any::<u64>(), row in 0usize..10, col in 0usize..10) {
        let mut board = match random_fleet(seed) {
            Some(board) => board,
            None => return Ok(()),
        };
        let target = Coordinate::new(row, col);

        let first = board.receive_attack(target).unwrap();
        let after_first = cell_states(&board);
        let hits_first: Vec<_> = board.ships().map(|(_, ship)| ship.hit_count()).collect();

        let second = board.receive_attack(target).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(after_first, cell_states(&board));
        let hits_second: Vec<_> = board.ships().map(|(_, ship)| ship.hit_count()).collect();
        prop_assert_eq!(hits_first, hits_second);
    }

    #[test]
    fn failed_placement_leaves_the_board_unchanged(
        seed in any::<u64>(),
        row in 0usize..10,
        col in 0usize..10,
        horizontal in any::<bool>(),
    ) {
        let mut board = match random_fleet(seed) {
            Some(board) => board,
            None => return Ok(()),
        };
        let before = cell_states(&board);
        let orientation = if horizontal {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };

        let spec = ShipSpec::new("Interloper", 4).unwrap();
        if board.place(spec, Coordinate::new(row, col), orientation).is_err() {
            prop_assert_eq!(before, cell_states(&board));
            prop_assert_eq!(board.ships().count(), 5);
        }
    }
}
