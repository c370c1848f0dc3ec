use proptest::prelude::*;
use warships::{
    extract_cluster, mark_candidate_zone, mark_exclusion_zone, CellState, Coord, Grid, BOARD_SIZE,
    MAX_SHIP_LEN,
};

fn c(label: &str) -> Coord {
    Coord::decode(label).unwrap()
}

fn ship(row: usize, col: usize, len: usize, vertical: bool) -> Vec<Coord> {
    (0..len)
        .map(|i| {
            if vertical {
                Coord::new(row + i, col).unwrap()
            } else {
                Coord::new(row, col + i).unwrap()
            }
        })
        .collect()
}

fn arb_ship() -> impl Strategy<Value = Vec<Coord>> {
    (1..=MAX_SHIP_LEN, any::<bool>()).prop_flat_map(|(len, vertical)| {
        let (max_r, max_c) = if vertical {
            (BOARD_SIZE - len, BOARD_SIZE - 1)
        } else {
            (BOARD_SIZE - 1, BOARD_SIZE - len)
        };
        (0..=max_r, 0..=max_c).prop_map(move |(r, col)| ship(r, col, len, vertical))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn cluster_is_the_whole_ship_from_any_cell(cells in arb_ship(), pick in any::<prop::sample::Index>()) {
        let mut grid = Grid::new();
        for &cell in &cells {
            grid[cell] = CellState::Hit;
        }
        let origin = *pick.get(&cells);
        let mut expected = cells.clone();
        expected.sort();
        prop_assert_eq!(extract_cluster(&grid, origin), expected);
    }

    #[test]
    fn exclusion_only_turns_empty_into_miss(cells in arb_ship(), noise in prop::collection::vec((0..BOARD_SIZE, 0..BOARD_SIZE, 0..3u8), 0..20)) {
        let mut grid = Grid::new();
        for (r, col, kind) in noise {
            let state = match kind {
                0 => CellState::Ship,
                1 => CellState::Miss,
                _ => CellState::Hit,
            };
            grid[Coord::new(r, col).unwrap()] = state;
        }
        for &cell in &cells {
            grid[cell] = CellState::Hit;
        }
        let before = grid;
        let changed = mark_exclusion_zone(&mut grid, &cells);

        let mut flipped = 0;
        for coord in Coord::all() {
            if before[coord] != grid[coord] {
                prop_assert_eq!(before[coord], CellState::Empty);
                prop_assert_eq!(grid[coord], CellState::Miss);
                prop_assert!(cells.iter().any(|s| s.neighbors8().any(|n| n == coord)));
                flipped += 1;
            }
        }
        prop_assert_eq!(changed, flipped);
    }
}

#[test]
fn clusters_of_each_length_both_orientations() {
    for len in 1..=MAX_SHIP_LEN {
        for vertical in [false, true] {
            let cells = ship(3, 3, len, vertical);
            let mut grid = Grid::new();
            for &cell in &cells {
                grid[cell] = CellState::Hit;
            }
            assert_eq!(extract_cluster(&grid, cells[len - 1]), cells);
        }
    }
}

#[test]
fn cluster_stops_at_misses_and_ignores_diagonals() {
    let mut grid = Grid::new();
    grid[c("B2")] = CellState::Hit;
    grid[c("B3")] = CellState::Hit;
    grid[c("C4")] = CellState::Hit;
    grid[c("B4")] = CellState::Miss;
    assert_eq!(extract_cluster(&grid, c("B3")), vec![c("B2"), c("B3")]);
    assert!(extract_cluster(&grid, c("A1")).is_empty());
}

#[test]
fn exclusion_around_a_corner_ship() {
    let mut grid = Grid::new();
    let cells = [c("A1"), c("A2")];
    for &cell in &cells {
        grid[cell] = CellState::Hit;
    }
    assert_eq!(mark_exclusion_zone(&mut grid, &cells), 4);
    for label in ["A3", "B1", "B2", "B3"] {
        assert_eq!(grid[c(label)], CellState::Miss, "{}", label);
    }
    assert_eq!(grid[c("A4")], CellState::Empty);
}

#[test]
fn candidates_follow_the_axis() {
    let mut grid = Grid::new();
    grid[c("E5")] = CellState::Ship;
    assert_eq!(mark_candidate_zone(&mut grid, &[c("E5")]), 4);

    grid[c("E6")] = CellState::Ship;
    mark_candidate_zone(&mut grid, &[c("E5"), c("E6")]);
    let mut candidates: Vec<Coord> = grid.coords_in(CellState::Candidate).collect();
    candidates.sort();
    assert_eq!(candidates, vec![c("E4"), c("E7")]);
}
