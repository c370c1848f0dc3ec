use rand::{rngs::SmallRng, SeedableRng};
use warships::{
    extract_cluster, CellState, Coord, FleetBuilder, FleetCounts, Grid, PlacementError,
    PlacementProgress, TOTAL_SHIP_CELLS,
};

fn c(label: &str) -> Coord {
    Coord::decode(label).unwrap()
}

#[test]
fn counts_start_full_and_refuse_extra_sinks() {
    let mut fleet = FleetCounts::full();
    assert_eq!(fleet.total(), 10);
    assert_eq!(fleet.iter().collect::<Vec<_>>(), vec![(4, 1), (3, 2), (2, 3), (1, 4)]);

    assert!(fleet.sink(4));
    assert!(!fleet.sink(4));
    assert!(!fleet.sink(5));
    assert_eq!(fleet.remaining(4), 0);
    assert_eq!(fleet.total(), 9);
}

#[test]
fn builds_longest_ship_first() {
    let mut builder = FleetBuilder::new();
    assert_eq!(builder.current_len(), Some(4));
    assert_eq!(builder.add(c("A1")), Ok(PlacementProgress::Extended { missing: 3 }));
    assert_eq!(builder.grid()[c("A2")], CellState::Candidate);
    assert_eq!(builder.grid()[c("B1")], CellState::Candidate);

    assert_eq!(builder.add(c("A2")), Ok(PlacementProgress::Extended { missing: 2 }));
    // Axis is fixed now.
    assert_eq!(builder.add(c("B2")), Err(PlacementError::NotCandidate));
    assert_eq!(builder.add(c("A3")), Ok(PlacementProgress::Extended { missing: 1 }));
    assert_eq!(builder.add(c("A4")), Ok(PlacementProgress::ShipFinished { len: 4 }));

    assert_eq!(builder.current_len(), Some(3));
    assert_eq!(builder.grid().count(CellState::Candidate), 0);
    assert_eq!(builder.grid()[c("B5")], CellState::Miss);
    assert_eq!(builder.add(c("B3")), Err(PlacementError::TouchesShip));
    assert_eq!(builder.add(c("A2")), Err(PlacementError::Occupied));
}

#[test]
fn restart_clears_the_unfinished_ship() {
    let mut builder = FleetBuilder::new();
    builder.add(c("E5")).unwrap();
    builder.add(c("F5")).unwrap();
    builder.restart_ship();
    assert!(builder.current_ship().is_empty());
    assert_eq!(builder.grid().count(CellState::Ship), 0);
    assert_eq!(builder.grid().count(CellState::Candidate), 0);
    assert_eq!(builder.current_len(), Some(4));
}

#[test]
fn full_manual_fleet() {
    let ships: [&[&str]; 10] = [
        &["A1", "A2", "A3", "A4"],
        &["C1", "C2", "C3"],
        &["E1", "E2", "E3"],
        &["G1", "G2"],
        &["I1", "I2"],
        &["A6", "A7"],
        &["C6"],
        &["E6"],
        &["G6"],
        &["I6"],
    ];
    let mut builder = FleetBuilder::new();
    let mut last = None;
    for ship in ships {
        for label in ship {
            last = Some(builder.add(c(label)).unwrap());
        }
    }
    assert_eq!(last, Some(PlacementProgress::FleetFinished));
    assert_eq!(builder.add(c("J10")), Err(PlacementError::FleetComplete));
    assert_eq!(builder.finish().map(|f| f.len()), Some(TOTAL_SHIP_CELLS));
}

#[test]
fn unfinished_fleet_has_no_coordinates() {
    let mut builder = FleetBuilder::new();
    builder.add(c("A1")).unwrap();
    assert_eq!(builder.finish(), None);
}

#[test]
fn random_fleets_follow_the_template() {
    for seed in 0..20 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let fleet = FleetBuilder::random(&mut rng);
        assert_eq!(fleet.len(), TOTAL_SHIP_CELLS);

        let mut grid = Grid::new();
        for &cell in &fleet {
            grid[cell] = CellState::Hit;
        }
        let mut lengths = Vec::new();
        let mut seen = Grid::new();
        for &cell in &fleet {
            if seen[cell] == CellState::Hit {
                continue;
            }
            let cluster = extract_cluster(&grid, cell);
            for &part in &cluster {
                seen[part] = CellState::Hit;
            }
            lengths.push(cluster.len());
        }
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(lengths, vec![4, 3, 3, 2, 2, 2, 1, 1, 1, 1], "seed {}", seed);
    }
}
