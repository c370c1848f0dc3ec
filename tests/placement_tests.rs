use std::collections::VecDeque;

use warships::{
    build_fleet, Coord, Grid, PlacementError, PlacementInput, PlacementProgress, PlacementStep,
    TOTAL_SHIP_CELLS,
};

/// Replays placement steps and records what the builder said about them.
struct ScriptedPlacement {
    steps: VecDeque<PlacementStep>,
    lengths_asked: Vec<usize>,
    rejected: Vec<(Coord, PlacementError)>,
}

impl ScriptedPlacement {
    fn new(steps: Vec<PlacementStep>) -> Self {
        Self {
            steps: steps.into(),
            lengths_asked: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

#[async_trait::async_trait]
impl PlacementInput for ScriptedPlacement {
    async fn next_step(&mut self, _grid: &Grid, ship_len: usize) -> PlacementStep {
        self.lengths_asked.push(ship_len);
        self.steps.pop_front().unwrap_or(PlacementStep::Cancelled)
    }

    fn placement_result(&mut self, coord: Coord, result: &Result<PlacementProgress, PlacementError>) {
        if let Err(e) = result {
            self.rejected.push((coord, *e));
        }
    }
}

fn cells(labels: &[&str]) -> Vec<PlacementStep> {
    labels
        .iter()
        .map(|l| PlacementStep::Cell(Coord::decode(l).unwrap()))
        .collect()
}

const FLEET: [&str; 20] = [
    "A1", "A2", "A3", "A4", "C1", "C2", "C3", "E1", "E2", "E3", "G1", "G2", "I1", "I2", "A6", "A7",
    "C6", "E6", "G6", "I6",
];

#[tokio::test]
async fn complete_fleet_in_order() {
    let mut input = ScriptedPlacement::new(cells(&FLEET));
    let fleet = build_fleet(&mut input).await.unwrap();

    assert_eq!(fleet.len(), TOTAL_SHIP_CELLS);
    assert_eq!(fleet[0], Coord::decode("A1").unwrap());
    assert_eq!(&input.lengths_asked[..4], &[4, 4, 4, 4]);
    assert_eq!(input.lengths_asked.last(), Some(&1));
    assert!(input.rejected.is_empty());
}

#[tokio::test]
async fn rejected_cells_and_undo() {
    let mut steps = cells(&["A1", "B2"]);
    steps.push(PlacementStep::Undo);
    steps.extend(cells(&FLEET[..4]));
    steps.extend(cells(&["B1"]));
    steps.extend(cells(&FLEET[4..]));
    let mut input = ScriptedPlacement::new(steps);

    let fleet = build_fleet(&mut input).await;
    assert_eq!(fleet.map(|f| f.len()), Some(TOTAL_SHIP_CELLS));
    assert_eq!(
        input.rejected,
        vec![
            (Coord::decode("B2").unwrap(), PlacementError::NotCandidate),
            (Coord::decode("B1").unwrap(), PlacementError::TouchesShip),
        ]
    );
}

#[tokio::test]
async fn cancel_discards_the_fleet() {
    let mut steps = cells(&["A1", "A2"]);
    steps.push(PlacementStep::Cancelled);
    let mut input = ScriptedPlacement::new(steps);
    assert_eq!(build_fleet(&mut input).await, None);
    assert_eq!(input.lengths_asked, vec![4, 4, 4]);
}
