use log::{debug, info};

use crate::core::{Coord, FleetBuilder};
use crate::surface::{PlacementInput, PlacementStep};

/// Build a complete fleet from placement input.
///
/// Returns every ship coordinate once all ships are placed, or `None` when
/// the input cancels. Rejected cells are reported back to the input and
/// otherwise ignored.
pub async fn build_fleet(input: &mut dyn PlacementInput) -> Option<Vec<Coord>> {
    let mut builder = FleetBuilder::new();
    while let Some(len) = builder.current_len() {
        match input.next_step(builder.grid(), len).await {
            PlacementStep::Cancelled => {
                info!("fleet setup cancelled");
                return None;
            }
            PlacementStep::Undo => builder.restart_ship(),
            PlacementStep::Cell(coord) => {
                let res = builder.add(coord);
                if let Err(e) = &res {
                    debug!("rejected {} for a ship of length {}: {}", coord, len, e);
                }
                input.placement_result(coord, &res);
            }
        }
    }
    builder.finish()
}
