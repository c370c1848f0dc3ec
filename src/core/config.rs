/// Side length of both boards.
pub const BOARD_SIZE: usize = 10;

/// Number of distinct ship lengths in the fleet template.
pub const NUM_CLASSES: usize = 4;

/// Fleet template as `(ship length, ship count)`, longest first.
pub const FLEET: [(usize, usize); NUM_CLASSES] = [(4, 1), (3, 2), (2, 3), (1, 4)];

/// Total number of ships in one fleet.
pub const NUM_SHIPS: usize = 1 + 2 + 3 + 4;

/// Total number of ship segments in one fleet.
pub const TOTAL_SHIP_CELLS: usize = 4 + 3 * 2 + 2 * 3 + 4;

/// Longest ship in the template.
pub const MAX_SHIP_LEN: usize = 4;

/// Countdown used when the service does not report one, and after every hit.
pub const DEFAULT_TURN_SECONDS: u32 = 60;

/// While a match is pending, a keep-alive refresh is sent every this many polls.
pub const REFRESH_EVERY_POLLS: u32 = 10;

/// Ship lengths in the order manual placement builds them.
pub fn placement_order() -> impl Iterator<Item = usize> {
    FLEET
        .iter()
        .flat_map(|&(len, count)| core::iter::repeat(len).take(count))
}
