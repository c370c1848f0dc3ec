//! Common types for the engine: cell states, shot results and engine errors.

/// State of one cell on either board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    /// A ship segment. On the opponent board this marks a confirmed sunk cluster.
    Ship,
    Hit,
    Miss,
    /// Placement-time highlight: a cell the ship under construction may extend into.
    Candidate,
}

impl CellState {
    /// `true` once a shot has resolved this cell (or it was inferred empty).
    pub fn is_resolved(self) -> bool {
        matches!(self, CellState::Hit | CellState::Miss | CellState::Ship)
    }
}

/// Result reported by the service for one fired shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum ShotResult {
    Miss,
    Hit,
    Sunk,
}

impl ShotResult {
    /// Hits and sinks keep the turn; only a miss hands it over.
    pub fn keeps_turn(self) -> bool {
        !matches!(self, ShotResult::Miss)
    }
}

/// Final result of a match as recorded by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    /// Interpret the service's `last_game_status` field. Anything but `win` is a loss.
    pub fn from_last_status(raw: &str) -> Self {
        if raw == "win" {
            Outcome::Won
        } else {
            Outcome::Lost
        }
    }
}

/// Errors produced while decoding a cell label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordError {
    /// Labels are two or three characters long.
    BadLength(usize),
    /// Row tag outside `A..=J`.
    BadRow(char),
    /// Column tag outside `1..=10`.
    BadColumn,
    /// Numeric (row, column) pair outside the board.
    OutOfBounds(usize, usize),
}

impl core::fmt::Display for CoordError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CoordError::BadLength(len) => {
                write!(f, "coordinate should have length 2 or 3, got {}", len)
            }
            CoordError::BadRow(ch) => write!(f, "invalid row '{}' - must be a letter A-J", ch),
            CoordError::BadColumn => write!(f, "invalid column - must be a number 1-10"),
            CoordError::OutOfBounds(r, c) => write!(f, "cell ({}, {}) is outside the board", r, c),
        }
    }
}

/// Errors returned while building a fleet by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Cell already holds a ship segment.
    Occupied,
    /// Cell touches a finished ship (including diagonally).
    TouchesShip,
    /// Cell does not extend the current ship in a straight line.
    NotCandidate,
    /// Every ship of the template is already placed.
    FleetComplete,
}

impl core::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PlacementError::Occupied => write!(f, "Cell already holds a ship"),
            PlacementError::TouchesShip => write!(f, "Ships may not touch each other"),
            PlacementError::NotCandidate => {
                write!(f, "Ship must be extended in a straight line from its last cells")
            }
            PlacementError::FleetComplete => write!(f, "All ships are already placed"),
        }
    }
}

/// Errors raised by session transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The transition is not allowed from the current phase.
    InvalidPhase(&'static str),
    /// Firing was attempted while it is not the local turn.
    NotYourTurn,
    /// The cell was already resolved on the opponent board.
    AlreadyTargeted,
}

impl core::fmt::Display for SessionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SessionError::InvalidPhase(op) => write!(f, "{} is not valid in the current phase", op),
            SessionError::NotYourTurn => write!(f, "It is not your turn"),
            SessionError::AlreadyTargeted => write!(f, "Cell was already targeted"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoordError {}
#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}
#[cfg(feature = "std")]
impl std::error::Error for SessionError {}
