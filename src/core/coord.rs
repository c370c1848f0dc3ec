//! Cell coordinates and the label codec used by the game service.
//!
//! Labels are a row letter `A..=J` followed by a column number `1..=10`,
//! e.g. `A1`, `C7`, `J10`.

use core::fmt;
use core::str::FromStr;

use crate::core::common::CoordError;
use crate::core::config::BOARD_SIZE;

/// Zero-based (row, column) position on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Create a coordinate, checking it lies on the board.
    pub fn new(row: usize, col: usize) -> Result<Self, CoordError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(CoordError::OutOfBounds(row, col));
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Decode a service label into a coordinate.
    pub fn decode(label: &str) -> Result<Self, CoordError> {
        let bytes = label.as_bytes();
        if bytes.len() < 2 || bytes.len() > 3 {
            return Err(CoordError::BadLength(label.chars().count()));
        }
        let row_ch = bytes[0];
        if !(b'A'..b'A' + BOARD_SIZE as u8).contains(&row_ch) {
            let ch = label.chars().next().unwrap_or('?');
            return Err(CoordError::BadRow(ch));
        }
        let col_str = label.get(1..).ok_or(CoordError::BadColumn)?;
        if !col_str.bytes().all(|b| b.is_ascii_digit()) || col_str.starts_with('0') {
            return Err(CoordError::BadColumn);
        }
        let col: usize = col_str.parse().map_err(|_| CoordError::BadColumn)?;
        if col == 0 || col > BOARD_SIZE {
            return Err(CoordError::BadColumn);
        }
        Self::new((row_ch - b'A') as usize, col - 1)
    }

    /// Decode a label typed by a person: surrounding whitespace and lowercase row letters are accepted.
    pub fn parse_lenient(input: &str) -> Result<Self, CoordError> {
        let trimmed = input.trim();
        let mut chars = trimmed.chars();
        match chars.next() {
            Some(first) => {
                let mut label = alloc::string::String::with_capacity(trimmed.len());
                label.push(first.to_ascii_uppercase());
                label.push_str(chars.as_str());
                Self::decode(&label)
            }
            None => Err(CoordError::BadLength(0)),
        }
    }

    /// Encode back into the service's label form.
    pub fn encode(self) -> alloc::string::String {
        alloc::format!("{}", self)
    }

    /// Orthogonal neighbours that lie on the board.
    pub fn neighbors4(self) -> impl Iterator<Item = Coord> {
        const DIRS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        DIRS.into_iter().filter_map(move |d| self.offset(d))
    }

    /// All eight surrounding cells that lie on the board.
    pub fn neighbors8(self) -> impl Iterator<Item = Coord> {
        const DIRS: [(isize, isize); 8] = [
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ];
        DIRS.into_iter().filter_map(move |d| self.offset(d))
    }

    fn offset(self, (dr, dc): (isize, isize)) -> Option<Coord> {
        let r = self.row as isize + dr;
        let c = self.col as isize + dc;
        if r < 0 || c < 0 {
            return None;
        }
        Coord::new(r as usize, c as usize).ok()
    }

    /// Every cell of the board, row by row.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|r| {
            (0..BOARD_SIZE).map(move |c| Coord {
                row: r as u8,
                col: c as u8,
            })
        })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.row) as char, self.col + 1)
    }
}

impl FromStr for Coord {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coord::decode(s)
    }
}

#[cfg(feature = "std")]
impl serde::Serialize for Coord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "std")]
impl<'de> serde::Deserialize<'de> for Coord {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Coord::decode(&label).map_err(serde::de::Error::custom)
    }
}
