use std::io::{self, Write};

use crate::core::{CellState, Grid, Phase, Snapshot, Turn, BOARD_SIZE};
use crate::surface::DisplaySink;

/// Column width descriptions are wrapped to.
pub const DESCRIPTION_WIDTH: usize = 44;

fn cell_char(state: CellState, reveal: bool) -> char {
    match state {
        CellState::Empty => '.',
        CellState::Ship if reveal => 'S',
        CellState::Ship => '#',
        CellState::Hit => 'X',
        CellState::Miss => 'o',
        CellState::Candidate => '+',
    }
}

/// Draw `grid` as text lines: column numbers on top, row letters on the left.
///
/// With `reveal` ship cells show as `S` (our own board), otherwise as `#`
/// (confirmed sunk ships on the opponent board).
pub fn render_grid(grid: &Grid, reveal: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(BOARD_SIZE + 1);
    let mut header = String::from("  ");
    for col in 1..=BOARD_SIZE {
        header.push_str(&format!("{:>3}", col));
    }
    lines.push(header);
    for (r, row) in grid.rows().iter().enumerate() {
        let mut line = format!("{} ", (b'A' + r as u8) as char);
        for &state in row.iter() {
            line.push_str("  ");
            line.push(cell_char(state, reveal));
        }
        lines.push(line);
    }
    lines
}

/// Greedy word wrap at `width` columns. Words longer than a line get a line of their own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn status_line(snapshot: &Snapshot) -> String {
    match snapshot.phase {
        Phase::MenuSelection => "In the menu".to_string(),
        Phase::MatchPending => "Waiting for an opponent...".to_string(),
        Phase::InProgress(Turn::Yours) => format!("Your turn ({}s left)", snapshot.countdown),
        Phase::InProgress(Turn::Opponent) => "Opponent's turn".to_string(),
        Phase::Ended(outcome) => format!("Match over: {:?}", outcome),
        Phase::Abandoned => "Match abandoned".to_string(),
    }
}

/// Everything [`TerminalDisplay`] prints for one snapshot.
pub fn render_snapshot(snapshot: &Snapshot) -> Vec<String> {
    let mut out = Vec::new();
    if snapshot.phase == Phase::MatchPending {
        out.push(status_line(snapshot));
        return out;
    }

    out.push(format!(
        "{:<34}{}",
        format!("You: {}", snapshot.player.nick),
        format!("Opponent: {}", snapshot.opponent.nick)
    ));
    let own = render_grid(&snapshot.own_grid, true);
    let theirs = render_grid(&snapshot.opponent_grid, false);
    for (left, right) in own.iter().zip(theirs.iter()) {
        out.push(format!("{:<34}{}", left, right));
    }

    let fleet: Vec<String> = snapshot
        .enemy_fleet
        .iter()
        .map(|(len, left)| format!("{}x{}", left, len))
        .collect();
    out.push(format!(
        "Accuracy: {}/{} ({:.0}%)   Enemy ships left: {}",
        snapshot.shots_hit,
        snapshot.shots_fired,
        snapshot.accuracy() * 100.0,
        fleet.join(" ")
    ));
    out.push(status_line(snapshot));
    out
}

/// Prints snapshots to stdout.
#[derive(Debug, Default)]
pub struct TerminalDisplay {
    described: bool,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn describe(&mut self, snapshot: &Snapshot) {
        for profile in [&snapshot.player, &snapshot.opponent] {
            if profile.description.trim().is_empty() {
                continue;
            }
            println!("{}:", profile.nick);
            for line in wrap_text(&profile.description, DESCRIPTION_WIDTH) {
                println!("  {}", line);
            }
        }
        self.described = true;
    }
}

impl DisplaySink for TerminalDisplay {
    fn show(&mut self, snapshot: &Snapshot) {
        match snapshot.phase {
            Phase::MatchPending => self.described = false,
            Phase::InProgress(_) if !self.described => self.describe(snapshot),
            _ => {}
        }
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout);
        for line in render_snapshot(snapshot) {
            let _ = writeln!(stdout, "{}", line);
        }
        let _ = stdout.flush();
    }

    fn notice(&mut self, message: &str) {
        println!("*** {} ***", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Coord;

    #[test]
    fn grid_rows_are_letters() {
        let mut grid = Grid::new();
        grid[Coord::decode("B10").unwrap()] = CellState::Hit;
        grid[Coord::decode("A1").unwrap()] = CellState::Ship;
        let lines = render_grid(&grid, false);
        assert_eq!(lines.len(), 11);
        assert!(lines[0].ends_with(" 10"));
        assert!(lines[1].starts_with("A   #"));
        assert!(lines[2].starts_with('B'));
        assert!(lines[2].ends_with('X'));
    }

    #[test]
    fn wraps_at_width() {
        let text = "a rather long description of a captain who likes to sail far away";
        let lines = wrap_text(text, DESCRIPTION_WIDTH);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= DESCRIPTION_WIDTH));
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn overlong_word_gets_its_own_line() {
        let lines = wrap_text("ab abcdefgh cd", 4);
        assert_eq!(lines, vec!["ab", "abcdefgh", "cd"]);
    }
}
