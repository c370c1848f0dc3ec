use std::io::{self, BufRead, Write};
use std::thread;

use log::{debug, warn};
use tokio::sync::mpsc;

use crate::cli::display::render_grid;
use crate::core::{Coord, Grid, PlacementError, PlacementProgress, Snapshot};
use crate::surface::{PlacementInput, PlacementStep, TargetInput};

/// Lines typed on stdin, read on a dedicated thread.
///
/// Every prompt in the client goes through one reader so that nothing else
/// competes for the stdin lock. Receiving is cancel safe: a line that
/// arrives while nobody waits stays queued for the next prompt.
pub struct LineReader {
    rx: mpsc::UnboundedReceiver<String>,
}

impl LineReader {
    /// Start the reader thread on the process's stdin.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("stdin read failed: {}", e);
                        break;
                    }
                }
            }
            debug!("stdin closed");
        });
        Self { rx }
    }

    /// Reader fed from a channel instead of stdin.
    pub fn from_channel(rx: mpsc::UnboundedReceiver<String>) -> Self {
        Self { rx }
    }

    /// Next trimmed line, `None` once input is closed.
    pub async fn next_line(&mut self) -> Option<String> {
        self.rx.recv().await.map(|line| line.trim().to_string())
    }

    /// Print `text` without a newline and wait for the answer.
    pub async fn prompt(&mut self, text: &str) -> Option<String> {
        print!("{}", text);
        let _ = io::stdout().flush();
        self.next_line().await
    }
}

fn is_quit(line: &str) -> bool {
    line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("q")
}

/// Targets typed by the player.
pub struct StdinTargets<'a> {
    lines: &'a mut LineReader,
}

impl<'a> StdinTargets<'a> {
    pub fn new(lines: &'a mut LineReader) -> Self {
        Self { lines }
    }
}

#[async_trait::async_trait]
impl TargetInput for StdinTargets<'_> {
    async fn next_target(&mut self, snapshot: &Snapshot) -> Option<Coord> {
        loop {
            let line = self
                .lines
                .prompt("Target (e.g. B7, 'quit' to leave the match): ")
                .await?;
            if line.is_empty() {
                continue;
            }
            if is_quit(&line) {
                return None;
            }
            match Coord::parse_lenient(&line) {
                Ok(coord) if snapshot.opponent_grid[coord].is_resolved() => {
                    println!("{} was already targeted, pick another cell.", coord);
                }
                Ok(coord) => return Some(coord),
                Err(e) => println!("Invalid target {:?}: {}", line, e),
            }
        }
    }
}

/// Ship cells typed by the player.
pub struct StdinPlacement<'a> {
    lines: &'a mut LineReader,
}

impl<'a> StdinPlacement<'a> {
    pub fn new(lines: &'a mut LineReader) -> Self {
        Self { lines }
    }
}

#[async_trait::async_trait]
impl PlacementInput for StdinPlacement<'_> {
    async fn next_step(&mut self, grid: &Grid, ship_len: usize) -> PlacementStep {
        println!();
        for line in render_grid(grid, true) {
            println!("{}", line);
        }
        loop {
            let prompt = format!(
                "Ship of length {}: cell (e.g. A1), 'undo' to redo this ship, 'cancel' to stop: ",
                ship_len
            );
            let Some(line) = self.lines.prompt(&prompt).await else {
                return PlacementStep::Cancelled;
            };
            if line.eq_ignore_ascii_case("undo") {
                return PlacementStep::Undo;
            }
            if line.eq_ignore_ascii_case("cancel") || is_quit(&line) {
                return PlacementStep::Cancelled;
            }
            match Coord::parse_lenient(&line) {
                Ok(coord) => return PlacementStep::Cell(coord),
                Err(e) => println!("Invalid cell {:?}: {}", line, e),
            }
        }
    }

    fn placement_result(&mut self, coord: Coord, result: &Result<PlacementProgress, PlacementError>) {
        match result {
            Ok(PlacementProgress::Extended { missing }) => {
                println!("{} placed, {} more cell(s) for this ship.", coord, missing)
            }
            Ok(PlacementProgress::ShipFinished { len }) => println!("Ship of length {} done.", len),
            Ok(PlacementProgress::FleetFinished) => println!("Fleet complete."),
            Err(e) => println!("Cannot place {}: {}", coord, e),
        }
    }
}
