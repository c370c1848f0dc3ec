use crate::domain::{ListEntry, PlayerStats};

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    PlayBot,
    ChallengePlayer,
    WaitForChallenge,
    Leaderboard,
    OwnStats,
    SetUpFleet,
    Quit,
}

const ENTRIES: [(&str, MenuChoice, &str); 7] = [
    ("1", MenuChoice::PlayBot, "Play against the server bot"),
    ("2", MenuChoice::ChallengePlayer, "Challenge a waiting player"),
    ("3", MenuChoice::WaitForChallenge, "Join the waiting list"),
    ("4", MenuChoice::Leaderboard, "Top 10 players"),
    ("5", MenuChoice::OwnStats, "Your statistics"),
    ("6", MenuChoice::SetUpFleet, "Set up your fleet"),
    ("q", MenuChoice::Quit, "Quit"),
];

pub fn parse_choice(line: &str) -> Option<MenuChoice> {
    let line = line.trim();
    ENTRIES
        .iter()
        .find(|(key, _, _)| key.eq_ignore_ascii_case(line))
        .map(|(_, choice, _)| *choice)
}

pub fn print_menu(custom_fleet: bool) {
    println!();
    for (key, _, label) in ENTRIES.iter() {
        println!("  {}) {}", key, label);
    }
    if custom_fleet {
        println!("  (your own fleet will be used)");
    }
}

/// Nicks of players waiting for a challenge, excluding `own_nick`.
pub fn waiting_opponents(entries: &[ListEntry], own_nick: &str) -> Vec<String> {
    entries
        .iter()
        .filter(|e| e.game_status == "waiting" && e.nick != own_nick)
        .map(|e| e.nick.clone())
        .collect()
}

pub fn format_stats(stats: &PlayerStats) -> String {
    format!(
        "{:>4}  {:<20} {:>6} {:>6} {:>8}",
        stats.rank, stats.nick, stats.games, stats.wins, stats.points
    )
}

pub fn print_stats_table(rows: &[PlayerStats]) {
    println!(
        "{:>4}  {:<20} {:>6} {:>6} {:>8}",
        "Rank", "Nick", "Games", "Wins", "Points"
    );
    for row in rows {
        println!("{}", format_stats(row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_by_key() {
        assert_eq!(parse_choice(" 1 "), Some(MenuChoice::PlayBot));
        assert_eq!(parse_choice("Q"), Some(MenuChoice::Quit));
        assert_eq!(parse_choice("7"), None);
    }

    #[test]
    fn only_other_waiting_players_are_offered() {
        let entries = vec![
            ListEntry { game_status: "waiting".into(), nick: "ala".into() },
            ListEntry { game_status: "game_in_progress".into(), nick: "ola".into() },
            ListEntry { game_status: "waiting".into(), nick: "me".into() },
        ];
        assert_eq!(waiting_opponents(&entries, "me"), vec!["ala".to_string()]);
    }
}
