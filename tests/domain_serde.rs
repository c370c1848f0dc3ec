use warships::domain::{
    BoardResponse, FireResponse, GameStatus, InitGameRequest, ListEntry, PlayerStatsResponse,
    StatsResponse, StatusResponse,
};
use warships::{Coord, MatchRequest, MatchState, Outcome, ShotResult, StatusReport};

fn c(label: &str) -> Coord {
    Coord::decode(label).unwrap()
}

#[test]
fn status_in_progress() -> anyhow::Result<()> {
    let body = r#"{
        "game_status": "game_in_progress",
        "last_game_status": "",
        "nick": "me",
        "opp_shots": ["A1", "J10"],
        "opponent": "bot",
        "should_fire": true,
        "timer": 55
    }"#;
    let status: StatusResponse = serde_json::from_str(body)?;
    assert_eq!(status.game_status, GameStatus::InProgress);

    let report = StatusReport::from(&status);
    assert_eq!(report.state, MatchState::InProgress);
    assert!(report.your_turn);
    assert_eq!(report.opponent_shots, vec![c("A1"), c("J10")]);
    assert_eq!(report.last_outcome, None);
    assert_eq!(report.timer, Some(55));
    Ok(())
}

#[test]
fn waiting_states_are_pending() -> anyhow::Result<()> {
    for raw in ["waiting", "waiting_wpbot", "no_game", "something_new"] {
        let body = format!(r#"{{"game_status": "{}"}}"#, raw);
        let status: StatusResponse = serde_json::from_str(&body)?;
        let report = StatusReport::from(&status);
        assert_eq!(report.state, MatchState::Pending, "{}", raw);
        assert_eq!(report.timer, None);
    }
    Ok(())
}

#[test]
fn ended_carries_the_outcome() -> anyhow::Result<()> {
    let status: StatusResponse = serde_json::from_str(
        r#"{"game_status": "ended", "last_game_status": "win", "opp_shots": null}"#,
    )?;
    assert!(status.opp_shots.is_empty());
    let report = StatusReport::from(&status);
    assert_eq!(report.state, MatchState::Ended);
    assert_eq!(report.last_outcome, Some(Outcome::Won));

    let lost = StatusReport::from(&StatusResponse::ended("lose"));
    assert_eq!(lost.last_outcome, Some(Outcome::Lost));
    Ok(())
}

#[test]
fn malformed_shot_label_is_rejected() {
    let body = r#"{"game_status": "game_in_progress", "opp_shots": ["K11"]}"#;
    assert!(serde_json::from_str::<StatusResponse>(body).is_err());
}

#[test]
fn negative_timer_is_ignored() -> anyhow::Result<()> {
    let status: StatusResponse =
        serde_json::from_str(r#"{"game_status": "game_in_progress", "timer": -3}"#)?;
    assert_eq!(StatusReport::from(&status).timer, None);
    Ok(())
}

#[test]
fn init_request_body() -> anyhow::Result<()> {
    let req = MatchRequest {
        fleet: None,
        description: "hi".into(),
        nick: "me".into(),
        opponent_nick: Some("ala".into()),
        vs_bot: false,
    };
    let value = serde_json::to_value(InitGameRequest::from(&req))?;
    assert_eq!(
        value,
        serde_json::json!({"desc": "hi", "nick": "me", "target_nick": "ala", "wpbot": false})
    );

    let with_fleet = MatchRequest {
        fleet: Some(vec![c("A1"), c("A2")]),
        vs_bot: true,
        ..MatchRequest::default()
    };
    let value = serde_json::to_value(InitGameRequest::from(&with_fleet))?;
    assert_eq!(value["coords"], serde_json::json!(["A1", "A2"]));
    assert_eq!(value["target_nick"], "");
    assert_eq!(value["wpbot"], true);
    Ok(())
}

#[test]
fn other_bodies() -> anyhow::Result<()> {
    let board: BoardResponse = serde_json::from_str(r#"{"board": ["B2", "B3"]}"#)?;
    assert_eq!(board.board, vec![c("B2"), c("B3")]);

    for (raw, expected) in [("miss", ShotResult::Miss), ("hit", ShotResult::Hit), ("sunk", ShotResult::Sunk)] {
        let body = format!(r#"{{"result": "{}"}}"#, raw);
        let res: FireResponse = serde_json::from_str(&body)?;
        assert_eq!(res.result, expected);
    }

    let list: Vec<ListEntry> = serde_json::from_str(r#"[{"game_status": "waiting", "nick": "ala"}]"#)?;
    assert_eq!(list[0].nick, "ala");

    let stats: StatsResponse = serde_json::from_str(
        r#"{"stats": [{"rank": 1, "nick": "ala", "games": 10, "wins": 7, "points": 1200}]}"#,
    )?;
    assert_eq!(stats.stats[0].wins, 7);

    let own: PlayerStatsResponse =
        serde_json::from_str(r#"{"stats": {"rank": 5, "nick": "me", "games": 2, "wins": 1, "points": 40}}"#)?;
    assert_eq!(own.stats.rank, 5);
    Ok(())
}
