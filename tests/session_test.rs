//! Tests for the authoritative game session.

use strictly_slide::{Action, Coordinate, Phase, Player as Mark, choose_action};
use strictly_slide_games::{GameSession, GameStatus, MatchConfig, PlayerRole, SessionError};

fn at(row: usize, col: usize) -> Coordinate {
    Coordinate::new(row, col)
}

#[test]
fn test_roles_resolved_from_config() {
    let config = MatchConfig::new(PlayerRole::Automated, PlayerRole::Human).with_seed(Some(0));
    let session = GameSession::new(config);
    assert_eq!(session.role_of(Mark::X), PlayerRole::Automated);
    assert_eq!(session.role_of(Mark::O), PlayerRole::Human);
}

#[test]
fn test_session_reaches_sliding_after_six_placements() {
    let mut session = GameSession::new(MatchConfig::automated().with_seed(Some(21)));
    for (row, col) in [(0, 0), (0, 1), (1, 1), (0, 2), (2, 1), (1, 0)] {
        session.submit(Action::place(at(row, col))).unwrap();
    }
    assert_eq!(session.position().phase(), Phase::Sliding);
    assert_eq!(session.status(), GameStatus::InProgress);

    let err = session.submit(Action::place(at(2, 2))).unwrap_err();
    assert!(matches!(err, SessionError::IllegalMove(_)));
}

#[test]
fn test_history_matches_applied_actions() {
    let mut session = GameSession::new(MatchConfig::automated().with_seed(Some(4)));
    let mut expected = Vec::new();
    for _ in 0..8 {
        if session.status().is_over() {
            break;
        }
        let mover = session.position().turn();
        let action = choose_action(session.position()).unwrap();
        session.submit(action).unwrap();
        expected.push((mover, action));
    }

    let recorded: Vec<_> = session
        .history()
        .iter()
        .map(|record| (record.player, record.action))
        .collect();
    assert_eq!(recorded, expected);
}

#[test]
fn test_status_serializes_for_transcripts() {
    let json = serde_json::to_string(&GameStatus::Won(Mark::O)).unwrap();
    assert_eq!(json, r#"{"status":"won","player":"o"}"#);
    let json = serde_json::to_string(&GameStatus::InProgress).unwrap();
    assert_eq!(json, r#"{"status":"in_progress"}"#);
}
