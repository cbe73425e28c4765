//! Tests for loading game configuration from disk.

use pubsub_tictactoe::{Event, GameConfig, GameEnded, GameSession, GameState, Line, Sign};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_session_from_config_file() {
    let file = write_config(
        r#"
board_size = 4
first_sign = "A"
second_sign = "B"
first_name = "Ada"
second_name = "Grace"
"#,
    );

    let config = GameConfig::from_file(file.path()).unwrap();
    let session = GameSession::new(config).unwrap();
    session.start().unwrap();

    assert_eq!(session.board().size(), 4);
    assert_eq!(session.state(), GameState::AwaitingMove(Sign::new('A')));
    assert_eq!(session.players().first().label(), "Ada");
    assert_eq!(session.players().second().sign(), Sign::new('B'));
}

#[test]
fn test_empty_file_uses_defaults() {
    let file = write_config("");
    let config = GameConfig::from_file(file.path()).unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn test_missing_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read"));
}

#[test]
fn test_out_of_range_size_rejected() {
    let file = write_config("board_size = 17\n");
    let err = GameConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("between 3 and 16"));
}

#[test]
fn test_malformed_toml_rejected() {
    let file = write_config("board_size = [\n");
    assert!(GameConfig::from_file(file.path()).is_err());
}

#[test]
fn test_shallow_emit_limit_from_file() {
    let file = write_config("max_emit_depth = 1\n");
    let config = GameConfig::from_file(file.path()).unwrap();
    let session = GameSession::new(config).unwrap();
    session.start().unwrap();

    // Direct requests emit at the top level and fit under the limit.
    for index in [0, 4, 1, 7] {
        session.request_move(index).unwrap();
    }

    // A request sent over the bus nests its outbound events one level
    // deeper. The move still lands but its announcement is refused.
    let delivered = session
        .bus()
        .emit(&Event::RequestMove { cell_index: 2 })
        .unwrap();
    assert_eq!(delivered, 1);
    assert_eq!(
        session.state().ended(),
        Some(GameEnded::Win {
            sign: Sign::X,
            line: Line::new(vec![0, 1, 2]),
        })
    );
}
