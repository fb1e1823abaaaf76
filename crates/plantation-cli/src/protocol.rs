//! Line-oriented JSON transport.
//!
//! Each input line is one [`Request`] object tagged by its `"function"` field; each request is
//! answered by exactly one JSON value on its own output line.

use plantation_engine::{Move, MoveKind};
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "function", rename_all = "snake_case")]
pub(crate) enum Request {
    Init {
        name: String,
    },
    StartGame {
        sign: i32,
    },
    GetMove {
        board: Vec<Vec<i32>>,
        turn: u32,
        moves_remaining: u32,
        #[serde(default)]
        time_remaining: f64,
    },
    HandleMoveResult {
        #[serde(rename = "move")]
        kind: MoveKind,
        turn: u32,
        pos: Vec<i64>,
        result: String,
    },
    EndGame {
        your_score: i64,
        opponent_score: i64,
    },
}

impl Request {
    pub(crate) fn function(&self) -> &'static str {
        match self {
            Self::Init { .. } => "init",
            Self::StartGame { .. } => "start_game",
            Self::GetMove { .. } => "get_move",
            Self::HandleMoveResult { .. } => "handle_move_result",
            Self::EndGame { .. } => "end_game",
        }
    }
}

/// Answer to one request: the empty string, or the chosen move as `[family, params]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Response {
    Ack,
    Move(Move),
}

impl Serialize for Response {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Ack => serializer.serialize_str(""),
            Self::Move(mv) => mv.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use plantation_engine::Position;

    use super::*;

    #[test]
    fn test_decode_requests() {
        let request: Request =
            serde_json::from_str(r#"{"function": "init", "name": "alice"}"#).unwrap();
        assert_eq!(
            request,
            Request::Init {
                name: "alice".into()
            }
        );

        let request: Request =
            serde_json::from_str(r#"{"function": "start_game", "sign": -1}"#).unwrap();
        assert_eq!(request, Request::StartGame { sign: -1 });

        let request: Request = serde_json::from_str(
            r#"{"function": "handle_move_result", "move": "colonise", "turn": 4,
                "pos": [3, 3, 5, 0], "result": "occupied -2"}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            Request::HandleMoveResult {
                kind: MoveKind::Colonise,
                turn: 4,
                pos: vec![3, 3, 5, 0],
                result: "occupied -2".into(),
            }
        );
        assert_eq!(request.function(), "handle_move_result");

        let request: Request = serde_json::from_str(
            r#"{"function": "end_game", "your_score": 31, "opponent_score": -12}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            Request::EndGame {
                your_score: 31,
                opponent_score: -12
            }
        );
    }

    #[test]
    fn test_decode_get_move() {
        let board = vec![vec![0; 11]; 11];
        let line = serde_json::json!({
            "function": "get_move",
            "board": board,
            "turn": 2,
            "moves_remaining": 3,
            "time_remaining": 9.5,
        });
        let request: Request = serde_json::from_value(line).unwrap();
        let Request::GetMove {
            board: decoded,
            turn,
            moves_remaining,
            time_remaining,
        } = request
        else {
            panic!("unexpected request {request:?}");
        };
        assert_eq!(decoded, board);
        assert_eq!((turn, moves_remaining), (2, 3));
        assert!((time_remaining - 9.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reject_unknown_function_and_family() {
        assert!(serde_json::from_str::<Request>(r#"{"function": "resign"}"#).is_err());
        assert!(
            serde_json::from_str::<Request>(
                r#"{"function": "handle_move_result", "move": "harvest", "turn": 1,
                    "pos": [0, 0], "result": "OK"}"#
            )
            .is_err()
        );
    }

    #[test]
    fn test_encode_responses() {
        assert_eq!(serde_json::to_string(&Response::Ack).unwrap(), r#""""#);
        let plant = Response::Move(Move::Plant {
            target: Position::new(4, 0),
        });
        assert_eq!(serde_json::to_string(&plant).unwrap(), r#"["plant",[4,0]]"#);
        let colonise = Response::Move(Move::Colonise {
            target: Position::new(3, 3),
            source: Position::new(5, 0),
        });
        assert_eq!(
            serde_json::to_string(&colonise).unwrap(),
            r#"["colonise",[3,3,5,0]]"#
        );
    }
}
