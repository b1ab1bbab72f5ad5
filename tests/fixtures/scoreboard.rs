//! Generated by wire-idl. Do not edit.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Points(pub u32);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Confidence(pub f64);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScoreEvent {
    Reset,
    PointsAwarded {
        points: Points,
        bonus_points: i64,
    },
    GuessScored {
        confidence: Confidence,
        correct: bool,
        time_ratio: f64,
    },
}

pub fn encode_score_event(value: &ScoreEvent) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(value)
}

pub fn decode_score_event(value: serde_json::Value) -> serde_json::Result<ScoreEvent> {
    serde_json::from_value(value)
}
