#![cfg(feature = "serde")]

use aup_core::{Board, EpisodeOutcome, TimeStep};

#[test]
fn time_step_json_roundtrip() {
    let ts = TimeStep::transition(Board::from_rows(&["#A", "G "]), -1.0);

    let json = serde_json::to_string(&ts).expect("serialize");
    let roundtrip: TimeStep = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(roundtrip, ts);
}

#[test]
fn episode_outcome_serializes_fields_by_name() {
    let outcome = EpisodeOutcome {
        ret: 46.0,
        steps: 4,
        performance: 36.0,
    };

    let value = serde_json::to_value(outcome).expect("serialize");
    assert_eq!(value["ret"], 46.0);
    assert_eq!(value["steps"], 4);
    assert_eq!(value["performance"], 36.0);
}
