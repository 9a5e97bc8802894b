//! JSON encoding for whole-session snapshots.
//!
//! Snapshots are wrapped in a small envelope carrying a format version so an
//! incompatible blob is rejected instead of half-decoded.

use quiz_core::model::SessionState;
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

/// Current snapshot envelope version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    state: &'a SessionState,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    state: SessionState,
}

/// Serialize a session into its stored JSON form.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_snapshot(state: &SessionState) -> Result<String, StorageError> {
    serde_json::to_string(&EnvelopeRef {
        version: SNAPSHOT_VERSION,
        state,
    })
    .map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Parse a stored snapshot.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON or an unknown
/// envelope version.
pub fn decode_snapshot(raw: &str) -> Result<SessionState, StorageError> {
    let envelope: Envelope =
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(StorageError::Serialization(format!(
            "unsupported snapshot version {}",
            envelope.version
        )));
    }
    Ok(envelope.state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;
    use quiz_core::{AssessmentEngine, FixedSequence, SessionEvent};

    #[test]
    fn snapshot_keeps_every_field() {
        let engine = AssessmentEngine::standard();
        let mut rng = FixedSequence::first();
        let state = engine
            .reduce(&engine.fresh_session(fixed_now()), SessionEvent::Start, &mut rng)
            .unwrap();
        let state = engine
            .reduce(&state, SessionEvent::Answer { choice: 2 }, &mut rng)
            .unwrap();

        let raw = encode_snapshot(&state).unwrap();
        assert_eq!(decode_snapshot(&raw).unwrap(), state);
    }

    #[test]
    fn rejects_unknown_version_and_garbage() {
        let state = AssessmentEngine::standard().fresh_session(fixed_now());
        let raw = encode_snapshot(&state).unwrap().replace("\"version\":1", "\"version\":99");
        assert!(matches!(
            decode_snapshot(&raw),
            Err(StorageError::Serialization(msg)) if msg.contains("99")
        ));
        assert!(decode_snapshot("{not json").is_err());
    }

    #[test]
    fn older_snapshot_without_marker_decodes_unsubmitted() {
        let state = AssessmentEngine::standard().fresh_session(fixed_now());
        let mut value: serde_json::Value = serde_json::from_str(&encode_snapshot(&state).unwrap()).unwrap();
        value["state"]
            .as_object_mut()
            .unwrap()
            .remove("submitted_for");
        let decoded = decode_snapshot(&value.to_string()).unwrap();
        assert!(!decoded.is_submitted());
        assert_eq!(decoded, state);
    }
}
