//! Cassette data structures for recording and replaying interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded call on a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number, assigned by the recorder.
    pub seq: u64,
    /// Port name (`fs`, `id_gen`).
    pub port: String,
    /// Method invoked on the port.
    pub method: String,
    /// Arguments of the call.
    pub input: serde_json::Value,
    /// Value the port returned.
    pub output: serde_json::Value,
}

/// A named, timestamped sequence of interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name.
    pub name: String,
    /// When the cassette was written.
    pub recorded_at: DateTime<Utc>,
    /// Interactions in call order.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hand_written_cassette() {
        let yaml = r#"
name: fork-customer-mapper
recorded_at: 2025-03-15T14:30:00Z
interactions:
  - seq: 0
    port: id_gen
    method: new_document_id
    input: null
    output: 6f1c9a52-3d8e-4b7a-9c21-0e5f7d4b8a10
  - seq: 1
    port: fs
    method: exists
    input:
      path: /p/.mapforge.yaml
    output: false
"#;
        let cassette: Cassette = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cassette.name, "fork-customer-mapper");
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[1].input["path"], "/p/.mapforge.yaml");
        assert_eq!(cassette.interactions[1].output, serde_json::Value::Bool(false));
    }

    #[test]
    fn interactions_default_to_empty() {
        let cassette: Cassette =
            serde_yaml::from_str("name: empty\nrecorded_at: 2025-01-01T00:00:00Z\n").unwrap();
        assert!(cassette.interactions.is_empty());
    }
}
