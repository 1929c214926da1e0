//! Serves recorded interactions back in order.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

type PortMethod = (String, String);

/// Replays a cassette, one queue per `port::method` pair.
///
/// Queues are independent, so interleaving between ports does not have to
/// match the recording; order within one pair does.
#[derive(Debug, Clone)]
pub struct CassetteReplayer {
    queues: HashMap<PortMethod, VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Creates a replayer over all interactions of `cassette`.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethod, VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Number of interactions not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    /// Returns the next interaction recorded for `port::method`.
    ///
    /// # Panics
    ///
    /// Panics when the pair was never recorded or its queue is used up. The
    /// message lists what the cassette does contain.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let key = (port.to_string(), method.to_string());
        let Some(queue) = self.queues.get_mut(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        };
        queue.pop_front().unwrap_or_else(|| {
            panic!(
                "Cassette exhausted: all interactions for port={port:?} method={method:?} \
                 have been consumed."
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq, port: port.into(), method: method.into(), input: json!(null), output }
    }

    fn cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette { name: "test".into(), recorded_at: Utc::now(), interactions }
    }

    #[test]
    fn serves_each_pair_in_recorded_order() {
        let mut replayer = CassetteReplayer::new(&cassette(vec![
            interaction(0, "fs", "exists", json!(true)),
            interaction(1, "id_gen", "new_document_id", json!("a")),
            interaction(2, "fs", "exists", json!(false)),
        ]));
        assert_eq!(replayer.remaining(), 3);

        // Pairs can be drained in a different interleaving than recorded.
        assert_eq!(replayer.next_interaction("id_gen", "new_document_id").seq, 1);
        assert_eq!(replayer.next_interaction("fs", "exists").output, json!(true));
        assert_eq!(replayer.next_interaction("fs", "exists").output, json!(false));
        assert_eq!(replayer.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "have been consumed")]
    fn exhausted_pair_panics() {
        let mut replayer =
            CassetteReplayer::new(&cassette(vec![interaction(0, "fs", "exists", json!(true))]));
        let _ = replayer.next_interaction("fs", "exists");
        let _ = replayer.next_interaction("fs", "exists");
    }

    #[test]
    #[should_panic(expected = "Available port::method pairs: [fs::exists]")]
    fn unknown_pair_lists_what_was_recorded() {
        let mut replayer =
            CassetteReplayer::new(&cassette(vec![interaction(0, "fs", "exists", json!(true))]));
        let _ = replayer.next_interaction("id_gen", "new_document_id");
    }
}
