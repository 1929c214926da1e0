//! Replaying adapter for the `IdGenerator` port.

use std::sync::Mutex;

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::IdGenerator;
use crate::workspace::DocumentId;

/// Replays recorded document ids from a cassette.
pub struct ReplayingIdGenerator {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingIdGenerator {
    /// Creates a replaying id generator from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl IdGenerator for ReplayingIdGenerator {
    fn new_document_id(&self) -> DocumentId {
        let output = next_output(&self.replayer, "id_gen", "new_document_id");
        let text = output.as_str().unwrap_or_else(|| {
            panic!("id_gen::new_document_id: expected string output, got {output}")
        });
        DocumentId::parse(text).unwrap_or_else(|e| {
            panic!("id_gen::new_document_id: recorded id {text:?} is not a uuid: {e}")
        })
    }
}
