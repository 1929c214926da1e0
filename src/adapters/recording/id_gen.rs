//! Recording adapter for the `IdGenerator` port.

use std::sync::{Arc, Mutex};

use super::record_interaction;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::IdGenerator;
use crate::workspace::DocumentId;

/// Records handed-out document ids while delegating to an inner generator.
pub struct RecordingIdGenerator {
    inner: Box<dyn IdGenerator>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingIdGenerator {
    /// Wraps `inner`, recording every id into `recorder`.
    pub fn new(inner: Box<dyn IdGenerator>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl IdGenerator for RecordingIdGenerator {
    fn new_document_id(&self) -> DocumentId {
        let id = self.inner.new_document_id();
        record_interaction(&self.recorder, "id_gen", "new_document_id", &(), &id);
        id
    }
}
