//! Live adapter for the `IdGenerator` port.

use uuid::Uuid;

use crate::ports::IdGenerator;
use crate::workspace::DocumentId;

/// Hands out random v4 document ids.
#[derive(Debug, Default)]
pub struct LiveIdGenerator;

impl LiveIdGenerator {
    /// Creates a new live id generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for LiveIdGenerator {
    fn new_document_id(&self) -> DocumentId {
        DocumentId::from_uuid(Uuid::new_v4())
    }
}
