//! ID generator port for new document identities.

use crate::workspace::DocumentId;

/// Hands out identities for documents added to a workspace.
///
/// Replaying adapters substitute a recorded sequence so forked documents
/// get the same ids on every test run.
pub trait IdGenerator: Send + Sync {
    /// Returns an id not used by any existing document.
    fn new_document_id(&self) -> DocumentId;
}
