//! Error taxonomy for mapper synthesis.

use std::path::PathBuf;

use thiserror::Error;

use crate::workspace::DocumentId;

/// Errors that abort a synthesis request.
///
/// Structural absence (no namespace, no class, no `Map` method) is never
/// reported here: it is the "create" branch of find-or-create.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SynthesisError {
    /// Cooperative cancellation was observed at a suspension point.
    #[error("synthesis cancelled")]
    Cancelled,

    /// A document id does not belong to the workspace snapshot.
    #[error("document {0} is not part of the workspace")]
    UnknownDocument(DocumentId),

    /// A document id was registered twice.
    #[error("document {id} already exists at {}", path.display())]
    DuplicateDocument {
        /// The id that collided.
        id: DocumentId,
        /// Path of the document already holding the id.
        path: PathBuf,
    },

    /// A node path did not resolve against the root it was applied to.
    #[error("{kind} `{name}` does not resolve in {}", path.display())]
    StaleHandle {
        /// Node kind (`namespace`, `class`, `method`).
        kind: &'static str,
        /// Declared name the path points at.
        name: String,
        /// Document the path was resolved against.
        path: PathBuf,
    },

    /// The trigger supplied no source type and the class carries no
    /// `MappingSource` comment.
    #[error("no mapping source given for class `{0}`")]
    MissingMappingSource(String),

    /// The target class could not be found in the current document.
    #[error("class `{class}` not found in {}", path.display())]
    TargetClassNotFound {
        /// Requested class name.
        class: String,
        /// Document that was searched.
        path: PathBuf,
    },

    /// The body generator returned a document that breaks its contract.
    #[error("body generator contract violated: {0}")]
    BodyGeneratorContract(String),
}
