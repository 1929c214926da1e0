//! The edit-set a synthesis request hands back for atomic application.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::workspace::{DocumentId, Workspace};

/// How a document differs between the originating and resulting snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    /// The document did not exist before.
    Added,
    /// The document's syntax root was replaced.
    Changed,
}

/// One document touched by a synthesis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentEdit {
    /// Document id.
    pub id: DocumentId,
    /// Absolute path.
    pub path: PathBuf,
    /// Kind of change.
    pub kind: EditKind,
}

/// All document changes between two snapshots, in workspace order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditSet {
    /// Touched documents.
    pub edits: Vec<DocumentEdit>,
}

impl EditSet {
    /// Computes the edits that turn `before` into `after`.
    ///
    /// Documents are compared by identity of their shared value first, so
    /// untouched documents cost nothing.
    #[must_use]
    pub fn between(before: &Workspace, after: &Workspace) -> Self {
        let edits = after
            .documents()
            .filter_map(|doc| {
                let kind = match before.document(doc.id) {
                    None => EditKind::Added,
                    Some(old) if Arc::ptr_eq(old, doc) || old.as_ref() == doc.as_ref() => {
                        return None;
                    }
                    Some(_) => EditKind::Changed,
                };
                Some(DocumentEdit { id: doc.id, path: doc.path.clone(), kind })
            })
            .collect();
        Self { edits }
    }

    /// Returns `true` when nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Edits of the given kind.
    pub fn of_kind(&self, kind: EditKind) -> impl Iterator<Item = &DocumentEdit> {
        self.edits.iter().filter(move |e| e.kind == kind)
    }
}
