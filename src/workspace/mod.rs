//! Workspace snapshots: the documents of one project as immutable values.
//!
//! Every mutation returns a new [`Workspace`]; documents and syntax roots
//! are shared between snapshots through `Arc`, so holders of an older
//! snapshot never observe later edits.

pub mod fork;
pub mod snapshot;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SynthesisError;
use crate::syntax::CompilationUnit;

/// Stable identity of a document across snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Wraps an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses a hyphenated UUID string.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` is not a valid UUID.
    pub fn parse(text: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(text).map(Self)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A source file: path, logical folders and syntax root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Identity of this document.
    pub id: DocumentId,
    /// Absolute file path.
    pub path: PathBuf,
    /// Logical folders the document is nested under in the project.
    #[serde(default)]
    pub folders: Vec<String>,
    /// Syntax root.
    pub root: Arc<CompilationUnit>,
}

impl Document {
    /// Returns a copy of this document with a different syntax root.
    #[must_use]
    pub fn with_root(&self, root: Arc<CompilationUnit>) -> Self {
        Self { id: self.id, path: self.path.clone(), folders: self.folders.clone(), root }
    }
}

/// The project the workspace belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project name.
    pub name: String,
    /// Directory holding the project file.
    pub directory: PathBuf,
}

/// Immutable snapshot of all documents in a project.
#[derive(Debug, Clone)]
pub struct Workspace {
    project: Project,
    documents: IndexMap<DocumentId, Arc<Document>>,
}

impl Workspace {
    /// Creates an empty workspace for `project`.
    #[must_use]
    pub fn new(project: Project) -> Self {
        Self { project, documents: IndexMap::new() }
    }

    /// The project this workspace belongs to.
    #[must_use]
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Documents in insertion order.
    pub fn documents(&self) -> impl Iterator<Item = &Arc<Document>> {
        self.documents.values()
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` when the workspace has no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Looks up a document by id.
    #[must_use]
    pub fn document(&self, id: DocumentId) -> Option<&Arc<Document>> {
        self.documents.get(&id)
    }

    /// Looks up a document by id, failing if it is not part of this snapshot.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDocument` if `id` is not registered.
    pub fn require(&self, id: DocumentId) -> Result<&Arc<Document>, SynthesisError> {
        self.document(id).ok_or(SynthesisError::UnknownDocument(id))
    }

    /// First document whose path equals `path`.
    #[must_use]
    pub fn document_at(&self, path: &Path) -> Option<&Arc<Document>> {
        self.documents.values().find(|d| d.path == path)
    }

    /// First document whose path ends with the given relative components.
    #[must_use]
    pub fn find_by_suffix(&self, suffix: &Path) -> Option<&Arc<Document>> {
        self.documents.values().find(|d| d.path.ends_with(suffix))
    }

    /// Returns a new snapshot with `document` added.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateDocument` if the id is already registered.
    pub fn add_document(&self, document: Document) -> Result<Self, SynthesisError> {
        if let Some(existing) = self.documents.get(&document.id) {
            return Err(SynthesisError::DuplicateDocument {
                id: document.id,
                path: existing.path.clone(),
            });
        }
        let mut next = self.clone();
        next.documents.insert(document.id, Arc::new(document));
        Ok(next)
    }

    /// Returns a new snapshot in which document `id` has syntax root `root`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDocument` if `id` is not registered.
    pub fn with_document_root(
        &self,
        id: DocumentId,
        root: Arc<CompilationUnit>,
    ) -> Result<Self, SynthesisError> {
        let current = self.require(id)?;
        if Arc::ptr_eq(&current.root, &root) {
            return Ok(self.clone());
        }
        let updated = Arc::new(current.with_root(root));
        let mut next = self.clone();
        next.documents.insert(id, updated);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project { name: "App".into(), directory: PathBuf::from("/src/App") }
    }

    fn doc(path: &str) -> Document {
        Document {
            id: DocumentId::from_uuid(Uuid::new_v4()),
            path: PathBuf::from(path),
            folders: Vec::new(),
            root: Arc::new(CompilationUnit::default()),
        }
    }

    #[test]
    fn add_document_leaves_previous_snapshot_untouched() {
        let empty = Workspace::new(project());
        let one = empty.add_document(doc("/src/App/Customer.cs")).unwrap();
        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let d = doc("/src/App/Customer.cs");
        let ws = Workspace::new(project()).add_document(d.clone()).unwrap();
        let err = ws.add_document(d.clone()).unwrap_err();
        assert_eq!(err, SynthesisError::DuplicateDocument { id: d.id, path: d.path });
    }

    #[test]
    fn suffix_lookup_is_component_wise() {
        let ws = Workspace::new(project())
            .add_document(doc("/src/App/Mapping/A2BMapper.cs"))
            .unwrap()
            .add_document(doc("/src/App/NotMapping/C2DMapper.cs"))
            .unwrap();

        assert!(ws.find_by_suffix(Path::new("Mapping/A2BMapper.cs")).is_some());
        assert!(ws.find_by_suffix(Path::new("Mapping/C2DMapper.cs")).is_none());
    }

    #[test]
    fn replacing_root_shares_other_documents() {
        let a = doc("/src/App/A.cs");
        let b = doc("/src/App/B.cs");
        let ws = Workspace::new(project())
            .add_document(a.clone())
            .unwrap()
            .add_document(b.clone())
            .unwrap();

        let root = Arc::new(CompilationUnit {
            usings: vec![crate::syntax::UsingDirective { name: "System".into() }],
            members: Vec::new(),
        });
        let next = ws.with_document_root(a.id, root).unwrap();

        assert!(ws.document(a.id).unwrap().root.usings.is_empty());
        assert_eq!(next.document(a.id).unwrap().root.usings.len(), 1);
        assert!(Arc::ptr_eq(ws.document(b.id).unwrap(), next.document(b.id).unwrap()));
    }

    #[test]
    fn unknown_document_is_reported() {
        let ws = Workspace::new(project());
        let id = DocumentId::from_uuid(Uuid::new_v4());
        assert_eq!(
            ws.with_document_root(id, Arc::new(CompilationUnit::default())).unwrap_err(),
            SynthesisError::UnknownDocument(id)
        );
    }
}
