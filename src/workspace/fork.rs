//! Locating or forking the dedicated file that holds a mapper class.
//!
//! This is the only place that changes which documents a workspace holds;
//! everything downstream edits a single document's syntax root.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use super::{Document, DocumentId, Workspace};
use crate::config::SynthesisConfig;
use crate::error::SynthesisError;
use crate::ports::IdGenerator;
use crate::syntax::locate::Acquired;
use crate::syntax::{CompilationUnit, UsingDirective};

/// The mapping document acquired for a mapper, and the snapshot holding it.
#[derive(Debug, Clone)]
pub struct MappingDocument {
    /// Snapshot containing the document; a new snapshot when it was forked.
    pub workspace: Workspace,
    /// Id of the mapping document.
    pub document: DocumentId,
    /// Whether an existing file was reused or a new one forked.
    pub acquired: Acquired,
}

/// `<mapping_folder>/<class_name>.<extension>`, relative to the project directory.
#[must_use]
pub fn mapper_file_suffix(config: &SynthesisConfig, class_name: &str) -> PathBuf {
    Path::new(&config.mapping_folder).join(format!("{class_name}.{}", config.extension))
}

/// Absolute path at which a mapper file is created.
#[must_use]
pub fn mapper_file_path(
    workspace: &Workspace,
    config: &SynthesisConfig,
    class_name: &str,
) -> PathBuf {
    workspace.project().directory.join(mapper_file_suffix(config, class_name))
}

/// Finds an existing document whose path ends with the mapper file suffix.
///
/// Matching is by path only; the document may not yet contain the mapper
/// class, which the later find-or-create steps handle.
#[must_use]
pub fn find_mapper_document(
    workspace: &Workspace,
    config: &SynthesisConfig,
    class_name: &str,
) -> Option<DocumentId> {
    workspace.find_by_suffix(&mapper_file_suffix(config, class_name)).map(|d| d.id)
}

/// Documents that follow the mapper file convention: a parent folder ending
/// in the mapping folder and the configured extension.
///
/// Uses the same suffix rule as [`find_mapper_document`], so every document
/// listed here is one a later request would reuse.
pub fn mapper_documents<'a>(
    workspace: &'a Workspace,
    config: &'a SynthesisConfig,
) -> impl Iterator<Item = &'a Arc<Document>> + 'a {
    workspace.documents().filter(move |doc| {
        doc.path.parent().is_some_and(|parent| parent.ends_with(&config.mapping_folder))
            && doc.path.extension().is_some_and(|ext| ext == config.extension.as_str())
    })
}

/// Root of a freshly forked mapping file: the default imports and no members.
///
/// The namespace is added lazily by the first find-or-create pass.
#[must_use]
pub fn seed_unit(config: &SynthesisConfig) -> CompilationUnit {
    CompilationUnit {
        usings: config
            .default_imports
            .iter()
            .map(|name| UsingDirective { name: name.clone() })
            .collect(),
        members: Vec::new(),
    }
}

/// Returns the mapping document for `class_name`, forking a new one into the
/// workspace when no document matches the naming convention.
///
/// `origin` is the document the request was triggered from; a forked file
/// never takes its path.
///
/// # Errors
///
/// Returns `DuplicateDocument` if the id generator hands out an id that is
/// already in use.
#[tracing::instrument(level = "debug", skip(workspace, config, ids, origin))]
pub fn acquire_mapping_document(
    workspace: &Workspace,
    config: &SynthesisConfig,
    class_name: &str,
    ids: &dyn IdGenerator,
    origin: Option<DocumentId>,
) -> Result<MappingDocument, SynthesisError> {
    if let Some(document) = find_mapper_document(workspace, config, class_name) {
        debug!(%document, "reusing mapping document");
        return Ok(MappingDocument {
            workspace: workspace.clone(),
            document,
            acquired: Acquired::Reused,
        });
    }

    let path = mapper_file_path(workspace, config, class_name);
    if let Some(origin) = origin.and_then(|id| workspace.document(id)) {
        debug_assert_ne!(origin.path, path, "forked document would replace its origin");
    }

    let document = Document {
        id: ids.new_document_id(),
        path,
        folders: vec![config.mapping_folder.clone()],
        root: Arc::new(seed_unit(config)),
    };
    info!(path = %document.path.display(), "forking mapping document");
    let id = document.id;
    Ok(MappingDocument {
        workspace: workspace.add_document(document)?,
        document: id,
        acquired: Acquired::Created,
    })
}
