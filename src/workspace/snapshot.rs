//! Persisted workspace snapshots.
//!
//! A project keeps its syntax trees in `<project>/.mapforge/workspace.yaml`.
//! Document paths are stored relative to the project directory so the
//! snapshot can move with the project.
//!
//! ```text
//! <project>/
//!   ├── .mapforge/workspace.yaml
//!   ├── .mapforge.yaml            (optional configuration)
//!   └── Mapping/<Source>2<Target>Mapper.cs
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Document, DocumentId, Project, Workspace};
use crate::ports::FileSystem;
use crate::syntax::CompilationUnit;

/// Location of the snapshot file relative to the project directory.
pub const SNAPSHOT_PATH: &str = ".mapforge/workspace.yaml";

/// On-disk shape of a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    /// Project name.
    pub project: String,
    /// Documents in workspace order.
    #[serde(default)]
    pub documents: Vec<DocumentEntry>,
}

/// On-disk shape of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentEntry {
    /// Document id.
    pub id: DocumentId,
    /// Path relative to the project directory.
    pub path: PathBuf,
    /// Logical folders.
    #[serde(default)]
    pub folders: Vec<String>,
    /// Syntax root.
    pub root: CompilationUnit,
}

impl WorkspaceSnapshot {
    /// Captures a workspace, relativizing document paths.
    #[must_use]
    pub fn capture(workspace: &Workspace) -> Self {
        let base = &workspace.project().directory;
        let documents = workspace
            .documents()
            .map(|doc| DocumentEntry {
                id: doc.id,
                path: doc
                    .path
                    .strip_prefix(base)
                    .map_or_else(|_| doc.path.clone(), Path::to_path_buf),
                folders: doc.folders.clone(),
                root: CompilationUnit::clone(&doc.root),
            })
            .collect();
        Self { project: workspace.project().name.clone(), documents }
    }

    /// Rebuilds a workspace rooted at `directory`.
    ///
    /// # Errors
    ///
    /// Returns an error if two entries share an id.
    pub fn restore(self, directory: &Path) -> Result<Workspace, String> {
        let project = Project { name: self.project, directory: directory.to_path_buf() };
        let mut workspace = Workspace::new(project);
        for entry in self.documents {
            let document = Document {
                id: entry.id,
                path: directory.join(entry.path),
                folders: entry.folders,
                root: Arc::new(entry.root),
            };
            workspace = workspace.add_document(document).map_err(|e| e.to_string())?;
        }
        Ok(workspace)
    }
}

/// Loads the workspace of the project at `directory`.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read, parsed, or restored.
pub fn load(fs: &dyn FileSystem, directory: &Path) -> Result<Workspace, String> {
    let path = directory.join(SNAPSHOT_PATH);
    let yaml = fs
        .read_to_string(&path)
        .map_err(|e| format!("Failed to read workspace snapshot {}: {e}", path.display()))?;
    let snapshot: WorkspaceSnapshot = serde_yaml::from_str(&yaml)
        .map_err(|e| format!("Failed to parse workspace snapshot {}: {e}", path.display()))?;
    snapshot.restore(directory)
}

/// Saves `workspace` to its project's snapshot file.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn save(fs: &dyn FileSystem, workspace: &Workspace) -> Result<(), String> {
    let path = workspace.project().directory.join(SNAPSHOT_PATH);
    let yaml = serde_yaml::to_string(&WorkspaceSnapshot::capture(workspace))
        .map_err(|e| format!("Failed to serialize workspace snapshot: {e}"))?;
    fs.write(&path, &yaml)
        .map_err(|e| format!("Failed to write workspace snapshot {}: {e}", path.display()))
}
