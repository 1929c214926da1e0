//! Synthesis configuration: naming conventions and generated-code shape.
//!
//! Values come from `<project>/.mapforge.yaml` when present, then from
//! `MAPFORGE_*` environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ports::filesystem::FileSystem;
use crate::syntax::render::RenderOptions;

/// Name of the per-project configuration file.
pub const CONFIG_FILE_NAME: &str = ".mapforge.yaml";

/// Conventions applied when generating mapper classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Folder (under the project directory) holding generated mapper files.
    pub mapping_folder: String,
    /// Namespace created in each mapping file.
    pub namespace: String,
    /// Source file extension, without the dot.
    pub extension: String,
    /// Interface used to render the mapping capability.
    pub capability_interface: String,
    /// Imports seeded into a newly forked mapping file.
    pub default_imports: Vec<String>,
    /// Name of the generated mapping method.
    pub method_name: String,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            mapping_folder: "Mapping".to_string(),
            namespace: "Mapping".to_string(),
            extension: "cs".to_string(),
            capability_interface: "Services.IDataMapper".to_string(),
            default_imports: vec!["System.Linq".to_string()],
            method_name: "Map".to_string(),
        }
    }
}

impl SynthesisConfig {
    /// Loads the project configuration file, if any, and applies
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(fs: &dyn FileSystem, project_dir: &Path) -> Result<Self, String> {
        let path = project_dir.join(CONFIG_FILE_NAME);
        let mut config = if fs.exists(&path) {
            let yaml = fs
                .read_to_string(&path)
                .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
            serde_yaml::from_str(&yaml)
                .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Applies `MAPFORGE_*` overrides looked up through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(ext) = lookup("MAPFORGE_EXTENSION") {
            self.extension = ext.trim_start_matches('.').to_string();
        }
        if let Some(capability) = lookup("MAPFORGE_CAPABILITY") {
            self.capability_interface = capability;
        }
        if let Some(namespace) = lookup("MAPFORGE_NAMESPACE") {
            self.namespace = namespace;
        }
    }

    /// Rendering options derived from this configuration.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions { capability_interface: self.capability_interface.clone() }
    }
}
