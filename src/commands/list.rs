//! `mapforge list` command.

use std::fmt::Write as _;
use std::path::Path;

use crate::config::SynthesisConfig;
use crate::context::ServiceContext;
use crate::syntax::{ClassDecl, Member};
use crate::workspace::fork::mapper_documents;
use crate::workspace::{snapshot, Workspace};

/// Execute the `list` command.
///
/// # Errors
///
/// Returns an error string if the snapshot or configuration cannot be loaded.
pub fn run_with_context(ctx: &ServiceContext, project: &Path) -> Result<(), String> {
    let config = SynthesisConfig::load(ctx.fs.as_ref(), project)?;
    let workspace = snapshot::load(ctx.fs.as_ref(), project)?;
    print!("{}", format_listing(&workspace, &config));
    Ok(())
}

fn classes(members: &[Member]) -> Vec<&ClassDecl> {
    members
        .iter()
        .flat_map(|member| match member {
            Member::Class(class) => vec![class.as_ref()],
            Member::Namespace(ns) => classes(&ns.members),
        })
        .collect()
}

/// One block per mapper document: path, then its classes and capabilities.
#[must_use]
pub fn format_listing(workspace: &Workspace, config: &SynthesisConfig) -> String {
    let base = &workspace.project().directory;
    let mut out = String::new();
    for document in mapper_documents(workspace, config) {
        let path = document.path.strip_prefix(base).unwrap_or(&document.path);
        let _ = writeln!(out, "{}", path.display());

        for class in classes(&document.root.members) {
            let _ = write!(out, "  {}", class.name);
            for capability in &class.capabilities {
                let _ = write!(out, " [{} -> {}]", capability.source, capability.target);
            }
            let stubs = class.methods().filter(|m| m.is_stub()).count();
            if stubs > 0 {
                let _ = write!(out, " ({stubs} not implemented)");
            }
            out.push('\n');
        }
    }
    if out.is_empty() {
        out.push_str("No mapper documents found.\n");
    }
    out
}
