//! `mapforge generate` command.

use std::fmt::Write as _;
use std::path::Path;

use crate::cancel::CancellationToken;
use crate::config::SynthesisConfig;
use crate::context::ServiceContext;
use crate::syntax::locate::Acquired;
use crate::syntax::render::render_unit;
use crate::synth::action::MappingCodeAction;
use crate::synth::{BodyStatus, EditKind, SynthesisOutcome};
use crate::workspace::snapshot;

/// Arguments of the `generate` command.
#[derive(Debug, Clone, Copy)]
pub struct GenerateArgs<'a> {
    /// Project directory.
    pub project: &'a Path,
    /// Document declaring the target class, relative to the project.
    pub file: &'a Path,
    /// Target class name.
    pub target: &'a str,
    /// Explicit source type.
    pub source: Option<&'a str>,
    /// Print only.
    pub dry_run: bool,
}

/// Execute the `generate` command.
///
/// Loads the project snapshot, synthesizes the mapper, prints the edits
/// and, unless `dry_run` is set, writes the rendered documents and the
/// updated snapshot.
///
/// # Errors
///
/// Returns an error string if the snapshot or configuration cannot be
/// loaded, synthesis fails, or writing fails.
pub fn run_with_context(ctx: &ServiceContext, args: GenerateArgs<'_>) -> Result<(), String> {
    let config = SynthesisConfig::load(ctx.fs.as_ref(), args.project)?;
    let workspace = snapshot::load(ctx.fs.as_ref(), args.project)?;

    let origin = workspace
        .document_at(&workspace.project().directory.join(args.file))
        .or_else(|| workspace.find_by_suffix(args.file))
        .ok_or_else(|| format!("No document {} in workspace", args.file.display()))?
        .id;
    let action = MappingCodeAction::new(&workspace, origin, args.target, args.source)
        .map_err(|e| e.to_string())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(|e| format!("Failed to start runtime: {e}"))?;
    let outcome = runtime
        .block_on(action.compute_edits(ctx, &config, &workspace, &CancellationToken::new()))
        .map_err(|e| format!("{}: {e}", action.title()))?;

    print!("{}", format_outcome(&outcome, args.project));

    if args.dry_run {
        println!("Dry run: nothing written.");
        return Ok(());
    }
    if outcome.edits.is_empty() {
        return Ok(());
    }

    let options = config.render_options();
    for edit in &outcome.edits.edits {
        let document = outcome.workspace.require(edit.id).map_err(|e| e.to_string())?;
        ctx.fs
            .write(&document.path, &render_unit(&document.root, &options))
            .map_err(|e| format!("Failed to write {}: {e}", document.path.display()))?;
    }
    snapshot::save(ctx.fs.as_ref(), &outcome.workspace)
}

fn branch(acquired: Acquired) -> &'static str {
    match acquired {
        Acquired::Reused => "reused",
        Acquired::Created => "created",
    }
}

/// Human-readable summary of a synthesis outcome.
#[must_use]
pub fn format_outcome(outcome: &SynthesisOutcome, project: &Path) -> String {
    let report = &outcome.report;
    let mut out = String::new();
    let _ = writeln!(out, "Mapper: {}", outcome.identity.class_name);
    let _ = writeln!(
        out,
        "  file: {}, namespace: {}, class: {}, method: {}",
        branch(report.file),
        branch(report.namespace),
        branch(report.class),
        branch(report.method)
    );
    match &outcome.body {
        BodyStatus::Generated if outcome.is_stub() => {
            let _ = writeln!(out, "  body: placeholder (not implemented)");
        }
        BodyStatus::Generated => {
            let _ = writeln!(out, "  body: generated");
        }
        BodyStatus::Failed { reason } => {
            let _ = writeln!(out, "  body: generation failed ({reason}); placeholder kept");
        }
    }

    if outcome.edits.is_empty() {
        let _ = writeln!(out, "No changes.");
        return out;
    }
    let _ = writeln!(out, "Edits:");
    for edit in &outcome.edits.edits {
        let kind = match edit.kind {
            EditKind::Added => "added",
            EditKind::Changed => "changed",
        };
        let path = edit.path.strip_prefix(project).unwrap_or(&edit.path);
        let _ = writeln!(out, "  {kind:<8}{}", path.display());
    }
    out
}
