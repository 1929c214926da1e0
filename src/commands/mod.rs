//! Command dispatch and handlers.

pub mod generate;
pub mod list;
pub mod names;

use std::env;
use std::path::PathBuf;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::context::ServiceContext;

/// Environment variable naming the directory recording sessions go into.
pub const RECORD_ENV: &str = "MAPFORGE_RECORD";

/// Dispatch a parsed command to its handler.
///
/// When `MAPFORGE_RECORD` is set to a directory, every port interaction is
/// recorded to per-port cassette files under it.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let (ctx, session) = if let Ok(dir) = env::var(RECORD_ENV) {
        let (ctx, session) = ServiceContext::recording_at(PathBuf::from(dir))?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(), None)
    };

    let result = dispatch_with_context(command, &ctx);

    // Finish recording even when the command failed.
    if let Some(session) = session {
        // The context holds the recorder references.
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Generate { project, file, target, source, dry_run } => {
            generate::run_with_context(
                ctx,
                generate::GenerateArgs {
                    project,
                    file,
                    target,
                    source: source.as_deref(),
                    dry_run: *dry_run,
                },
            )
        }
        Command::Names { source, target, namespace } => {
            names::run(source, target, namespace.as_deref())
        }
        Command::List { project } => list::run_with_context(ctx, project),
    }
}

fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
