//! Idempotent synthesis of mapper classes between two types.
//!
//! Given a target class and a source type, [`synth::synthesize`] finds or
//! forks `Mapping/<Source>2<Target>Mapper.<ext>`, finds or creates the
//! mapper class and its `Map(source, target)` method, and hands the method
//! to a [`ports::BodyGenerator`]. Re-running a request against its own
//! result changes nothing.

pub mod adapters;
pub mod cancel;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod naming;
pub mod ports;
pub mod syntax;
pub mod synth;
pub mod workspace;

use clap::Parser;

pub use cancel::CancellationToken;
pub use error::SynthesisError;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_prints_names() {
        let result = run(["mapforge", "names", "--source", "Dto", "--target", "Customer"]);
        assert!(result.is_ok());
    }

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["mapforge", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_errors_on_missing_snapshot() {
        let err = run(["mapforge", "list", "/nonexistent/mapforge-project"]).unwrap_err();
        assert!(err.contains("workspace snapshot"));
    }
}
