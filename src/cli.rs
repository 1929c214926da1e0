//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `mapforge`.
#[derive(Debug, Parser)]
#[command(name = "mapforge", version, about = "Generate mapper classes between two types")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the mapper for a target class, or reuse the existing one.
    Generate {
        /// Project directory holding `.mapforge/workspace.yaml`.
        project: PathBuf,
        /// Document declaring the target class, relative to the project.
        #[arg(long)]
        file: PathBuf,
        /// Target class name.
        #[arg(long)]
        target: String,
        /// Qualified source type; defaults to the class's `MappingSource` comment.
        #[arg(long)]
        source: Option<String>,
        /// Print the edits without writing anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the mapper names derived from a type pair.
    Names {
        /// Qualified source type name.
        #[arg(long)]
        source: String,
        /// Target class name.
        #[arg(long)]
        target: String,
        /// Namespace enclosing the target class.
        #[arg(long)]
        namespace: Option<String>,
    },
    /// List the mapper documents of a project.
    List {
        /// Project directory holding `.mapforge/workspace.yaml`.
        project: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_generate_subcommand() {
        let cli = Cli::parse_from([
            "mapforge",
            "generate",
            "/src/App",
            "--file",
            "Models/Customer.cs",
            "--target",
            "Customer",
            "--dry-run",
        ]);
        match cli.command {
            Command::Generate { project, file, target, source, dry_run } => {
                assert_eq!(project.to_str(), Some("/src/App"));
                assert_eq!(file.to_str(), Some("Models/Customer.cs"));
                assert_eq!(target, "Customer");
                assert_eq!(source, None);
                assert!(dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn names_requires_source_and_target() {
        assert!(Cli::try_parse_from(["mapforge", "names", "--source", "Dto"]).is_err());
        let cli = Cli::parse_from(["mapforge", "names", "--source", "Dto", "--target", "Customer"]);
        assert!(matches!(cli.command, Command::Names { namespace: None, .. }));
    }

    #[test]
    fn parses_list_subcommand() {
        let cli = Cli::parse_from(["mapforge", "list", "."]);
        assert!(matches!(cli.command, Command::List { .. }));
    }
}
