//! Command-line argument definitions for waymark
//!
//! This module defines the CLI interface using the clap derive API.

use crate::app::services::validator::FileFormat;
use crate::constants::DEFAULT_CHUNK_SIZE;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the waymark GPS data tool
///
/// Imports CSV/JSON/GPX files into a point store, exports the store back
/// to GPX, and manages groups.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "waymark",
    version,
    about = "Import, validate and export GPS waypoint and track data",
    long_about = "Imports GPS points from CSV, JSON or GPX files into a local point store, \
                  with per-record validation, chunked batch persistence and progress \
                  reporting. Exports the stored points as a GPX 1.1 document and manages \
                  colored point groups."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path of the JSON point store
    ///
    /// Defaults to points.json under the user data directory.
    #[arg(long = "store", value_name = "PATH", global = true)]
    pub store_path: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands for waymark
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Import a CSV, JSON or GPX file into the point store
    Import(ImportArgs),
    /// Validate an input file without touching the store
    Validate(ValidateArgs),
    /// Export the stored points as a GPX 1.1 document
    Export(ExportArgs),
    /// Report point, track and group statistics
    Stats(StatsArgs),
    /// Manage point groups
    Groups(GroupsArgs),
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Input file (.csv, .json or .gpx)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Override the file format detected from the extension
    #[arg(long = "format", value_name = "FORMAT")]
    pub format: Option<FileFormat>,

    /// Points per batch insert
    #[arg(
        long = "chunk-size",
        value_name = "COUNT",
        default_value_t = DEFAULT_CHUNK_SIZE,
        help = "Number of points submitted per batch insert"
    )]
    pub chunk_size: usize,

    /// Parse and validate only; nothing is persisted
    #[arg(long = "dry-run", help = "Validate the file without importing")]
    pub dry_run: bool,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Input file (.csv, .json or .gpx)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Override the file format detected from the extension
    #[arg(long = "format", value_name = "FORMAT")]
    pub format: Option<FileFormat>,
}

/// Arguments for the export command
#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    /// Output GPX file
    #[arg(value_name = "FILE")]
    pub output: PathBuf,
}

/// Arguments for the stats command
#[derive(Debug, Clone, Parser)]
pub struct StatsArgs {
    /// Output format for the report
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the statistics report"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the groups command
#[derive(Debug, Clone, Parser)]
pub struct GroupsArgs {
    #[command(subcommand)]
    pub action: GroupsAction,
}

/// Group lifecycle operations
#[derive(Debug, Clone, Subcommand)]
pub enum GroupsAction {
    /// List all groups
    List,
    /// Create a group
    Create {
        /// Group name
        #[arg(value_name = "NAME")]
        name: String,

        /// Group color (hex value); defaults to the first preset
        #[arg(long = "color", value_name = "COLOR")]
        color: Option<String>,

        /// Optional description
        #[arg(long = "description", value_name = "TEXT")]
        description: Option<String>,
    },
    /// Delete a group, clearing its reference from any points
    Delete {
        /// Group id
        #[arg(value_name = "ID")]
        id: String,
    },
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ImportArgs {
    /// Validate the import command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.file.exists() {
            return Err(Error::configuration(format!(
                "input file does not exist: {}",
                self.file.display()
            )));
        }

        if self.chunk_size == 0 {
            return Err(Error::configuration(
                "chunk size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl ValidateArgs {
    /// Validate the validate command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.file.exists() {
            return Err(Error::configuration(format!(
                "input file does not exist: {}",
                self.file.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn base_args() -> Args {
        Args {
            command: None,
            store_path: None,
            verbose: 0,
            quiet: false,
        }
    }

    #[test]
    fn test_log_level() {
        let mut args = base_args();
        assert_eq!(args.get_log_level(), "warn");

        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");

        args.verbose = 2;
        assert_eq!(args.get_log_level(), "debug");

        args.verbose = 3;
        assert_eq!(args.get_log_level(), "trace");

        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
    }

    #[test]
    fn test_show_progress() {
        let mut args = base_args();
        assert!(args.show_progress());

        args.quiet = true;
        assert!(!args.show_progress());
    }

    #[test]
    fn test_import_args_validation() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("points.csv");
        std::fs::write(&file, "nome,lat,lng\n").unwrap();

        let args = ImportArgs {
            file: file.clone(),
            format: None,
            chunk_size: 500,
            dry_run: false,
        };
        assert!(args.validate().is_ok());

        let mut invalid = args.clone();
        invalid.chunk_size = 0;
        assert!(invalid.validate().is_err());

        let mut invalid = args;
        invalid.file = PathBuf::from("/nonexistent/points.csv");
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_cli_parses_import_with_format_override() {
        let args =
            Args::try_parse_from(["waymark", "import", "data.txt", "--format", "csv"]).unwrap();
        match args.get_command() {
            Commands::Import(import) => {
                assert_eq!(import.format, Some(FileFormat::Csv));
                assert_eq!(import.chunk_size, DEFAULT_CHUNK_SIZE);
            }
            other => panic!("expected import command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let result = Args::try_parse_from(["waymark", "import", "data.txt", "--format", "kml"]);
        assert!(result.is_err());
    }
}
