//! Command implementations for the waymark CLI
//!
//! This module contains the command execution logic, progress reporting,
//! and report formatting for the CLI interface.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::app::adapters::json_store::JsonStore;
use crate::app::adapters::store::{GroupStore, PointStore};
use crate::app::models::{NewGroup, ParseReport};
use crate::app::services::bounds::compute_bounds;
use crate::app::services::gpx;
use crate::app::services::importer::BatchImporter;
use crate::app::services::track_builder::build_tracks;
use crate::app::services::validator::{self, FileFormat};
use crate::cli::args::{
    Args, Commands, ExportArgs, GroupsAction, GroupsArgs, ImportArgs, OutputFormat, StatsArgs,
    ValidateArgs,
};
use crate::config::Config;
use crate::constants::CSV_COLUMNS;
use crate::{Error, Result};

/// Main command runner for waymark
///
/// Sets up logging, resolves the configuration and dispatches to the
/// requested subcommand.
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;

    info!("starting waymark");
    debug!("command line arguments: {:?}", args);

    let config = build_config(&args)?;
    let store = JsonStore::open(config.store_path.clone());
    debug!("using store at {}", store.path().display());

    match args.get_command() {
        Commands::Import(import_args) => run_import(&args, &config, &store, import_args).await,
        Commands::Validate(validate_args) => run_validate(validate_args),
        Commands::Export(export_args) => run_export(&store, export_args).await,
        Commands::Stats(stats_args) => run_stats(&store, stats_args).await,
        Commands::Groups(groups_args) => run_groups(&store, groups_args).await,
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("waymark={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("logging initialized at level: {}", log_level);
    Ok(())
}

/// Resolve configuration from defaults and CLI overrides
fn build_config(args: &Args) -> Result<Config> {
    let mut config = Config::default();
    if let Some(store_path) = &args.store_path {
        config = config.with_store_path(store_path.clone());
    }
    if let Some(Commands::Import(import_args)) = &args.command {
        config = config.with_chunk_size(import_args.chunk_size);
    }
    config.validate()?;
    Ok(config)
}

/// Resolve the input format from an override or the file extension
fn resolve_format(file: &std::path::Path, override_format: Option<FileFormat>) -> Result<FileFormat> {
    override_format
        .or_else(|| FileFormat::from_path(file))
        .ok_or_else(|| {
            Error::configuration(format!(
                "cannot infer file format of '{}': use --format csv|json|gpx",
                file.display()
            ))
        })
}

/// Read and validate an input file into a parse report
fn parse_input(file: &std::path::Path, format: FileFormat) -> Result<ParseReport> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| Error::io(format!("failed to read {}", file.display()), e))?;
    validator::parse_file(&text, format)
}

fn print_parse_summary(file: &std::path::Path, format: FileFormat, report: &ParseReport) {
    println!(
        "{} {} ({} input)",
        "Parsed".bold(),
        file.display(),
        format
    );
    println!("   valid points:    {}", report.points.len().to_string().green());
    if report.has_rejections() {
        println!("   rejected records: {}", report.rejected.to_string().red());
    } else {
        println!("   rejected records: 0");
    }
    if !report.headers.is_empty() {
        println!("   columns: {}", report.headers.join(", "));
    }

    // The validator only reads the interchange columns; point out the ones
    // it will ignore
    if matches!(format, FileFormat::Csv | FileFormat::Json) {
        let ignored: Vec<&str> = report
            .headers
            .iter()
            .map(String::as_str)
            .filter(|h| *h != "name" && !CSV_COLUMNS.contains(h))
            .collect();
        if !ignored.is_empty() {
            println!("   ignored columns: {}", ignored.join(", ").yellow());
        }
    }
}

/// Import a file into the point store
async fn run_import(
    args: &Args,
    config: &Config,
    store: &JsonStore,
    import_args: ImportArgs,
) -> Result<()> {
    import_args.validate()?;
    let format = resolve_format(&import_args.file, import_args.format)?;
    let report = parse_input(&import_args.file, format)?;

    print_parse_summary(&import_args.file, format, &report);

    if import_args.dry_run {
        println!("{}", "Dry run: nothing was imported".yellow());
        return Ok(());
    }

    if report.points.is_empty() {
        println!("{}", "No valid points to import".yellow());
        return Ok(());
    }

    let total = report.points.len();
    let progress_bar = if args.show_progress() {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} points ({msg})",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("0%");
        Some(pb)
    } else {
        None
    };

    let importer = BatchImporter::new(store.clone()).with_chunk_size(config.chunk_size);
    let result = importer
        .run(report.points, |progress| {
            if let Some(pb) = &progress_bar {
                pb.set_position(progress.current as u64);
                pb.set_message(format!("{}%", progress.percentage));
            }
        })
        .await;

    match result {
        Ok(imported) => {
            if let Some(pb) = &progress_bar {
                pb.finish_with_message("100%");
            }
            println!(
                "{} {} points imported into {}",
                "Done:".green().bold(),
                imported,
                store.path().display()
            );
            Ok(())
        }
        Err(error) => {
            if let Some(pb) = &progress_bar {
                pb.abandon_with_message("failed".to_string());
            }
            if let Error::BatchImport { committed, .. } = &error {
                // Committed chunks are not rolled back; make the partial
                // state visible before surfacing the error
                println!(
                    "{} {} points were committed before the failure",
                    "Partial import:".yellow().bold(),
                    committed
                );
            }
            Err(error)
        }
    }
}

/// Validate a file without touching the store
fn run_validate(validate_args: ValidateArgs) -> Result<()> {
    validate_args.validate()?;
    let format = resolve_format(&validate_args.file, validate_args.format)?;
    let report = parse_input(&validate_args.file, format)?;

    print_parse_summary(&validate_args.file, format, &report);
    Ok(())
}

/// Export the stored points as GPX
async fn run_export(store: &JsonStore, export_args: ExportArgs) -> Result<()> {
    let points = store.list_all().await?;
    let document = gpx::write_gpx(&points);

    std::fs::write(&export_args.output, document).map_err(|e| {
        Error::io(
            format!("failed to write {}", export_args.output.display()),
            e,
        )
    })?;

    println!(
        "{} {} points exported to {}",
        "Done:".green().bold(),
        points.len(),
        export_args.output.display()
    );
    Ok(())
}

/// Report point, track and group statistics
async fn run_stats(store: &JsonStore, stats_args: StatsArgs) -> Result<()> {
    let points = store.list_all().await?;
    let groups = store.list_groups().await?;
    let tracks = build_tracks(&points);
    let bounds = compute_bounds(&points);

    let waypoints = points.iter().filter(|p| !p.is_trackpoint()).count();
    let trackpoints = points.len() - waypoints;

    match stats_args.output_format {
        OutputFormat::Human => {
            println!("{}", "Store statistics".bold());
            println!("   points:      {}", points.len());
            println!("   waypoints:   {}", waypoints);
            println!("   trackpoints: {}", trackpoints);
            println!("   tracks:      {}", tracks.len());
            println!("   groups:      {}", groups.len());
            match bounds {
                Some(bounds) => println!(
                    "   bounds:      ({}, {}) .. ({}, {})",
                    bounds.min_lat, bounds.min_lon, bounds.max_lat, bounds.max_lon
                ),
                None => println!("   bounds:      (empty)"),
            }
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "points": points.len(),
                "waypoints": waypoints,
                "trackpoints": trackpoints,
                "tracks": tracks.len(),
                "groups": groups.len(),
                "bounds": bounds,
            });
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
        }
    }

    Ok(())
}

/// Group lifecycle operations
async fn run_groups(store: &JsonStore, groups_args: GroupsArgs) -> Result<()> {
    match groups_args.action {
        GroupsAction::List => {
            let groups = store.list_groups().await?;
            if groups.is_empty() {
                println!("no groups");
                return Ok(());
            }
            for group in groups {
                let description = group.description.as_deref().unwrap_or("-");
                println!("{}  {}  {}  {}", group.id, group.color, group.name.bold(), description);
            }
        }
        GroupsAction::Create {
            name,
            color,
            description,
        } => {
            let group = store
                .insert_group(NewGroup {
                    name,
                    color,
                    description,
                })
                .await?;
            println!(
                "{} group '{}' created with id {}",
                "Done:".green().bold(),
                group.name,
                group.id
            );
        }
        GroupsAction::Delete { id } => {
            store.delete_group(&id).await?;
            println!(
                "{} group {} deleted; its points keep their data",
                "Done:".green().bold(),
                id
            );
        }
    }

    Ok(())
}
