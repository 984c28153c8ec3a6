use clap::Parser;
use std::process;
use waymark::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(commands::run(args));

    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Waymark - GPS Waypoint and Track Data Tool");
    println!("==========================================");
    println!();
    println!("Import GPS points from CSV, JSON or GPX files into a local point store,");
    println!("export them back as GPX 1.1, and manage colored point groups.");
    println!();
    println!("USAGE:");
    println!("    waymark <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import      Import a CSV, JSON or GPX file into the point store");
    println!("    validate    Validate an input file without touching the store");
    println!("    export      Export the stored points as a GPX 1.1 document");
    println!("    stats       Report point, track and group statistics");
    println!("    groups      Manage point groups (list, create, delete)");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Import a CSV file with the default chunk size:");
    println!("    waymark import trail-points.csv");
    println!();
    println!("    # Validate a JSON file without importing anything:");
    println!("    waymark validate points.json");
    println!();
    println!("    # Export the store to a GPX document:");
    println!("    waymark export waypoints.gpx");
    println!();
    println!("    # Use a specific store file:");
    println!("    waymark --store ./trip/points.json stats --output-format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    waymark <COMMAND> --help");
}
