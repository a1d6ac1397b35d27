//! stl_levels - print the bounding box and common coordinate levels of an STL mesh

use std::path::PathBuf;
use std::process::ExitCode;

use bevy::{
    app::App,
    log::{Level, LogPlugin},
    prelude::default,
};
use clap::Parser;
use stl_levels::{analyze_path, AnalysisError, AnalysisSettings};

#[derive(Parser)]
#[command(name = "stl_levels", version, about = "Bounding box and common coordinate levels of an STL mesh")]
struct Cli {
    /// STL file to analyze (binary or ASCII)
    #[arg(default_value = "test/benchy_ref.stl")]
    path: PathBuf,

    /// Number of levels listed per axis
    #[arg(short = 'n', long = "top", default_value = "10")]
    top: usize,

    /// Output the report as JSON
    #[arg(long)]
    json: bool,

    /// Log format detection details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // LogPlugin installs the global subscriber when the plugin is built.
    App::new().add_plugins(LogPlugin {
        level: if cli.verbose { Level::DEBUG } else { Level::WARN },
        ..default()
    });

    if !cli.path.exists() {
        println!("Error: File '{}' not found.", cli.path.display());
        return ExitCode::FAILURE;
    }

    if !cli.json {
        println!("Analyzing {}...", cli.path.display());
    }

    let settings = AnalysisSettings { top_levels: cli.top };
    let report = match analyze_path(&cli.path, &settings) {
        Ok(report) => report,
        Err(AnalysisError::NoGeometryFound) => {
            println!("No vertices found.");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            println!("Error reading file: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("stl_levels: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!();
        print!("{report}");
    }

    ExitCode::SUCCESS
}
