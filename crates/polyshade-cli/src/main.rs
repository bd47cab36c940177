//! polyshade CLI - shadow analysis of `.geom` polyhedra
//!
//! Computes the perimeter of partially visible facets, or dumps the visible
//! edge segments for an external renderer.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};

use polyshade::{GeomFile, Orientation, ShadowConfig};

#[derive(Parser)]
#[command(name = "polyshade")]
#[command(about = "Hidden-line analysis for convex polyhedra", long_about = None)]
struct Cli {
    /// TOML file with shadow settings (projection, thresholds, parallelism)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sum the perimeters of partially visible facets
    Perimeter {
        /// Input .geom file
        file: PathBuf,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print visible edge segments as JSON, rotated by the file's angles
    Segments {
        /// Input .geom file
        file: PathBuf,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Display information about a .geom file
    Info {
        /// Path to the .geom file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Perimeter { file, json } => {
            show_perimeter(&file, config, json)?;
        }
        Commands::Segments { file, output } => {
            export_segments(&file, config, output.as_deref())?;
        }
        Commands::Info { file } => {
            show_info(&file)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ShadowConfig> {
    match path {
        Some(path) => {
            let config = ShadowConfig::load(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?;
            info!("settings loaded from {}", path.display());
            Ok(config)
        }
        None => Ok(ShadowConfig::default()),
    }
}

fn load_geom(file: &Path) -> Result<GeomFile> {
    GeomFile::load(file).with_context(|| format!("failed to read {}", file.display()))
}

fn show_perimeter(file: &Path, config: ShadowConfig, json: bool) -> Result<()> {
    let geom = load_geom(file)?;
    let mut poly = geom.polyhedron(Orientation::Identity, config)?;
    let report = poly.analyze();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("P = {}", report.perimeter);
    }
    Ok(())
}

fn export_segments(file: &Path, config: ShadowConfig, output: Option<&Path>) -> Result<()> {
    let geom = load_geom(file)?;
    let mut poly = geom.polyhedron(Orientation::Rotated, config)?;
    poly.compute_shadows();
    let segments = poly.visible_segments();
    let json = serde_json::to_string_pretty(&segments)?;

    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            println!("Wrote {} segments to {}", segments.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn show_info(file: &Path) -> Result<()> {
    let geom = load_geom(file)?;
    let sides: usize = geom.facets.iter().map(Vec::len).sum();

    println!("File: {}", file.display());
    println!("Homothety: {}", geom.homothety);
    println!(
        "Euler angles: {} {} {} (degrees)",
        geom.angles[0], geom.angles[1], geom.angles[2]
    );
    println!("Vertices: {}", geom.vertices.len());
    println!("Facets: {}", geom.facets.len());
    println!("Edges: {} declared, {} facet sides", geom.edge_count, sides);
    Ok(())
}
