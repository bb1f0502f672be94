//! # Pile Geometry CLI
//!
//! Terminal front end for `pile_core`: inspect a geometry document, tabulate
//! its circumference and area along the pile, build a basic core + base pile,
//! and list the standard materials.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;

use pile_core::geometry::elevation_grid;
use pile_core::{load_basic_pile_input, load_geometry, save_geometry, CalcResult, PileMaterial};

#[derive(Parser)]
#[command(name = "pile_cli")]
#[command(about = "Pile cross-section geometry: circumference, area and equivalent diameter along the pile")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the components and tip properties of a geometry document
    Summary {
        /// Geometry document (JSON)
        geometry: PathBuf,
    },
    /// Tabulate pile circumference and area between tip and head
    Profile {
        /// Geometry document (JSON)
        geometry: PathBuf,

        /// Pile tip level [m NAP]
        #[arg(long, allow_hyphen_values = true)]
        tip: f64,

        /// Pile head level [m NAP]
        #[arg(long, allow_hyphen_values = true)]
        head: f64,

        /// Elevation step [m]
        #[arg(long, default_value_t = 0.5)]
        step: f64,

        /// Print the profile as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Build a basic core + base pile geometry from an input document
    Basic {
        /// Basic pile input (JSON)
        input: PathBuf,

        /// Write the geometry here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the standard materials, or show one of them
    Materials {
        /// Material name
        #[arg(short, long)]
        name: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Summary { geometry } => summary(geometry),
        Commands::Profile {
            geometry,
            tip,
            head,
            step,
            json,
        } => profile(geometry, tip, head, step, json),
        Commands::Basic { input, output } => basic(input, output),
        Commands::Materials { name } => materials(name),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn summary(path: PathBuf) -> CalcResult<()> {
    let geometry = load_geometry(&path)?;
    info!("loaded {}", path.display());

    println!("═══════════════════════════════════════");
    println!("  PILE GEOMETRY");
    println!("═══════════════════════════════════════");
    println!();
    println!("Components (tip-most first):");
    for (i, component) in geometry.components().iter().enumerate() {
        println!("  {}. {}", i + 1, component);
    }
    println!();
    println!("At pile tip:");
    println!("  D_eq = {:.3} m", geometry.equivalent_tip_diameter());
    println!("  O    = {:.3} m", geometry.circumference_at_tip());
    println!("  A    = {:.4} m²", geometry.area_at_tip());
    if let Some(s) = geometry.pile_tip_factor_s() {
        println!("  s    = {:.2}", s);
    }
    if let Some(beta_p) = geometry.beta_p() {
        println!("  β_p  = {:.2}", beta_p);
    }
    if !geometry.materials().is_empty() {
        println!();
        println!("Materials:");
        for material in geometry.materials() {
            println!("  {:<16} E = {:>8.0} MPa", material.name, material.elastic_modulus);
        }
    }
    println!("═══════════════════════════════════════");
    Ok(())
}

fn profile(path: PathBuf, tip: f64, head: f64, step: f64, json: bool) -> CalcResult<()> {
    let geometry = load_geometry(&path)?;
    let grid = elevation_grid(tip, head, step)?;
    info!("evaluating {} elevations between {} and {} m NAP", grid.len(), head, tip);

    let profile = geometry.depth_profile(&grid, tip, head)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("{:>10}  {:>10}  {:>10}", "z [m NAP]", "O [m]", "A [m²]");
    for (depth, circumference, area) in profile.rows() {
        println!("{:>10.2}  {:>10.3}  {:>10.4}", depth, circumference, area);
    }
    Ok(())
}

fn basic(input_path: PathBuf, output: Option<PathBuf>) -> CalcResult<()> {
    let input = load_basic_pile_input(&input_path)?;
    let geometry = input.build()?;

    match output {
        Some(path) => {
            save_geometry(&geometry, &path)?;
            info!("saved {} pile geometry to {}", input.pile_shape, path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&geometry)?),
    }
    Ok(())
}

fn materials(name: Option<String>) -> CalcResult<()> {
    let selected = match name {
        Some(name) => vec![PileMaterial::standard(&name)?],
        None => PileMaterial::standard_materials().to_vec(),
    };

    println!("{:<16}  {:>10}  {:>12}  {:>8}", "Name", "E [MPa]", "f_y [MPa]", "Color");
    for material in &selected {
        let yield_stress = material
            .yield_stress
            .map(|fy| format!("{:.1}", fy))
            .unwrap_or_else(|| "-".to_string());
        let color = material.color.map(|c| c.hex()).unwrap_or_else(|| "-".to_string());
        println!(
            "{:<16}  {:>10.0}  {:>12}  {:>8}",
            material.name, material.elastic_modulus, yield_stress, color
        );
    }
    Ok(())
}
