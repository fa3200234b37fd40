use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::error::HarvestError;
use crate::indexer::{WalkWarning, merge_harvests, walk_packages};
use crate::models::Harvest;

#[derive(Parser)]
#[command(name = "jcr-harvest")]
#[command(version = "0.1.0")]
#[command(about = "Harvest AEM content package exports into a metadata graph", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk packages and print harvest statistics
    Stats {
        /// AEM Package Manager .zip exports, merged in the given order
        #[arg(required = true)]
        packages: Vec<PathBuf>,
    },
    /// Walk packages and emit the merged harvest as JSON
    Dump {
        /// AEM Package Manager .zip exports, merged in the given order
        #[arg(required = true)]
        packages: Vec<PathBuf>,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Stats { packages }) => {
            show_stats(packages)?;
        }
        Some(Commands::Dump { packages, output }) => {
            dump_harvest(packages, output.as_deref())?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn harvest_all(packages: &[PathBuf]) -> Result<(Harvest, Vec<WalkWarning>), HarvestError> {
    let outcomes = walk_packages(packages)?;
    let mut warnings = Vec::new();
    let mut harvests = Vec::new();
    for outcome in outcomes {
        warnings.extend(outcome.warnings);
        harvests.push(outcome.harvest);
    }
    Ok((merge_harvests(harvests), warnings))
}

fn show_stats(packages: &[PathBuf]) -> Result<()> {
    let (harvest, warnings) = harvest_all(packages)?;

    println!("Package Harvest Statistics");
    println!("==========================");
    println!("Packages walked: {}", packages.len());
    println!("Nodes: {}", harvest.nodes.len());
    println!("Properties: {}", harvest.property_rows().count());
    println!("Tags: {}", harvest.tags.len());
    println!("Tag assignments: {}", harvest.tag_assignments.len());
    println!("Namespaces: {}", harvest.namespaces.len());
    println!("Folders: {}", harvest.folders.len());
    println!("Records skipped: {}", warnings.len());

    Ok(())
}

fn dump_harvest(packages: &[PathBuf], output: Option<&std::path::Path>) -> Result<()> {
    let (harvest, _warnings) = harvest_all(packages)?;

    let document = serde_json::json!({
        "nodes": harvest.nodes.values().collect::<Vec<_>>(),
        "properties": harvest.property_rows().collect::<Vec<_>>(),
        "tags": harvest.tags.values().collect::<Vec<_>>(),
        "tag_assignments": &harvest.tag_assignments,
        "namespaces": harvest.namespaces.values().collect::<Vec<_>>(),
        "folders": harvest.folders.values().collect::<Vec<_>>(),
    });
    let json = serde_json::to_string_pretty(&document)?;

    match output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write harvest to {}", path.display()))?,
        None => println!("{json}"),
    }

    Ok(())
}
