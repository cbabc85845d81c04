//! `exoquery query` — Run the full query pipeline.

use exoquery::pipeline;
use exoquery_archive::TapArchive;
use exoquery_config::AppConfig;
use std::path::PathBuf;

pub async fn run(
    cycle: Option<u32>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    if let Some(dir) = input {
        config.input_dir = dir;
    }
    if let Some(dir) = output {
        config.output_dir = dir;
    }

    let archive = TapArchive::new(&config.archive, config.catalogue())?;
    let report = pipeline::run(&archive, &config, cycle).await?;

    for outcome in &report.cycles {
        println!(
            "Cycle {}: {} targets -> {}",
            outcome.cycle,
            outcome.targets,
            outcome.reduced_path.display()
        );
        if !outcome.missing.is_empty() {
            println!(
                "  ⚠️  {} target(s) not found in the archive: {}",
                outcome.missing.len(),
                outcome.missing.join(", ")
            );
        }
    }
    println!("Combined report: {}", report.combined_path.display());
    println!("Query summary:   {}", report.summary_path.display());
    println!("\nQuery completed — check the summary for unresolved targets.");

    Ok(())
}
