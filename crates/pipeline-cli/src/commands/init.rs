//! Init-project command implementation

use colored::Colorize;
use pipeline_core::{PipelineConfig, ProjectScaffold, init_project};

use crate::error::Result;

/// Run the init-project command
pub fn run_init_project(config: &PipelineConfig, name: &str) -> Result<ProjectScaffold> {
    println!("{} Creating project: {}", "=>".blue().bold(), name.cyan());
    println!("   Location: {}", config.project_dir(name).display());

    let scaffold = init_project(name, config)?;

    for entry in &scaffold.created {
        println!("  {} Created {}", "+".green(), entry);
    }

    println!();
    println!("{} Project '{}' created successfully!", "OK".green().bold(), name);
    println!();
    println!("Next steps:");
    println!("  1. Open {} in RStudio", scaffold.rproj.display());
    println!("  2. Run renv::init() to set up reproducible environment");
    println!(
        "  3. Start ingesting data with: {}",
        format!("ingest add <files> --project {}", name).cyan()
    );

    Ok(scaffold)
}
