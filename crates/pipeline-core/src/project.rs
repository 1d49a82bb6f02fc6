//! Project scaffolding
//!
//! A project is a directory under `projects_base` with a fixed layout for
//! raw and cleaned data, the provenance catalog, and an R analysis tree.

use std::path::{Path, PathBuf};

use pipeline_fs::{io, validate_path_identifier};

use crate::config::PipelineConfig;
use crate::{Error, Result};

/// Directories created for every project, relative to its root.
pub const PROJECT_DIRS: [&str; 5] = [
    "data/raw",
    "data/clean",
    "catalog",
    "R",
    "R/validation_suites",
];

/// Directories that get a `.gitkeep` so empty trees survive version control.
const GITKEEP_DIRS: [&str; 4] = ["data/raw", "data/clean", "catalog", "R"];

/// Template file name looked up in the configured template directory.
pub const RPROJ_TEMPLATE_NAME: &str = "_project.Rproj";

const BUILTIN_RPROJ: &str = include_str!("../templates/_project.Rproj");

const GITKEEP_CONTENT: &str = "# Placeholder to preserve directory structure\n";

const DATA_HELPERS_CONTENT: &str = "# Data helper functions\n\
# To be implemented: load_raw_latest(), save_clean(), validate_clean()\n";

/// What `init_project` created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectScaffold {
    /// Project root
    pub root: PathBuf,
    /// RStudio project file
    pub rproj: PathBuf,
    /// Paths created, relative to the root, in creation order
    pub created: Vec<String>,
}

/// Create a new project from the standard template.
///
/// # Errors
///
/// - [`Error::InvalidProjectName`] if `name` is not a plain directory name
/// - [`Error::ProjectExists`] if the project directory is already present
pub fn init_project(name: &str, config: &PipelineConfig) -> Result<ProjectScaffold> {
    if !validate_path_identifier(name) {
        return Err(Error::InvalidProjectName {
            name: name.to_string(),
        });
    }

    let root = config.project_dir(name);
    if root.exists() {
        return Err(Error::ProjectExists {
            name: name.to_string(),
            path: root,
        });
    }

    let mut created = Vec::new();

    std::fs::create_dir_all(&root).map_err(|e| pipeline_fs::Error::io(&root, e))?;
    for dir in PROJECT_DIRS {
        let path = root.join(dir);
        std::fs::create_dir_all(&path).map_err(|e| pipeline_fs::Error::io(&path, e))?;
        created.push(format!("{dir}/"));
    }

    let rproj_name = format!("{name}.Rproj");
    let rproj = root.join(&rproj_name);
    io::write_text(&rproj, &rproj_template(config.template_dir.as_deref())?)?;
    created.push(rproj_name);

    for dir in GITKEEP_DIRS {
        io::write_text(&root.join(dir).join(".gitkeep"), GITKEEP_CONTENT)?;
    }

    io::write_text(&root.join("R").join("data_helpers.R"), DATA_HELPERS_CONTENT)?;
    created.push("R/data_helpers.R".to_string());

    io::write_text(&root.join("README.md"), &render_readme(name))?;
    created.push("README.md".to_string());

    tracing::info!(project = name, root = %root.display(), "project created");

    Ok(ProjectScaffold {
        root,
        rproj,
        created,
    })
}

/// Template content: the configured template file if present, else built-in.
fn rproj_template(template_dir: Option<&Path>) -> Result<String> {
    if let Some(dir) = template_dir {
        let candidate = dir.join(RPROJ_TEMPLATE_NAME);
        if candidate.is_file() {
            return Ok(io::read_text(&candidate)?);
        }
        tracing::debug!(path = %candidate.display(), "template not found, using built-in");
    }
    Ok(BUILTIN_RPROJ.to_string())
}

/// README written at the project root.
pub fn render_readme(name: &str) -> String {
    format!(
        "# {name}\n\
\n\
Research project initialized with the data pipeline.\n\
\n\
## Setup\n\
\n\
1. Open `{name}.Rproj` in RStudio\n\
2. Run `renv::init()` to set up reproducible environment\n\
3. Install required packages: `install.packages(c('here', 'readr', 'fs', 'pointblank'))`\n\
4. Run `renv::snapshot()` to save package versions\n\
\n\
## Directory Structure\n\
\n\
- `data/raw/`: Raw data files (auto-populated by ingest pipeline)\n\
- `data/clean/`: Cleaned data files\n\
- `catalog/manifest.csv`: Data provenance tracking\n\
- `R/`: Analysis scripts and helper functions\n"
    )
}
