//! Pipeline configuration loading and validation
//!
//! The configuration is read once per invocation and passed explicitly to
//! every operation; nothing here is global.

use std::path::{Path, PathBuf};
use std::time::Duration;

use pipeline_fs::{ConfigStore, NamingOptions, StabilizeOptions, expand_home};
use serde::Deserialize;

use crate::router::RoutingRule;
use crate::{Error, Result};

/// Marker left in template configs for paths the user must fill in.
const PLACEHOLDER: &str = "REPLACE_ME";

/// Manifest location relative to a project root.
pub const MANIFEST_RELATIVE_PATH: &str = "catalog/manifest.csv";

/// Stabilization polling settings as written in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StabilizeConfig {
    pub poll_interval_ms: u64,
    pub stable_polls: u32,
    pub timeout_secs: u64,
}

impl Default for StabilizeConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            stable_polls: 3,
            timeout_secs: 30,
        }
    }
}

impl StabilizeConfig {
    pub fn options(&self) -> StabilizeOptions {
        StabilizeOptions {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            stable_polls: self.stable_polls,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// A routing entry before validation. Incomplete entries are skipped.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawRoutingRule {
    pattern: Option<String>,
    project: Option<String>,
    subdir: Option<String>,
}

/// On-disk shape of the config file
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    projects_base: Option<String>,
    downloads_dir: Option<String>,
    #[serde(default)]
    naming: NamingOptions,
    #[serde(default)]
    routing: Vec<RawRoutingRule>,
    #[serde(default)]
    stabilize: StabilizeConfig,
    template_dir: Option<String>,
}

/// Validated pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Base directory holding one directory per project
    pub projects_base: PathBuf,
    /// Folder scanned by `route --from-downloads`
    pub downloads_dir: Option<PathBuf>,
    /// Destination naming settings
    pub naming: NamingOptions,
    /// Ordered routing rules, first match wins
    pub routing: Vec<RoutingRule>,
    /// Stabilization polling settings
    pub stabilize: StabilizeConfig,
    /// Directory holding project template files
    pub template_dir: Option<PathBuf>,
}

impl PipelineConfig {
    /// Build a config with defaults for everything but the projects base.
    pub fn new(projects_base: impl Into<PathBuf>) -> Self {
        Self {
            projects_base: projects_base.into(),
            downloads_dir: None,
            naming: NamingOptions::default(),
            routing: Vec::new(),
            stabilize: StabilizeConfig::default(),
            template_dir: None,
        }
    }

    /// Root directory of a project.
    pub fn project_dir(&self, project: &str) -> PathBuf {
        self.projects_base.join(project)
    }

    /// Manifest CSV of a project.
    pub fn manifest_path(&self, project: &str) -> PathBuf {
        self.project_dir(project).join(MANIFEST_RELATIVE_PATH)
    }

    fn from_raw(raw: RawConfig, source: &Path) -> Result<Self> {
        let projects_base = match raw.projects_base {
            Some(base) if !base.trim().is_empty() => base,
            _ => {
                return Err(Error::MissingConfigKey {
                    key: "projects_base".into(),
                    path: source.to_path_buf(),
                });
            }
        };
        reject_placeholder("projects_base", &projects_base, source)?;

        if let Some(downloads) = &raw.downloads_dir {
            reject_placeholder("downloads_dir", downloads, source)?;
        }

        let mut routing = Vec::with_capacity(raw.routing.len());
        for (index, rule) in raw.routing.into_iter().enumerate() {
            match (rule.pattern, rule.project, rule.subdir) {
                (Some(pattern), Some(project), Some(subdir))
                    if !pattern.is_empty() && !project.is_empty() && !subdir.is_empty() =>
                {
                    routing.push(RoutingRule::new(&pattern, project, subdir)?);
                }
                _ => {
                    tracing::warn!(index, "skipping routing rule without pattern, project and subdir");
                }
            }
        }

        Ok(Self {
            projects_base: expand_home(&projects_base),
            downloads_dir: raw.downloads_dir.map(expand_home),
            naming: raw.naming,
            routing,
            stabilize: raw.stabilize,
            template_dir: raw.template_dir.map(expand_home),
        })
    }
}

fn reject_placeholder(key: &str, value: &str, source: &Path) -> Result<()> {
    if value.contains(PLACEHOLDER) {
        return Err(Error::PlaceholderPath {
            key: key.to_string(),
            path: source.to_path_buf(),
        });
    }
    Ok(())
}

/// Load and validate the pipeline configuration.
///
/// # Errors
///
/// - [`Error::ConfigNotFound`] if the file does not exist
/// - [`Error::MissingConfigKey`] if `projects_base` is absent
/// - [`Error::PlaceholderPath`] if a path still contains `REPLACE_ME`
/// - [`Error::InvalidPattern`] if a routing pattern is not a valid regex
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let raw: RawConfig = ConfigStore::new().load(path).map_err(|e| {
        if e.is_not_found() {
            Error::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Fs(e)
        }
    })?;

    let config = PipelineConfig::from_raw(raw, path)?;
    tracing::debug!(
        projects_base = %config.projects_base.display(),
        rules = config.routing.len(),
        "loaded config"
    );
    Ok(config)
}
