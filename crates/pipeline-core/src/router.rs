//! Filename-based routing of incoming files to projects

use std::path::Path;

use regex::{Regex, RegexBuilder};

use crate::{Error, Result};

/// A compiled routing rule: files whose name matches `pattern` go to
/// `project`/`subdir`.
#[derive(Debug, Clone)]
pub struct RoutingRule {
    pattern: Regex,
    pub project: String,
    pub subdir: String,
}

impl RoutingRule {
    /// Compile a rule. Patterns always match case-insensitively.
    pub fn new(pattern: &str, project: impl Into<String>, subdir: impl Into<String>) -> Result<Self> {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            pattern,
            project: project.into(),
            subdir: subdir.into(),
        })
    }

    /// The source text of the pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Whether the pattern occurs anywhere in `name`.
    pub fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }
}

/// Destination selected for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route<'a> {
    pub project: &'a str,
    pub subdir: &'a str,
}

/// Pick the destination for a file from ordered rules.
///
/// Only the basename is matched. The first matching rule wins, even if a
/// later rule would match more specifically.
pub fn route_file<'a>(path: &Path, rules: &'a [RoutingRule]) -> Option<Route<'a>> {
    let name = path.file_name()?.to_string_lossy();

    rules.iter().find(|rule| rule.matches(&name)).map(|rule| Route {
        project: &rule.project,
        subdir: &rule.subdir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Vec<RoutingRule> {
        vec![
            RoutingRule::new("^invoice", "acct", "data/raw").unwrap(),
            RoutingRule::new(r"survey.*\.csv$", "field", "data/raw/surveys").unwrap(),
            RoutingRule::new(r"\.csv$", "misc", "data/raw").unwrap(),
        ]
    }

    #[test]
    fn matches_case_insensitively() {
        let rules = rules();
        let route = route_file(Path::new("/home/u/Downloads/Invoice_2024.pdf"), &rules).unwrap();
        assert_eq!(route, Route { project: "acct", subdir: "data/raw" });
    }

    #[test]
    fn first_match_wins() {
        let rules = rules();
        let route = route_file(Path::new("Survey_Wave2.CSV"), &rules).unwrap();
        assert_eq!(route.project, "field");
    }

    #[test]
    fn only_basename_is_matched() {
        let rules = rules();
        assert!(route_file(Path::new("/invoices/report.pdf"), &rules).is_none());
    }

    #[test]
    fn no_rule_no_route() {
        assert!(route_file(Path::new("photo.jpg"), &rules()).is_none());
        assert!(route_file(Path::new("anything"), &[]).is_none());
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = RoutingRule::new("([unclosed", "p", "d").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }
}
