use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::finding::Rule;

/// How a cognitive-complexity finding is sidestepped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityStrategy {
    /// Wrap deeply nested `if` blocks in `/* */` so they stop counting
    Comment,
    /// Move nested `func(...) {` literals out into top-level functions
    Extract,
}

impl Default for ComplexityStrategy {
    fn default() -> Self {
        ComplexityStrategy::Comment
    }
}

impl std::fmt::Display for ComplexityStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplexityStrategy::Comment => write!(f, "comment"),
            ComplexityStrategy::Extract => write!(f, "extract"),
        }
    }
}

impl std::str::FromStr for ComplexityStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "comment" => Ok(ComplexityStrategy::Comment),
            "extract" => Ok(ComplexityStrategy::Extract),
            _ => Err(format!("Invalid complexity strategy: {}. Valid values are 'comment' or 'extract'", s)),
        }
    }
}

/// Which quoted occurrences of a duplicated literal get replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralScope {
    First,
    All,
}

impl Default for LiteralScope {
    fn default() -> Self {
        LiteralScope::First
    }
}

impl std::fmt::Display for LiteralScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiteralScope::First => write!(f, "first"),
            LiteralScope::All => write!(f, "all"),
        }
    }
}

impl std::str::FromStr for LiteralScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" => Ok(LiteralScope::First),
            "all" => Ok(LiteralScope::All),
            _ => Err(format!("Invalid literal scope: {}. Valid values are 'first' or 'all'", s)),
        }
    }
}

/// Settings for one run, owned by the run loop and handed to every driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchConfig {
    /// Directory finding resources are resolved against
    pub base_dir: PathBuf,
    pub rules: BTreeSet<Rule>,
    #[serde(default)]
    pub complexity: ComplexityStrategy,
    #[serde(default)]
    pub literal_scope: LiteralScope,
    pub skip_test_files: bool,
    /// Glob patterns; findings on matching paths are skipped
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            rules: Rule::ALL.into_iter().collect(),
            complexity: ComplexityStrategy::default(),
            literal_scope: LiteralScope::default(),
            skip_test_files: true,
            exclude: Vec::new(),
        }
    }
}

impl PatchConfig {
    pub fn is_enabled(&self, rule: Rule) -> bool {
        self.rules.contains(&rule)
    }

    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.base_dir.join(relative)
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclude.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches_path(path))
                .unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_every_rule() {
        let config = PatchConfig::default();
        for rule in Rule::ALL {
            assert!(config.is_enabled(rule));
        }
        assert_eq!(config.complexity, ComplexityStrategy::Comment);
        assert_eq!(config.literal_scope, LiteralScope::First);
        assert!(config.skip_test_files);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("EXTRACT".parse::<ComplexityStrategy>(), Ok(ComplexityStrategy::Extract));
        assert!("inline".parse::<ComplexityStrategy>().is_err());
        assert_eq!("all".parse::<LiteralScope>(), Ok(LiteralScope::All));
    }

    #[test]
    fn test_exclude_patterns() {
        let config = PatchConfig {
            exclude: vec!["vendor/**".to_string(), "*.pb.go".to_string()],
            ..PatchConfig::default()
        };
        assert!(config.is_excluded(Path::new("vendor/lib/a.go")));
        assert!(config.is_excluded(Path::new("api.pb.go")));
        assert!(!config.is_excluded(Path::new("cmd/main.go")));
    }
}
