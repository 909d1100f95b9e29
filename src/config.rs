/*!
# Analyzer Configuration

Configuration for duplicate analysis. Supports TOML and YAML files; the
format is picked from the file extension (`.yaml` / `.yml` for YAML,
anything else for TOML).

Defaults reproduce the stock behaviour: threshold 85, exact lines of at
least 10 characters, similarity on lines longer than 20 characters.
*/

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::{DedupError, FileType, SimilarityThreshold};
use crate::detectors::{MIN_EXACT_LENGTH, MIN_SIMILARITY_LENGTH};

/// Name of the project-local configuration file
pub const LOCAL_CONFIG_FILE: &str = ".dedup-analyzer.toml";

/// Project-local configuration names, in lookup order
pub const LOCAL_CONFIG_FILES: [&str; 3] = [
    LOCAL_CONFIG_FILE,
    ".dedup-analyzer.yaml",
    ".dedup-analyzer.yml",
];

/// Names looked up under `<config dir>/dedup-analyzer/`
const USER_CONFIG_FILES: [&str; 3] = ["config.toml", "config.yaml", "config.yml"];

/// Analyzer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Minimum similarity percentage (50-100)
    pub similarity_threshold: SimilarityThreshold,

    /// Minimum trimmed length for exact matching
    pub min_exact_length: usize,

    /// Lines must be longer than this to be compared for similarity
    pub min_similarity_length: usize,

    /// Run the O(n²) similarity pass
    pub enable_similarity: bool,

    /// Entry count above which a restructuring suggestion is emitted
    pub restructure_threshold: usize,

    /// File type for inputs whose extension is not recognized
    pub default_file_type: Option<FileType>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: SimilarityThreshold::default(),
            min_exact_length: MIN_EXACT_LENGTH,
            min_similarity_length: MIN_SIMILARITY_LENGTH,
            enable_similarity: true,
            restructure_threshold: crate::analyzer::suggestions::RESTRUCTURE_THRESHOLD,
            default_file_type: None,
        }
    }
}

fn first_existing(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

fn is_yaml_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

impl AnalyzerConfig {
    /// Load configuration, choosing TOML or YAML by extension
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = if is_yaml_path(path) {
            serde_yaml::from_str(&content).map_err(|e| DedupError::ConfigParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        } else {
            toml::from_str(&content).map_err(|e| DedupError::ConfigParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        };

        for warning in config.validate() {
            tracing::warn!("{}: {}", path.display(), warning);
        }
        Ok(config)
    }

    /// Save configuration, choosing TOML or YAML by extension
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml_path(path) {
            serde_yaml::to_string(self).map_err(|e| DedupError::ConfigSerialize(e.to_string()))?
        } else {
            toml::to_string_pretty(self).map_err(|e| DedupError::ConfigSerialize(e.to_string()))?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Finds a configuration file when none was given explicitly.
    ///
    /// Looks in the working directory first (see [`Self::discover_in`]), then
    /// for `dedup-analyzer/config.{toml,yaml,yml}` in the user config directory.
    pub fn discover() -> Option<PathBuf> {
        Self::discover_in(Path::new(".")).or_else(|| {
            dirs::config_dir()
                .and_then(|dir| first_existing(&dir.join("dedup-analyzer"), &USER_CONFIG_FILES))
        })
    }

    /// Project-local configuration in `dir`: `.dedup-analyzer.toml`, then
    /// `.dedup-analyzer.yaml`, then `.dedup-analyzer.yml`.
    pub fn discover_in(dir: &Path) -> Option<PathBuf> {
        first_existing(dir, &LOCAL_CONFIG_FILES)
    }

    /// Loads `explicit` if given, else a discovered file, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => match Self::discover() {
                Some(path) => {
                    tracing::debug!("Using configuration {}", path.display());
                    Self::load_from_file(&path)
                }
                None => Ok(Self::default()),
            },
        }
    }

    /// Soft checks; problems are reported but do not prevent use
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.min_exact_length == 0 {
            warnings.push(
                "min_exact_length is 0, every non-blank line takes part in exact matching"
                    .to_string(),
            );
        }

        if self.min_similarity_length < self.min_exact_length {
            warnings.push(format!(
                "min_similarity_length ({}) is below min_exact_length ({})",
                self.min_similarity_length, self.min_exact_length
            ));
        }

        if self.enable_similarity && self.similarity_threshold.get() == SimilarityThreshold::MAX {
            warnings.push(
                "similarity_threshold is 100, the similarity pass can never match".to_string(),
            );
        }

        warnings
    }

    /// Create example configuration file
    pub fn create_example_config<P: AsRef<Path>>(path: P) -> Result<()> {
        Self::default().save_to_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.similarity_threshold.get(), 85);
        assert_eq!(config.min_exact_length, 10);
        assert_eq!(config.min_similarity_length, 20);
        assert!(config.enable_similarity);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let toml_str = toml::to_string_pretty(&AnalyzerConfig::default()).unwrap();
        assert!(toml_str.contains("similarity_threshold = 85"));
        assert!(toml_str.contains("enable_similarity = true"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AnalyzerConfig = toml::from_str("similarity_threshold = 70").unwrap();
        assert_eq!(config.similarity_threshold.get(), 70);
        assert_eq!(config.min_exact_length, 10);
    }

    #[test]
    fn test_out_of_range_threshold_is_rejected() {
        assert!(toml::from_str::<AnalyzerConfig>("similarity_threshold = 20").is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let config = AnalyzerConfig {
            enable_similarity: false,
            default_file_type: Some(FileType::Yaml),
            ..AnalyzerConfig::default()
        };
        config.save_to_file(&path).unwrap();
        assert_eq!(AnalyzerConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        let config = AnalyzerConfig {
            similarity_threshold: SimilarityThreshold::new(60).unwrap(),
            ..AnalyzerConfig::default()
        };
        config.save_to_file(&path).unwrap();
        assert_eq!(AnalyzerConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_validation_warnings() {
        let config = AnalyzerConfig {
            min_exact_length: 0,
            similarity_threshold: SimilarityThreshold::new(100).unwrap(),
            ..AnalyzerConfig::default()
        };
        assert_eq!(config.validate().len(), 2);
    }
}
