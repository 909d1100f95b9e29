/*!
# Input types

`FileType` and `SimilarityThreshold` are the two knobs of an analysis.
Both are validated on construction so the analyzer never sees an
out-of-contract value.
*/

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::errors::DedupError;

/// Document format being analyzed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    #[serde(alias = "md")]
    Markdown,
    #[serde(alias = "yml")]
    Yaml,
}

impl FileType {
    /// Infers the file type from the path extension.
    pub fn from_path(path: &Path) -> Result<Self, DedupError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        ext.parse()
    }
}

impl FromStr for FileType {
    type Err = DedupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(FileType::Markdown),
            "yaml" | "yml" => Ok(FileType::Yaml),
            _ => Err(DedupError::UnsupportedFileType(s.to_string())),
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Markdown => write!(f, "Markdown"),
            FileType::Yaml => write!(f, "YAML"),
        }
    }
}

/// Minimum similarity percentage (50-100) for two lines to count as similar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct SimilarityThreshold(u8);

impl SimilarityThreshold {
    pub const MIN: u8 = 50;
    pub const MAX: u8 = 100;
    pub const DEFAULT: SimilarityThreshold = SimilarityThreshold(85);

    pub fn new(value: u8) -> Result<Self, DedupError> {
        Self::try_from(i64::from(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for SimilarityThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for SimilarityThreshold {
    type Error = DedupError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DedupError::InvalidThreshold(value))
        }
    }
}

impl From<SimilarityThreshold> for u8 {
    fn from(threshold: SimilarityThreshold) -> Self {
        threshold.0
    }
}

impl FromStr for SimilarityThreshold {
    type Err = DedupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| DedupError::InvalidThreshold(-1))?;
        Self::try_from(value)
    }
}

impl fmt::Display for SimilarityThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_file_type_parsing() {
        assert_eq!("md".parse::<FileType>().unwrap(), FileType::Markdown);
        assert_eq!("Markdown".parse::<FileType>().unwrap(), FileType::Markdown);
        assert_eq!("yml".parse::<FileType>().unwrap(), FileType::Yaml);
        assert_eq!("YAML".parse::<FileType>().unwrap(), FileType::Yaml);

        assert!("txt".parse::<FileType>().is_err());
    }

    #[test]
    fn test_file_type_from_path() {
        assert_eq!(
            FileType::from_path(&PathBuf::from("docs/README.md")).unwrap(),
            FileType::Markdown
        );
        assert_eq!(
            FileType::from_path(&PathBuf::from(".github/ci.yml")).unwrap(),
            FileType::Yaml
        );
        assert!(FileType::from_path(&PathBuf::from("Makefile")).is_err());
    }

    #[test]
    fn test_threshold_range() {
        assert!(SimilarityThreshold::new(49).is_err());
        assert_eq!(SimilarityThreshold::new(50).unwrap().get(), 50);
        assert_eq!(SimilarityThreshold::new(100).unwrap().get(), 100);
        assert!(SimilarityThreshold::new(101).is_err());
        assert_eq!(SimilarityThreshold::default().get(), 85);
    }

    #[test]
    fn test_threshold_deserialization_rejects_out_of_range() {
        let ok: SimilarityThreshold = serde_json::from_str("90").unwrap();
        assert_eq!(ok.get(), 90);
        assert!(serde_json::from_str::<SimilarityThreshold>("20").is_err());
        assert!(serde_json::from_str::<SimilarityThreshold>("300").is_err());
    }
}
