//! Общие аргументы командной строки

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::config::AnalyzerConfig;
use crate::core::{FileType, SimilarityThreshold};

/// Глобальные флаги
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Параметры анализа, общие для `analyze` и `apply`
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisArgs {
    /// Document type (md, markdown, yaml, yml); inferred from the extension if omitted
    #[arg(short = 't', long = "type")]
    pub file_type: Option<String>,

    /// Similarity threshold in percent (50-100)
    #[arg(long)]
    pub threshold: Option<String>,

    /// Path to configuration file (TOML or YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Аргументы для работы с выводом
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CommonArgs {
    /// Определяет уровень логирования на основе флагов
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::WARN
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Проверяет, нужно ли выводить информацию
    pub fn should_print(&self) -> bool {
        !self.quiet
    }
}

impl AnalysisArgs {
    /// Явно заданный тип документа
    pub fn parsed_file_type(&self) -> Result<Option<FileType>> {
        self.file_type
            .as_deref()
            .map(|s| s.parse::<FileType>())
            .transpose()
            .context("Invalid --type")
    }

    /// Загружает конфигурацию и накладывает поверх нее флаги командной строки
    pub fn resolve_config(&self) -> Result<AnalyzerConfig> {
        let mut config = AnalyzerConfig::resolve(self.config.as_deref())?;

        if let Some(raw) = &self.threshold {
            config.similarity_threshold = raw
                .parse::<SimilarityThreshold>()
                .with_context(|| format!("Invalid --threshold '{}'", raw))?;
        }
        if let Some(file_type) = self.parsed_file_type()? {
            config.default_file_type = Some(file_type);
        }

        Ok(config)
    }
}
