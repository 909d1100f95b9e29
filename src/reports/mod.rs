/*!
# Reports Module

Модуль для генерации отчетов анализа дубликатов в различных форматах.

## Поддерживаемые форматы:
- **Text** - человекочитаемый отчет для консоли
- **JSON** - структурированный отчет для интеграции с другими инструментами

## Использование:

```rust,ignore
use dedup_analyzer::reports::{ReportManager, ReportFormat};

let report = analyze_paths(&paths, &config, None);
let text = ReportManager::new().generate_report(&report, ReportFormat::Text)?;
println!("{}", text);
```
*/

pub mod json;
pub mod text;

pub use json::JsonReporter;
pub use text::TextReporter;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analyzer::BatchReport;

/// Формат отчета
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    /// JSON для интеграции
    Json,
    /// Текстовый отчет для консоли
    Text,
}

impl std::str::FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "text" | "txt" => Ok(ReportFormat::Text),
            _ => Err(anyhow::anyhow!("Unknown report format: {}", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "JSON"),
            ReportFormat::Text => write!(f, "Text"),
        }
    }
}

/// Конфигурация отчета
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Формат отчета
    pub format: ReportFormat,
    /// Включить список записей (иначе только сводка)
    pub include_details: bool,
    /// Включить рекомендации
    pub include_suggestions: bool,
    /// Цветной вывод для текстового формата
    pub use_colors: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            include_details: true,
            include_suggestions: true,
            use_colors: false,
        }
    }
}

/// Трейт для генерации отчетов
pub trait ReportGenerator {
    /// Генерирует отчет на основе результатов анализа
    fn generate_report(&self, report: &BatchReport, config: &ReportConfig) -> Result<String>;

    /// Возвращает поддерживаемый формат отчета
    fn supported_format() -> ReportFormat
    where
        Self: Sized;
}

/// Менеджер отчетов для генерации в различных форматах
pub struct ReportManager {
    /// Конфигурация по умолчанию
    default_config: ReportConfig,
}

impl ReportManager {
    /// Создает новый менеджер отчетов
    pub fn new() -> Self {
        Self {
            default_config: ReportConfig::default(),
        }
    }

    /// Создает менеджер с конфигурацией
    pub fn with_config(config: ReportConfig) -> Self {
        Self {
            default_config: config,
        }
    }

    /// Генерирует отчет в указанном формате
    pub fn generate_report(&self, report: &BatchReport, format: ReportFormat) -> Result<String> {
        let config = ReportConfig {
            format,
            ..self.default_config.clone()
        };

        match config.format {
            ReportFormat::Json => JsonReporter::new().generate_report(report, &config),
            ReportFormat::Text => {
                TextReporter::with_colors(config.use_colors).generate_report(report, &config)
            }
        }
    }

    /// Отчет, готовый к записи: всегда завершается переводом строки
    pub fn render(&self, report: &BatchReport, format: ReportFormat) -> Result<String> {
        let mut content = self.generate_report(report, format)?;
        if !content.ends_with('\n') {
            content.push('\n');
        }
        Ok(content)
    }

    /// Сохраняет отчет в файл
    pub fn save_report<P: AsRef<Path>>(
        &self,
        report: &BatchReport,
        format: ReportFormat,
        output_path: P,
    ) -> Result<()> {
        let content = self.render(report, format)?;
        std::fs::write(&output_path, content).with_context(|| {
            format!("Failed to write report to {}", output_path.as_ref().display())
        })?;
        tracing::info!(
            "Generated {} report: {}",
            format,
            output_path.as_ref().display()
        );
        Ok(())
    }
}

impl Default for ReportManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_format_parsing() {
        assert_eq!("json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("TEXT".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert!("sarif".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_report_config_default() {
        let config = ReportConfig::default();
        assert_eq!(config.format, ReportFormat::Text);
        assert!(config.include_details);
        assert!(!config.use_colors);
    }

    #[test]
    fn test_save_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        ReportManager::new()
            .save_report(&BatchReport::default(), ReportFormat::Json, &path)
            .unwrap();
        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.contains("\"files\""));
        assert!(saved.ends_with("}\n"));

        let text = ReportManager::new()
            .render(&BatchReport::default(), ReportFormat::Text)
            .unwrap();
        assert!(text.ends_with('\n'));
    }
}
