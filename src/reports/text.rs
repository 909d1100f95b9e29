/*!
# Text Reporter

Генерация консольных текстовых отчетов по найденным дубликатам.

## Возможности:
- Цветной вывод в консоль (с поддержкой ANSI)
- Группировка по файлам и по типу записи
- Сводная статистика
- Краткий формат (только сводка) для CI/CD
*/

use anyhow::Result;

use super::{ReportConfig, ReportFormat, ReportGenerator};
use crate::analyzer::{AnalysisResult, BatchReport, DuplicateEntry, DuplicateKind, FileAnalysis};

/// Maximum characters of entry content shown on one line
const CONTENT_PREVIEW: usize = 72;

/// Текстовый репортер для консольного вывода
pub struct TextReporter {
    /// Использовать цветной вывод
    use_colors: bool,
}

/// Цвета для ANSI вывода
struct Colors;

impl Colors {
    const RESET: &'static str = "\x1b[0m";
    const BOLD: &'static str = "\x1b[1m";
    const RED: &'static str = "\x1b[31m";
    const YELLOW: &'static str = "\x1b[33m";
    const BLUE: &'static str = "\x1b[34m";
    const GREEN: &'static str = "\x1b[32m";
    const CYAN: &'static str = "\x1b[36m";
    const GRAY: &'static str = "\x1b[90m";
}

impl TextReporter {
    /// Создает новый текстовый репортер
    pub fn new() -> Self {
        Self {
            use_colors: Self::supports_colors(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors: use_colors && Self::supports_colors(),
        }
    }

    /// Создает репортер без цветов для CI/CD
    pub fn plain() -> Self {
        Self { use_colors: false }
    }

    /// Проверяет поддержку цветов в терминале
    fn supports_colors() -> bool {
        if std::env::var("NO_COLOR").is_ok() {
            return false;
        }

        if std::env::var("FORCE_COLOR").is_ok() {
            return true;
        }

        if let Ok(term) = std::env::var("TERM") {
            if term == "dumb" || term.is_empty() {
                return false;
            }
        }

        true
    }

    fn generate_text_report(&self, report: &BatchReport, config: &ReportConfig) -> String {
        let mut output = String::new();

        output.push_str(&self.generate_header());

        for file in &report.files {
            output.push_str(&self.generate_file_section(file, config));
        }

        if !report.skipped.is_empty() {
            output.push_str(&self.colorize("Skipped files:\n", Colors::YELLOW));
            for (path, reason) in &report.skipped {
                output.push_str(&format!("  {}: {}\n", path.display(), reason));
            }
            output.push('\n');
        }

        if report.files.len() > 1 {
            output.push_str(&self.generate_batch_summary(report));
        }

        output
    }

    /// Генерирует заголовок отчета
    fn generate_header(&self) -> String {
        let title = if self.use_colors {
            format!(
                "{}{}Duplicate Analysis Report{}\n",
                Colors::BOLD,
                Colors::CYAN,
                Colors::RESET
            )
        } else {
            "Duplicate Analysis Report\n".to_string()
        };

        let separator = self.colorize(&format!("{}\n", "=".repeat(50)), Colors::GRAY);
        format!("{}{}\n", title, separator)
    }

    fn generate_file_section(&self, file: &FileAnalysis, config: &ReportConfig) -> String {
        let result = &file.result;
        let mut output = String::new();

        output.push_str(&self.colorize(
            &format!("{} ({})\n", file.path.display(), result.file_type),
            Colors::BOLD,
        ));
        output.push_str(&self.generate_summary(result));

        if !result.has_duplicates() {
            output.push_str(&self.colorize("  No duplicates found\n", Colors::GREEN));
        } else if config.include_details {
            for kind in [
                DuplicateKind::Exact,
                DuplicateKind::Similar,
                DuplicateKind::Redundant,
            ] {
                output.push_str(&self.generate_kind_section(result, kind));
            }
        }

        if config.include_suggestions && !result.suggestions.is_empty() {
            output.push_str(&self.colorize("  Suggestions:\n", Colors::BOLD));
            for suggestion in &result.suggestions {
                output.push_str(&format!("    - {}\n", suggestion));
            }
        }

        output.push('\n');
        output
    }

    /// Генерирует сводную статистику
    fn generate_summary(&self, result: &AnalysisResult) -> String {
        let rows = [
            ("Total lines", result.total_lines.to_string(), Colors::BLUE),
            ("Unique lines", result.unique_lines.to_string(), Colors::GREEN),
            (
                "Duplicate lines",
                result.duplicate_lines.to_string(),
                Colors::RED,
            ),
            (
                "Redundant sections",
                result.redundant_sections.to_string(),
                Colors::YELLOW,
            ),
            (
                "Estimated reduction",
                format!("{}%", result.estimated_reduction),
                Colors::CYAN,
            ),
        ];

        let mut summary = String::new();
        for (label, value, color) in rows {
            if self.use_colors {
                summary.push_str(&format!(
                    "  {}{}:{} {}{}{}\n",
                    Colors::BOLD,
                    label,
                    Colors::RESET,
                    color,
                    value,
                    Colors::RESET
                ));
            } else {
                summary.push_str(&format!("  {}: {}\n", label, value));
            }
        }
        summary
    }

    fn generate_kind_section(&self, result: &AnalysisResult, kind: DuplicateKind) -> String {
        let entries: Vec<&DuplicateEntry> = result.entries_of(kind).collect();
        if entries.is_empty() {
            return String::new();
        }

        let (title, color) = match kind {
            DuplicateKind::Exact => ("Exact duplicates", Colors::RED),
            DuplicateKind::Similar => ("Similar lines", Colors::YELLOW),
            DuplicateKind::Redundant => ("Redundant structure", Colors::BLUE),
        };

        let mut output = self.colorize(&format!("  {} ({}):\n", title, entries.len()), color);
        for entry in entries {
            output.push_str(&self.format_entry_line(entry));
        }
        output
    }

    /// Форматирует строку записи
    fn format_entry_line(&self, entry: &DuplicateEntry) -> String {
        let locations = entry.location_labels().join(", ");
        let content = preview(&entry.content);

        if self.use_colors {
            format!(
                "    {}[{}]{} x{} {}{}%{} {}\n      {}{}{}\n",
                Colors::CYAN,
                entry.id,
                Colors::RESET,
                entry.occurrences,
                Colors::GRAY,
                entry.confidence,
                Colors::RESET,
                content,
                Colors::GRAY,
                locations,
                Colors::RESET
            )
        } else {
            format!(
                "    [{}] x{} {}% {}\n      {}\n",
                entry.id, entry.occurrences, entry.confidence, content, locations
            )
        }
    }

    fn generate_batch_summary(&self, report: &BatchReport) -> String {
        let mut output = self.colorize("Summary:\n", Colors::BOLD);
        output.push_str(&format!("  Files analyzed: {}\n", report.files.len()));
        output.push_str(&format!(
            "  Files with duplicates: {}\n",
            report.files_with_duplicates()
        ));
        output.push_str(&format!("  Total lines: {}\n", report.total_lines()));
        output.push_str(&format!("  Duplicate lines: {}\n", report.duplicate_lines()));
        output
    }

    /// Применяет цвет к тексту если включены цвета
    fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", color, text, Colors::RESET)
        } else {
            text.to_string()
        }
    }
}

fn preview(content: &str) -> String {
    if content.chars().count() <= CONTENT_PREVIEW {
        content.to_string()
    } else {
        let cut: String = content.chars().take(CONTENT_PREVIEW - 3).collect();
        format!("{}...", cut)
    }
}

impl ReportGenerator for TextReporter {
    fn generate_report(&self, report: &BatchReport, config: &ReportConfig) -> Result<String> {
        Ok(self.generate_text_report(report, config))
    }

    fn supported_format() -> ReportFormat {
        ReportFormat::Text
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}
