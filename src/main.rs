//! CLI утилита `dedup-analyzer`
//!
//! Поиск дубликатов в Markdown и YAML документах и их удаление

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use dedup_analyzer::analyzer::batch::collect_documents;
use dedup_analyzer::cli_common::{
    self, AnalysisArgs, CliCommand, CommonArgs, OutputArgs, OutputFormat, OutputWriter,
    PhaseProgress,
};
use dedup_analyzer::config::LOCAL_CONFIG_FILE;
use dedup_analyzer::core::read_document;
use dedup_analyzer::{
    analyze_paths, apply_result, AnalyzerConfig, BatchReport, DuplicateAnalyzer, FileAnalysis,
    FileType, ReportConfig, ReportFormat, ReportManager,
};

#[derive(Parser)]
#[command(
    name = "dedup-analyzer",
    version = env!("CARGO_PKG_VERSION"),
    about = "Duplicate line analyzer for Markdown and YAML documents",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a document or a directory of documents
    Analyze {
        /// Path to a file or directory
        path: PathBuf,

        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Output format (text, json, table)
        #[arg(short, long, default_value = "text")]
        format: String,

        #[command(flatten)]
        output: OutputArgs,

        /// Walk directories recursively
        #[arg(short, long)]
        recursive: bool,

        /// Number of parallel workers (defaults to the CPU count)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Remove duplicates from a document, keeping the first occurrence
    Apply {
        /// Document to deduplicate
        file: PathBuf,

        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Entry id to apply (repeatable); all entries when omitted
        #[arg(short, long = "select", value_name = "ID")]
        select: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write an example configuration file
    InitConfig {
        /// Destination (defaults to .dedup-analyzer.toml / .dedup-analyzer.yaml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration format (toml, yaml)
        #[arg(short, long)]
        format: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Инициализация логирования
    cli_common::init_logging(cli.common.log_level())?;

    let quiet = !cli.common.should_print();
    match cli.command {
        Commands::Analyze {
            path,
            analysis,
            format,
            output,
            recursive,
            jobs,
        } => {
            let cmd = AnalyzeCommand {
                path,
                analysis,
                format,
                output: output.output,
                recursive,
                jobs,
                quiet,
            };
            cli_common::run_command(cmd, quiet)?;
        }

        Commands::Apply {
            file,
            analysis,
            select,
            output,
        } => {
            let cmd = ApplyCommand {
                file,
                analysis,
                select,
                output: output.output,
                quiet,
            };
            cli_common::run_command(cmd, quiet)?;
        }

        Commands::InitConfig {
            output,
            format,
            force,
        } => {
            let cmd = InitConfigCommand {
                output,
                format,
                force,
            };
            cli_common::run_command(cmd, quiet)?;
        }
    }

    Ok(())
}

/// Тип документа: флаг `--type`, затем расширение, затем значение из конфигурации
fn resolve_file_type(
    path: &Path,
    analysis: &AnalysisArgs,
    config: &AnalyzerConfig,
) -> Result<FileType> {
    if let Some(file_type) = analysis.parsed_file_type()? {
        return Ok(file_type);
    }
    match FileType::from_path(path) {
        Ok(file_type) => Ok(file_type),
        Err(e) => config
            .default_file_type
            .ok_or_else(|| anyhow::anyhow!("{}: {}; pass --type", path.display(), e)),
    }
}

// ================================================================================
// Команда Analyze
// ================================================================================

struct AnalyzeCommand {
    path: PathBuf,
    analysis: AnalysisArgs,
    format: String,
    output: Option<PathBuf>,
    recursive: bool,
    jobs: Option<usize>,
    quiet: bool,
}

impl CliCommand for AnalyzeCommand {
    fn name(&self) -> &str {
        "analyze"
    }

    fn description(&self) -> &str {
        "Find exact, similar and structurally redundant lines"
    }

    fn execute(&self) -> Result<()> {
        cli_common::validate_path(&self.path, "Analysis path")?;

        let format = OutputFormat::from_str(&self.format)?;
        let config = self.analysis.resolve_config()?;

        let report = if self.path.is_file() {
            self.analyze_single(&config)?
        } else {
            self.analyze_directory(&config)?
        };

        self.write_report(&report, format)?;
        self.print_summary(&report);
        Ok(())
    }
}

impl AnalyzeCommand {
    fn analyze_single(&self, config: &AnalyzerConfig) -> Result<BatchReport> {
        let file_type = resolve_file_type(&self.path, &self.analysis, config)?;
        let analyzer = DuplicateAnalyzer::from_config(file_type, config);

        let progress = PhaseProgress::for_mode(&self.path.display().to_string(), self.quiet)?;
        let content = read_document(&self.path)?;
        let result = analyzer.analyze_with_progress(&content, |phase| progress.phase(phase));
        progress.finish();

        Ok(BatchReport {
            files: vec![FileAnalysis {
                path: self.path.clone(),
                result,
            }],
            skipped: Vec::new(),
        })
    }

    fn analyze_directory(&self, config: &AnalyzerConfig) -> Result<BatchReport> {
        let paths = collect_documents(&self.path, self.recursive);
        if paths.is_empty() {
            cli_common::print_warning(&format!(
                "No Markdown or YAML documents found in {}",
                self.path.display()
            ));
            return Ok(BatchReport::default());
        }

        let jobs = self.jobs.unwrap_or_else(num_cpus::get).max(1);
        tracing::debug!("Analyzing {} files with {} workers", paths.len(), jobs);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("Failed to create worker pool")?;

        let progress = PhaseProgress::for_mode(&self.path.display().to_string(), self.quiet)?;
        progress.set_message(format!("Analyzing {} files...", paths.len()));
        let forced_type = self.analysis.parsed_file_type()?;
        let report = pool.install(|| analyze_paths(&paths, config, forced_type));
        progress.finish();

        Ok(report)
    }

    fn write_report(&self, report: &BatchReport, format: OutputFormat) -> Result<()> {
        let use_colors = self.output.is_none() && !self.quiet;

        match format {
            OutputFormat::Text | OutputFormat::Json => {
                let report_format = if format == OutputFormat::Json {
                    ReportFormat::Json
                } else {
                    ReportFormat::Text
                };
                let manager = ReportManager::with_config(ReportConfig {
                    format: report_format,
                    use_colors,
                    ..ReportConfig::default()
                });

                match &self.output {
                    Some(path) => {
                        cli_common::ensure_parent_dir(path)?;
                        manager.save_report(report, report_format, path)?;
                    }
                    None => {
                        let mut writer = OutputWriter::stdout(format);
                        writer.write_raw(&manager.render(report, report_format)?)?;
                        writer.flush()?;
                    }
                }
            }
            OutputFormat::Table => {
                let mut writer =
                    OutputWriter::create(self.output.as_deref(), format)?.with_colors(use_colors);
                writer.write_header("Duplicates")?;
                writer.write_table(
                    &["File", "ID", "Kind", "Count", "Confidence", "Lines", "Content"],
                    entry_rows(report),
                )?;
                writer.write_header("Summary")?;
                writer.write_table(&["Metric", "Value"], summary_rows(report))?;
                writer.flush()?;
            }
        }

        if let Some(path) = &self.output {
            if !self.quiet {
                cli_common::print_info(&format!("Report written to {}", path.display()));
            }
        }
        Ok(())
    }

    fn print_summary(&self, report: &BatchReport) {
        if self.quiet {
            return;
        }
        for (path, reason) in &report.skipped {
            cli_common::print_warning(&format!("Skipped {}: {}", path.display(), reason));
        }
        let entries = report.total_entries();
        if entries > 0 {
            cli_common::print_warning(&format!(
                "Found {} duplicate group(s) covering {} line(s) in {} file(s)",
                entries,
                report.duplicate_lines(),
                report.files_with_duplicates()
            ));
        } else {
            cli_common::print_success("No duplicates found");
        }
    }
}

fn entry_rows(report: &BatchReport) -> Vec<Vec<String>> {
    report
        .files
        .iter()
        .flat_map(|file| {
            file.result.duplicates.iter().map(move |entry| {
                vec![
                    file.path.display().to_string(),
                    entry.id.clone(),
                    entry.kind.to_string(),
                    entry.occurrences.to_string(),
                    format!("{}%", entry.confidence),
                    entry
                        .locations
                        .iter()
                        .map(|line| line.get().to_string())
                        .collect::<Vec<_>>()
                        .join(", "),
                    entry.content.clone(),
                ]
            })
        })
        .collect()
}

fn summary_rows(report: &BatchReport) -> Vec<Vec<String>> {
    vec![
        vec!["Files analyzed".to_string(), report.files.len().to_string()],
        vec!["Files skipped".to_string(), report.skipped.len().to_string()],
        vec![
            "Files with duplicates".to_string(),
            report.files_with_duplicates().to_string(),
        ],
        vec!["Total lines".to_string(), report.total_lines().to_string()],
        vec![
            "Duplicate lines".to_string(),
            report.duplicate_lines().to_string(),
        ],
        vec![
            "Duplicate groups".to_string(),
            report.total_entries().to_string(),
        ],
    ]
}

// ================================================================================
// Команда Apply
// ================================================================================

struct ApplyCommand {
    file: PathBuf,
    analysis: AnalysisArgs,
    select: Vec<String>,
    output: Option<PathBuf>,
    quiet: bool,
}

impl CliCommand for ApplyCommand {
    fn name(&self) -> &str {
        "apply"
    }

    fn description(&self) -> &str {
        "Remove duplicate lines, keeping the first occurrence"
    }

    fn execute(&self) -> Result<()> {
        cli_common::validate_path(&self.file, "Input file")?;

        let config = self.analysis.resolve_config()?;
        let file_type = resolve_file_type(&self.file, &self.analysis, &config)?;
        let content = read_document(&self.file)?;

        let progress = PhaseProgress::for_mode(&self.file.display().to_string(), self.quiet)?;
        let result = DuplicateAnalyzer::from_config(file_type, &config)
            .analyze_with_progress(&content, |phase| progress.phase(phase));
        progress.finish();

        let selected: HashSet<String> = self.select.iter().cloned().collect();
        for id in &selected {
            if result.find(id).is_none() {
                cli_common::print_warning(&format!("Unknown entry id ignored: {}", id));
            }
        }

        let outcome = apply_result(&content, &result, &selected);

        let mut writer = OutputWriter::create(self.output.as_deref(), OutputFormat::Text)?;
        writer.write_raw(&outcome.output)?;
        writer.flush()?;

        if !self.quiet {
            cli_common::print_info(&format!(
                "Removed {} line(s) using {} of {} entries",
                outcome.removed_count(),
                if selected.is_empty() {
                    result.duplicates.len()
                } else {
                    selected.iter().filter(|id| result.find(id).is_some()).count()
                },
                result.duplicates.len()
            ));
            if !outcome.warnings.is_empty() {
                cli_common::print_warning(&format!(
                    "{} structural warning(s), review the output",
                    outcome.warnings.len()
                ));
            }
        }
        Ok(())
    }
}

// ================================================================================
// Команда InitConfig
// ================================================================================

struct InitConfigCommand {
    output: Option<PathBuf>,
    format: Option<String>,
    force: bool,
}

impl CliCommand for InitConfigCommand {
    fn name(&self) -> &str {
        "init-config"
    }

    fn description(&self) -> &str {
        "Write an example analyzer configuration"
    }

    fn execute(&self) -> Result<()> {
        let path = self.target_path()?;

        if path.exists() && !self.force {
            anyhow::bail!(
                "{} already exists, pass --force to overwrite",
                path.display()
            );
        }

        cli_common::ensure_parent_dir(&path)?;
        AnalyzerConfig::create_example_config(&path)?;
        cli_common::print_success(&format!("Configuration written to {}", path.display()));
        Ok(())
    }
}

impl InitConfigCommand {
    fn target_path(&self) -> Result<PathBuf> {
        let wants_yaml = match self.format.as_deref().map(str::to_lowercase).as_deref() {
            None => None,
            Some("toml") => Some(false),
            Some("yaml") | Some("yml") => Some(true),
            Some(other) => anyhow::bail!("Unknown config format: {} (expected toml or yaml)", other),
        };

        match (&self.output, wants_yaml) {
            (Some(path), None) => Ok(path.clone()),
            (Some(path), Some(yaml)) => {
                let is_yaml = matches!(
                    path.extension().and_then(|e| e.to_str()),
                    Some("yaml") | Some("yml")
                );
                if is_yaml != yaml {
                    anyhow::bail!(
                        "{} does not match --format {}",
                        path.display(),
                        if yaml { "yaml" } else { "toml" }
                    );
                }
                Ok(path.clone())
            }
            (None, Some(true)) => Ok(PathBuf::from(".dedup-analyzer.yaml")),
            (None, _) => Ok(PathBuf::from(LOCAL_CONFIG_FILE)),
        }
    }
}
