//! Общий модуль для CLI
//!
//! Содержит общую функциональность бинарника `dedup-analyzer`:
//! - Инициализация логирования (в stderr, stdout остается для документов и отчетов)
//! - Статусные сообщения
//! - Форматирование вывода
//! - Трейт команды и запуск с обработкой ошибок

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub mod args;
pub mod output;
pub mod progress;

pub use args::{AnalysisArgs, CommonArgs, OutputArgs};
pub use output::{OutputFormat, OutputWriter};
pub use progress::PhaseProgress;

/// Инициализирует систему логирования в stderr с заданным уровнем
///
/// `RUST_LOG` дополняет уровень, выбранный флагами `--verbose` / `--quiet`.
pub fn init_logging(level: tracing::Level) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

/// Выводит заголовок команды
pub fn print_header(name: &str, version: &str, description: &str) {
    eprintln!("{} {} - {}", "🔧".blue(), name.bold().blue(), version.dimmed());
    eprintln!("{}\n", description.dimmed());
}

/// Выводит успешное завершение операции
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✅".green(), message.green());
}

/// Выводит предупреждение
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠️".yellow(), message.yellow());
}

/// Выводит ошибку
pub fn print_error(message: &str) {
    eprintln!("{} {}", "❌".red(), message.red());
}

/// Выводит информационное сообщение
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ️".blue(), message);
}

/// Проверяет существование файла или директории
pub fn validate_path(path: &Path, description: &str) -> Result<()> {
    if !path.exists() {
        return Err(anyhow::anyhow!(
            "{} does not exist: {}",
            description,
            path.display()
        ));
    }
    Ok(())
}

/// Создает родительскую директорию файла если она не существует
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Форматирует продолжительность в человекочитаемый вид
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs == 0 {
        format!("{}ms", millis)
    } else if secs < 60 {
        format!("{}.{:03}s", secs, millis)
    } else {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    }
}

/// Trait для CLI команд
pub trait CliCommand {
    /// Выполняет команду
    fn execute(&self) -> Result<()>;

    /// Возвращает имя команды
    fn name(&self) -> &str;

    /// Возвращает описание команды
    fn description(&self) -> &str;
}

/// Запускает CLI команду с обработкой ошибок
pub fn run_command<C: CliCommand>(command: C, quiet: bool) -> Result<()> {
    if !quiet {
        print_header(
            command.name(),
            env!("CARGO_PKG_VERSION"),
            command.description(),
        );
    }

    let started = std::time::Instant::now();
    match command.execute() {
        Ok(()) => {
            if !quiet {
                print_success(&format!(
                    "{} completed in {}",
                    command.name(),
                    format_duration(started.elapsed())
                ));
            }
            Ok(())
        }
        Err(e) => {
            print_error(&format!("{} failed: {:#}", command.name(), e));
            Err(e)
        }
    }
}
