//! Модуль для отображения прогресса выполнения

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

use crate::analyzer::AnalysisPhase;

/// Спиннер, показывающий текущую фазу анализа
pub struct PhaseProgress {
    bar: ProgressBar,
}

impl PhaseProgress {
    /// Создает спиннер в stderr
    pub fn new(label: &str) -> Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {prefix:.bold} {msg}")
                .context("Failed to set progress style")?,
        );
        bar.set_prefix(label.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Ok(Self { bar })
    }

    /// Скрытый спиннер для тихого режима
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden()),
        }
    }

    /// Спиннер или скрытый вариант в зависимости от режима
    pub fn for_mode(label: &str, quiet: bool) -> Result<Self> {
        if quiet {
            Ok(Self::hidden())
        } else {
            Self::new(label)
        }
    }

    /// Обновляет сообщение на текущую фазу
    pub fn phase(&self, phase: AnalysisPhase) {
        self.bar.set_message(format!("{}...", phase));
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.bar.set_message(message.into());
    }

    /// Убирает спиннер с экрана
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for PhaseProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
