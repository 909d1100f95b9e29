//! Модуль для форматирования и вывода результатов

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Формат вывода результатов
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Table,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => Err(anyhow::anyhow!(
                "Unknown output format: {} (expected text, json or table)",
                s
            )),
        }
    }
}

/// Writer для вывода результатов
pub struct OutputWriter {
    writer: Box<dyn Write>,
    format: OutputFormat,
    pretty: bool,
    colors: bool,
}

impl OutputWriter {
    /// Создает writer для stdout
    pub fn stdout(format: OutputFormat) -> Self {
        Self {
            writer: Box::new(io::stdout()),
            format,
            pretty: true,
            colors: true,
        }
    }

    /// Создает writer для файла
    pub fn file(path: &Path, format: OutputFormat) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self {
            writer: Box::new(BufWriter::new(file)),
            format,
            pretty: true,
            colors: false,
        })
    }

    /// Writer в файл если путь задан, иначе в stdout
    pub fn create(path: Option<&Path>, format: OutputFormat) -> Result<Self> {
        match path {
            Some(path) => {
                super::ensure_parent_dir(path)?;
                Self::file(path, format)
            }
            None => Ok(Self::stdout(format)),
        }
    }

    #[cfg(test)]
    fn buffer(format: OutputFormat) -> (Self, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let writer = Self {
            writer: Box::new(buffer.clone()),
            format,
            pretty: false,
            colors: false,
        };
        (writer, buffer)
    }

    /// Включает или отключает ANSI цвета
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Записывает сериализуемый объект
    pub fn write_object<T: Serialize>(&mut self, obj: &T) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(obj)?
        } else {
            serde_json::to_string(obj)?
        };
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    /// Записывает текст как есть, без добавления перевода строки
    pub fn write_raw(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Записывает заголовок
    pub fn write_header(&mut self, header: &str) -> Result<()> {
        let underline = "=".repeat(header.chars().count());
        if self.colors {
            writeln!(self.writer, "\n{}", header.bold().blue())?;
            writeln!(self.writer, "{}", underline.blue())?;
        } else {
            writeln!(self.writer, "\n{}", header)?;
            writeln!(self.writer, "{}", underline)?;
        }
        Ok(())
    }

    /// Записывает таблицу
    pub fn write_table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        match self.format {
            OutputFormat::Table | OutputFormat::Text => {
                // Вычисляем ширину колонок
                let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
                for row in &rows {
                    for (i, cell) in row.iter().enumerate() {
                        if i < widths.len() {
                            widths[i] = widths[i].max(cell.chars().count());
                        }
                    }
                }

                let header_line = headers
                    .iter()
                    .zip(&widths)
                    .map(|(header, width)| format!("{:width$}", header, width = *width))
                    .collect::<Vec<_>>()
                    .join(" │ ");
                if self.colors {
                    writeln!(self.writer, "{}", header_line.trim_end().bold())?;
                } else {
                    writeln!(self.writer, "{}", header_line.trim_end())?;
                }

                for (i, width) in widths.iter().enumerate() {
                    if i > 0 {
                        write!(self.writer, "─┼─")?;
                    }
                    write!(self.writer, "{}", "─".repeat(*width))?;
                }
                writeln!(self.writer)?;

                for row in rows {
                    let cells: Vec<String> = row
                        .iter()
                        .enumerate()
                        .map(|(i, cell)| match widths.get(i) {
                            Some(width) => format!("{:width$}", cell, width = *width),
                            None => cell.clone(),
                        })
                        .collect();
                    writeln!(self.writer, "{}", cells.join(" │ ").trim_end())?;
                }
            }
            OutputFormat::Json => {
                let objects: Vec<serde_json::Value> = rows
                    .into_iter()
                    .map(|row| {
                        let obj: serde_json::Map<String, serde_json::Value> = headers
                            .iter()
                            .zip(row)
                            .map(|(header, cell)| {
                                (header.to_string(), serde_json::Value::String(cell))
                            })
                            .collect();
                        serde_json::Value::Object(obj)
                    })
                    .collect();
                self.write_object(&objects)?;
            }
        }
        Ok(())
    }

    /// Завершает запись и сбрасывает буфер
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
struct SharedBuffer(std::rc::Rc<std::cell::RefCell<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
