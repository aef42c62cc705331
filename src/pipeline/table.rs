//! Delimited table I/O.
//!
//! Tables are read whole into memory: one header row followed by data
//! rows. Rows may be ragged; they are written back exactly as wide as
//! they were read.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::{PipelineError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn read(path: &Path, delimiter: u8) -> Result<Self> {
        let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| PipelineError::table(path, e))?
            .clone();
        if headers.is_empty() {
            return Err(PipelineError::EmptyTable(path.to_path_buf()));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| PipelineError::table(path, e))?;
            rows.push(record_to_row(&record));
        }

        log::debug!(
            "TABLE_READ path={} columns={} rows={}",
            path.display(),
            headers.len(),
            rows.len()
        );

        Ok(Self {
            headers: record_to_row(&headers),
            rows,
        })
    }

    /// Write the table to `path`.
    ///
    /// The table is first written to a hidden sibling file and then renamed
    /// over `path`, so a failed write never leaves a truncated output.
    pub fn write(&self, path: &Path, delimiter: u8) -> Result<()> {
        let tmp = temp_sibling(path);
        if let Err(e) = self.write_to(&tmp, delimiter) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        fs::rename(&tmp, path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            PipelineError::io(path, e)
        })?;

        log::debug!(
            "TABLE_WRITTEN path={} rows={}",
            path.display(),
            self.rows.len()
        );
        Ok(())
    }

    fn write_to(&self, path: &Path, delimiter: u8) -> Result<()> {
        let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
        let mut writer = WriterBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_writer(file);

        writer
            .write_record(&self.headers)
            .map_err(|e| PipelineError::table(path, e))?;
        for row in &self.rows {
            writer
                .write_record(row)
                .map_err(|e| PipelineError::table(path, e))?;
        }
        writer.flush().map_err(|e| PipelineError::io(path, e))
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of `name`, or `MissingColumn` naming `source` as the table origin.
    pub fn require_column(&self, name: &str, source: &Path) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| PipelineError::MissingColumn {
                column: name.to_string(),
                path: source.to_path_buf(),
            })
    }

    /// Append a column, filling existing rows with `fill`.
    ///
    /// Short rows are padded first. Rows wider than the header keep their
    /// trailing cells, which move one place right of the new column.
    pub fn add_column(&mut self, name: &str, fill: &str) -> usize {
        let width = self.headers.len();
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            if row.len() < width {
                row.resize(width, String::new());
            }
            row.insert(width, fill.to_string());
        }
        width
    }

    /// Cell value, treating cells missing from a short row as empty.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set_cell(&mut self, row: usize, column: usize, value: String) {
        if let Some(r) = self.rows.get_mut(row) {
            if r.len() <= column {
                r.resize(column + 1, String::new());
            }
            r[column] = value;
        }
    }
}

fn record_to_row(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let suffix = &uuid::Uuid::new_v4().simple().to_string()[..8];
    path.with_file_name(format!(".{}.{}.tmp", name, suffix))
}
