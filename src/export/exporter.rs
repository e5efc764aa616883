//! CSV file writing with directory and filename resolution.

use crate::export::document::ExportDocument;
use crate::model::Issue;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Prefix for synthesized filenames.
const FILENAME_PREFIX: &str = "issue_export_";

/// Errors from a single export attempt, one variant per failing stage so the
/// caller can log precisely which one it was.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("export directory could not be created: {}: {source}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("export directory is not writable: {}", path.display())]
    DirectoryNotWritable { path: PathBuf },

    #[error("CSV file could not be written: {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes issue sequences as CSV files.
///
/// Fully synchronous, single-shot: the whole file content is computed in
/// memory and written in one call. Two exports to the same path race at the
/// OS level with no locking; the last writer wins.
pub struct CsvExporter {
    base_dir: PathBuf,
}

impl CsvExporter {
    /// Creates an exporter whose default target is `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Exports `issues` as one CSV file and returns the written path.
    ///
    /// Uses `directory` when given, else the configured default, creating it
    /// (and parents) when missing. Uses `filename` when given, else a
    /// synthesized `issue_export_<timestamp>` name; a missing `.csv` suffix
    /// is appended either way.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] when the directory cannot be created, exists
    /// but is not writable, or the file write fails. No partial artifact is
    /// cleaned up on failure beyond whatever the filesystem call left behind.
    pub fn export(
        &self,
        issues: &[Issue],
        directory: Option<&Path>,
        filename: Option<&str>,
    ) -> Result<PathBuf, ExportError> {
        let directory = directory.unwrap_or(&self.base_dir);

        if !directory.is_dir() {
            if let Err(source) = fs::create_dir_all(directory) {
                // A concurrent creator winning the race is not a failure.
                if !directory.is_dir() {
                    return Err(ExportError::DirectoryCreation {
                        path: directory.to_path_buf(),
                        source,
                    });
                }
            }
        }
        if is_read_only(directory) {
            return Err(ExportError::DirectoryNotWritable {
                path: directory.to_path_buf(),
            });
        }

        let mut filename = match filename {
            Some(name) => name.to_string(),
            None => format!(
                "{FILENAME_PREFIX}{}",
                Local::now().format("%Y-%m-%d_%H-%M-%S")
            ),
        };
        if !filename.ends_with(".csv") {
            filename.push_str(".csv");
        }

        let path = directory.join(filename);
        let content = ExportDocument::from_issues(issues).to_csv();

        // UTF-8, no BOM, one write.
        fs::write(&path, content).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

        info!(
            path = %path.display(),
            issue_count = issues.len(),
            "CSV export completed"
        );

        Ok(path)
    }
}

fn is_read_only(directory: &Path) -> bool {
    fs::metadata(directory)
        .map(|meta| meta.permissions().readonly())
        .unwrap_or(false)
}
