//! Harvest-then-export coordinator.
//!
//! Composes the two halves sequentially and reports what a caller needs to
//! record for one run: the written path, the issue count, and per-stage
//! timings. The blocking filesystem work runs under `spawn_blocking`.

use crate::export::{CsvExporter, ExportError};
use crate::harvest::{HarvestError, Harvester, SearchApi};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::info;

/// Errors from a pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("harvest stage failed: {0}")]
    Harvest(#[from] HarvestError),

    #[error("export stage failed: {0}")]
    Export(#[from] ExportError),

    #[error("export task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Timing breakdown of one run.
#[derive(Debug, Default, Clone)]
pub struct PipelineStats {
    /// Time spent fetching all pages (milliseconds)
    pub fetch_duration_ms: u64,

    /// Time spent building and writing the CSV (milliseconds)
    pub export_duration_ms: u64,

    /// Total wall time of the run (milliseconds)
    pub total_duration_ms: u64,
}

/// Outcome of one successful run.
#[derive(Debug)]
pub struct ExportOutcome {
    /// Path of the written CSV file
    pub path: PathBuf,

    /// Number of issues fetched and exported
    pub issue_count: usize,

    /// Per-stage timings
    pub stats: PipelineStats,
}

/// Sequential harvest → export pipeline.
pub struct ExportPipeline<S> {
    harvester: Harvester<S>,
    exporter: Arc<CsvExporter>,
}

impl<S: SearchApi> ExportPipeline<S> {
    pub fn new(harvester: Harvester<S>, exporter: CsvExporter) -> Self {
        Self {
            harvester,
            exporter: Arc::new(exporter),
        }
    }

    /// Fetches everything matching `query` and writes it as one CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when either stage fails; a harvest failure
    /// means nothing was written.
    pub async fn run(
        &self,
        query: &str,
        directory: Option<PathBuf>,
        filename: Option<String>,
    ) -> Result<ExportOutcome, PipelineError> {
        let start = Instant::now();
        let mut stats = PipelineStats::default();

        info!(query, "starting harvest stage");
        let fetch_start = Instant::now();
        let result = self.harvester.fetch_all(query).await?;
        stats.fetch_duration_ms = fetch_start.elapsed().as_millis() as u64;
        info!(
            duration_ms = stats.fetch_duration_ms,
            total = result.total,
            "harvest completed"
        );

        info!("starting export stage");
        let export_start = Instant::now();
        let exporter = Arc::clone(&self.exporter);
        let issue_count = result.issues.len();
        let path = tokio::task::spawn_blocking(move || {
            exporter.export(&result.issues, directory.as_deref(), filename.as_deref())
        })
        .await??;
        stats.export_duration_ms = export_start.elapsed().as_millis() as u64;
        stats.total_duration_ms = start.elapsed().as_millis() as u64;

        info!(
            duration_ms = stats.export_duration_ms,
            path = %path.display(),
            issue_count,
            "export completed"
        );

        Ok(ExportOutcome {
            path,
            issue_count,
            stats,
        })
    }
}
