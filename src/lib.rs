pub mod config;
pub mod export;
pub mod harvest;
pub mod model;
pub mod pipeline;
pub mod telemetry;

// Re-export common types for convenience
pub use config::SearchConfig;
pub use export::{CsvExporter, ExportDocument, ExportError, FALLBACK_HEADER};
pub use harvest::{HarvestError, Harvester, RestSearchApi, SearchApi, SearchError, PAGE_SIZE};
pub use model::{Issue, Page, ResultSet};
pub use pipeline::{ExportOutcome, ExportPipeline, PipelineError, PipelineStats};
