//! Export module - flat CSV serialization of schema-less issues.
//!
//! - **Document**: [`ExportDocument`] discovers the column set and builds rows
//! - **Formatting**: [`format`] holds the value-flattening and quoting rules
//! - **Writer**: [`CsvExporter`] resolves the target path and writes the file

pub mod document;
pub mod exporter;
pub mod format;

// Re-export commonly used types
pub use document::{ExportDocument, FALLBACK_HEADER};
pub use exporter::{CsvExporter, ExportError};
