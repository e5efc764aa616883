//! Harvest module - paged retrieval of search results.
//!
//! This module provides the fetch half of the export pipeline:
//! - **Seam**: [`SearchApi`] abstracts one paged search request
//! - **Client**: [`RestSearchApi`] talks to the tracker's REST search resource
//! - **Harvester**: [`Harvester`] loops pages into a complete result set
//! - **Errors**: [`SearchError`] per request, [`HarvestError`] per fetch

pub mod api;
pub mod harvester;
pub mod rest;

// Re-export commonly used types
pub use api::{SearchApi, SearchError};
pub use harvester::{HarvestError, Harvester, PAGE_SIZE};
pub use rest::RestSearchApi;
