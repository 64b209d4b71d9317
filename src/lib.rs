//! Deterministic data-cleaning pipeline for corporate layoff records.
//!
//! Raw rows come in with duplicate entries, inconsistent spellings, and three
//! different encodings of "no value". The pipeline runs a fixed sequence of
//! batch stages over an in-memory record store and exports an analysis-ready
//! table.

pub mod common;
pub mod domain;
pub mod observability;
pub mod pipeline;
pub mod store;

// Re-export commonly used types
pub use domain::{LayoffRecord, RawLayoffRow};
pub use pipeline::orchestrator::{clean, CleaningOutcome, CleaningPipeline};
pub use pipeline::pipeline_config::PipelineConfig;
