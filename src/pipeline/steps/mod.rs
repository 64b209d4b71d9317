use anyhow::Result;

use crate::store::RecordStore;

/// Common trait for all cleaning pipeline steps
pub trait PipelineStep {
    /// Execute this step as one complete pass over the record store
    fn execute(&self, store: &mut RecordStore) -> Result<StepResult>;

    /// Get the name of this pipeline step
    fn step_name(&self) -> &'static str;

    /// Get the dependencies this step requires (previous steps that must complete)
    fn dependencies(&self) -> Vec<&'static str>;
}

/// Result of executing a pipeline step
#[derive(Debug, Clone)]
pub struct StepResult {
    pub success: bool,
    pub processed_count: usize,
    pub failed_count: usize,
    pub message: String,
}

impl StepResult {
    pub fn success(processed: usize, message: String) -> Self {
        Self {
            success: true,
            processed_count: processed,
            failed_count: 0,
            message,
        }
    }

    pub fn with_failures(processed: usize, failed: usize, message: String) -> Self {
        Self {
            success: true,
            processed_count: processed,
            failed_count: failed,
            message,
        }
    }
}

// Re-export all pipeline steps
pub mod backfill;
pub mod dedup;
pub mod nulls;
pub mod prune;
pub mod standardize;

pub use backfill::BackfillStep;
pub use dedup::DedupStep;
pub use nulls::NullNormalizeStep;
pub use prune::PruneStep;
pub use standardize::StandardizeStep;
