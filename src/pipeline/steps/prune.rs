use anyhow::Result;
use tracing::info;

use crate::store::RecordStore;

use super::{PipelineStep, StepResult};

/// Pipeline step that deletes rows carrying no usable layoff measurement:
/// both `total_laid_off` and `percentage_laid_off` absent. Runs after null
/// normalization so textual placeholders are already true absence.
pub struct PruneStep;

impl PipelineStep for PruneStep {
    fn execute(&self, store: &mut RecordStore) -> Result<StepResult> {
        let removed = store.delete_where(|record| {
            record.total_laid_off.is_none() && record.percentage_laid_off.is_none()
        });

        crate::observability::metrics::prune::rows_removed(removed as u64);

        let message = format!(
            "Pruning removed {} rows without any layoff measurement ({} remain)",
            removed,
            store.len()
        );
        info!("✂️ {}", message);

        Ok(StepResult::success(removed, message))
    }

    fn step_name(&self) -> &'static str {
        "prune"
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["null_normalize"]
    }
}
