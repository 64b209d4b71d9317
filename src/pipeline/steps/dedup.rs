use std::collections::HashSet;

use anyhow::Result;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::domain::StagedRecord;
use crate::store::RecordStore;

use super::{PipelineStep, StepResult};

/// Pipeline step that removes exact full-row duplicates.
///
/// The partition key spans every business field, so rows are duplicates only
/// when they agree on all of them; which copy survives is irrelevant. The
/// first occurrence in table order is kept.
pub struct DedupStep;

impl DedupStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DedupStep {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable signature over the full row: a canonical JSON encoding hashed with
/// SHA-256. JSON keeps absence and empty string distinct, so rows that differ
/// only in null-ness do not collide.
pub fn row_signature(record: &StagedRecord) -> String {
    let key = serde_json::json!([
        record.company,
        record.location,
        record.industry,
        record.total_laid_off,
        record.percentage_laid_off,
        record.date.map(|d| d.to_string()),
        record.date_text,
        record.stage,
        record.country,
        record.funds_raised_millions,
    ]);

    let mut hasher = Sha256::new();
    hasher.update(key.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

impl PipelineStep for DedupStep {
    fn execute(&self, store: &mut RecordStore) -> Result<StepResult> {
        let scanned = store.len();
        let mut seen = HashSet::with_capacity(scanned);
        let removed = store.delete_where(|record| !seen.insert(row_signature(record)));

        crate::observability::metrics::dedup::records_scanned(scanned as u64);
        crate::observability::metrics::dedup::records_removed(removed as u64);

        let message = format!(
            "Deduplication removed {} of {} records ({} distinct rows kept)",
            removed,
            scanned,
            store.len()
        );
        info!("🔁 {}", message);

        Ok(StepResult::success(removed, message))
    }

    fn step_name(&self) -> &'static str {
        "dedup"
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
