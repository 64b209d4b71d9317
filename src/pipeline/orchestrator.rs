use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::domain::{LayoffRecord, RawLayoffRow};
use crate::pipeline::pipeline_config::{PipelineConfig, StepConfig};
use crate::pipeline::steps::{
    BackfillStep, DedupStep, NullNormalizeStep, PipelineStep, PruneStep, StandardizeStep,
    StepResult,
};
use crate::store::RecordStore;

/// Orchestrator for running the complete cleaning pipeline
///
/// Builds the configured steps, runs them in order over the record store,
/// and exports the final snapshot. Each step is one full batch pass; nothing
/// downstream observes a partially processed table.
pub struct CleaningPipeline {
    config: PipelineConfig,
}

/// Outcome of a full pipeline run
#[derive(Debug)]
pub struct CleaningOutcome {
    pub rows_in: usize,
    pub records: Vec<LayoffRecord>,
    pub step_results: Vec<StepResult>,
}

impl CleaningPipeline {
    /// Create a pipeline from a validated configuration
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate().context("invalid pipeline configuration")?;
        Ok(Self { config })
    }

    /// Create a pipeline with the default full configuration
    pub fn with_default_config() -> Self {
        Self {
            config: PipelineConfig::default_full_pipeline(),
        }
    }

    fn build_step(config: &StepConfig) -> Box<dyn PipelineStep> {
        match config {
            StepConfig::Dedup => Box::new(DedupStep::new()),
            StepConfig::Standardize {
                case_insensitive_prefixes,
            } => Box::new(StandardizeStep::new(case_insensitive_prefixes.unwrap_or(true))),
            StepConfig::NullNormalize { null_tokens } => {
                Box::new(NullNormalizeStep::new(null_tokens.clone()))
            }
            StepConfig::Backfill { require_location } => {
                Box::new(BackfillStep::new(require_location.unwrap_or(true)))
            }
            StepConfig::Prune => Box::new(PruneStep),
        }
    }

    /// Run every configured step over the raw rows and export the snapshot
    pub fn run(&self, rows: Vec<RawLayoffRow>) -> Result<CleaningOutcome> {
        let rows_in = rows.len();
        info!(
            "🔄 Starting cleaning pipeline '{}' over {} raw rows",
            self.config.name, rows_in
        );

        let mut store = RecordStore::load(rows);
        let mut step_results = Vec::with_capacity(self.config.steps.len());

        for step_config in &self.config.steps {
            let step = Self::build_step(step_config);
            debug!("Running step '{}'", step.step_name());
            let result = step
                .execute(&mut store)
                .with_context(|| format!("step '{}' failed", step.step_name()))?;
            step_results.push(result);
        }

        let records = store.snapshot();
        crate::observability::metrics::pipeline::run_completed(records.len() as u64);
        info!(
            "✅ Cleaning pipeline '{}' finished: {} rows in, {} records out",
            self.config.name,
            rows_in,
            records.len()
        );

        Ok(CleaningOutcome {
            rows_in,
            records,
            step_results,
        })
    }
}

/// Clean a raw layoffs table with the default pipeline.
///
/// This is the single external surface of the crate: raw rows in, canonical
/// records out.
pub fn clean(rows: Vec<RawLayoffRow>) -> Result<Vec<LayoffRecord>> {
    CleaningPipeline::with_default_config()
        .run(rows)
        .map(|outcome| outcome.records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configuration_is_rejected_at_construction() {
        let config = PipelineConfig {
            name: "bad".to_string(),
            description: String::new(),
            steps: vec![StepConfig::Prune],
        };
        assert!(CleaningPipeline::new(config).is_err());
    }

    #[test]
    fn empty_input_produces_empty_output() {
        let outcome = CleaningPipeline::with_default_config().run(vec![]).unwrap();
        assert_eq!(outcome.rows_in, 0);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.step_results.len(), 5);
    }
}
