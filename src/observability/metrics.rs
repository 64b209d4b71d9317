//! Simple metrics module for the layoffs cleaning pipeline
//!
//! This module provides a straightforward API for recording metrics using
//! the standard Prometheus naming conventions. No exporter is bundled; the
//! host installs its own recorder.

use std::fmt;

/// Enum representing all metric names used in the system
/// This eliminates magic strings and provides compile-time safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Dedup metrics
    DedupRecordsScanned,
    DedupRecordsRemoved,

    // Standardize metrics
    StandardizeCompaniesTrimmed,
    StandardizeIndustriesCanonicalized,
    StandardizeCountriesCanonicalized,
    StandardizeDatesParsed,
    StandardizeDateParseFailures,

    // Null normalization metrics
    NullNormalizeFieldsCleared,

    // Backfill metrics
    BackfillDonorsIndexed,
    BackfillIndustriesFilled,

    // Prune metrics
    PruneRowsRemoved,

    // Pipeline metrics
    PipelineRunsCompleted,
    PipelineRecordsOut,
}

impl MetricName {
    /// Get the metric name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::DedupRecordsScanned => "layoffs_dedup_records_scanned_total",
            MetricName::DedupRecordsRemoved => "layoffs_dedup_records_removed_total",

            MetricName::StandardizeCompaniesTrimmed => "layoffs_standardize_companies_trimmed_total",
            MetricName::StandardizeIndustriesCanonicalized => {
                "layoffs_standardize_industries_canonicalized_total"
            }
            MetricName::StandardizeCountriesCanonicalized => {
                "layoffs_standardize_countries_canonicalized_total"
            }
            MetricName::StandardizeDatesParsed => "layoffs_standardize_dates_parsed_total",
            MetricName::StandardizeDateParseFailures => {
                "layoffs_standardize_date_parse_failures_total"
            }

            MetricName::NullNormalizeFieldsCleared => "layoffs_null_normalize_fields_cleared_total",

            MetricName::BackfillDonorsIndexed => "layoffs_backfill_donors_indexed_total",
            MetricName::BackfillIndustriesFilled => "layoffs_backfill_industries_filled_total",

            MetricName::PruneRowsRemoved => "layoffs_prune_rows_removed_total",

            MetricName::PipelineRunsCompleted => "layoffs_pipeline_runs_completed_total",
            MetricName::PipelineRecordsOut => "layoffs_pipeline_records_out_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Metric recording functions organized by pipeline stage

pub mod dedup {
    use super::MetricName;

    pub fn records_scanned(count: u64) {
        let metric_name = MetricName::DedupRecordsScanned.as_str();
        ::metrics::counter!(metric_name).increment(count);
    }

    pub fn records_removed(count: u64) {
        let metric_name = MetricName::DedupRecordsRemoved.as_str();
        ::metrics::counter!(metric_name).increment(count);
    }
}

pub mod standardize {
    use super::MetricName;

    pub fn companies_trimmed(count: u64) {
        let metric_name = MetricName::StandardizeCompaniesTrimmed.as_str();
        ::metrics::counter!(metric_name).increment(count);
    }

    pub fn industries_canonicalized(count: u64) {
        let metric_name = MetricName::StandardizeIndustriesCanonicalized.as_str();
        ::metrics::counter!(metric_name).increment(count);
    }

    pub fn countries_canonicalized(count: u64) {
        let metric_name = MetricName::StandardizeCountriesCanonicalized.as_str();
        ::metrics::counter!(metric_name).increment(count);
    }

    pub fn dates_parsed(count: u64) {
        let metric_name = MetricName::StandardizeDatesParsed.as_str();
        ::metrics::counter!(metric_name).increment(count);
    }

    pub fn date_parse_failures(count: u64) {
        let metric_name = MetricName::StandardizeDateParseFailures.as_str();
        ::metrics::counter!(metric_name).increment(count);
    }
}

pub mod null_normalize {
    use super::MetricName;

    pub fn fields_cleared(count: u64) {
        let metric_name = MetricName::NullNormalizeFieldsCleared.as_str();
        ::metrics::counter!(metric_name).increment(count);
    }
}

pub mod backfill {
    use super::MetricName;

    pub fn donors_indexed(count: u64) {
        let metric_name = MetricName::BackfillDonorsIndexed.as_str();
        ::metrics::counter!(metric_name).increment(count);
    }

    pub fn industries_filled(count: u64) {
        let metric_name = MetricName::BackfillIndustriesFilled.as_str();
        ::metrics::counter!(metric_name).increment(count);
    }
}

pub mod prune {
    use super::MetricName;

    pub fn rows_removed(count: u64) {
        let metric_name = MetricName::PruneRowsRemoved.as_str();
        ::metrics::counter!(metric_name).increment(count);
    }
}

pub mod pipeline {
    use super::MetricName;

    pub fn run_completed(records_out: u64) {
        ::metrics::counter!(MetricName::PipelineRunsCompleted.as_str()).increment(1);
        ::metrics::counter!(MetricName::PipelineRecordsOut.as_str()).increment(records_out);
    }
}
