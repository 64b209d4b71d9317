use anyhow::Result;
use once_cell::sync::Lazy;
use tracing::{info, warn};

use crate::domain::Column;
use crate::pipeline::convert;
use crate::store::RecordStore;

use super::{PipelineStep, StepResult};

/// Catalog of industry prefix families and the canonical bucket each one
/// collapses to.
static INDUSTRY_BUCKETS: Lazy<Vec<(&'static str, &'static str)>> =
    Lazy::new(|| vec![("Crypto", "Crypto")]);

/// Country families whose spellings merge to one representative by stripping
/// literal periods and trailing whitespace.
static COUNTRY_FAMILIES: Lazy<Vec<&'static str>> = Lazy::new(|| vec!["United States"]);

/// Pipeline step that standardizes text fields and parses dates.
///
/// Company names are trimmed, industry labels in the Crypto family collapse
/// to the canonical bucket, United States spellings lose trailing punctuation,
/// and the staged date text is parsed into a calendar date. Unparseable dates
/// become absent; the row survives.
pub struct StandardizeStep {
    case_insensitive_prefixes: bool,
}

impl StandardizeStep {
    pub fn new(case_insensitive_prefixes: bool) -> Self {
        Self {
            case_insensitive_prefixes,
        }
    }

    fn has_prefix(&self, value: &str, prefix: &str) -> bool {
        if self.case_insensitive_prefixes {
            // get() guards against slicing through a multi-byte character.
            value
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        } else {
            value.starts_with(prefix)
        }
    }

    /// Canonical replacement for an industry label, if one applies.
    fn canonical_industry(&self, value: &str) -> Option<&'static str> {
        INDUSTRY_BUCKETS
            .iter()
            .find(|(prefix, canonical)| self.has_prefix(value, prefix) && value != *canonical)
            .map(|(_, canonical)| *canonical)
    }

    /// Canonical replacement for a country value, if one applies: members of
    /// a known family lose literal periods and trailing whitespace.
    fn canonical_country(&self, value: &str) -> Option<String> {
        if !COUNTRY_FAMILIES
            .iter()
            .any(|family| self.has_prefix(value, family))
        {
            return None;
        }
        let cleaned = value.replace('.', "");
        let cleaned = cleaned.trim_end();
        if cleaned == value {
            None
        } else {
            Some(cleaned.to_string())
        }
    }
}

impl Default for StandardizeStep {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PipelineStep for StandardizeStep {
    fn execute(&self, store: &mut RecordStore) -> Result<StepResult> {
        let trimmed = store.update_where(
            |record| record.company.trim() != record.company,
            |record| record.company = record.company.trim().to_string(),
        );

        let industries = store.update_where(
            |record| {
                record
                    .industry
                    .as_deref()
                    .and_then(|value| self.canonical_industry(value))
                    .is_some()
            },
            |record| {
                if let Some(canonical) = record
                    .industry
                    .as_deref()
                    .and_then(|value| self.canonical_industry(value))
                {
                    record.industry = Some(canonical.to_string());
                }
            },
        );

        let countries = store.update_where(
            |record| {
                self.canonical_country(record.country.as_str()).is_some()
            },
            |record| {
                if let Some(canonical) = self.canonical_country(record.country.as_str()) {
                    record.country = canonical;
                }
            },
        );

        let mut dates_parsed = 0usize;
        let mut dates_failed = 0usize;
        store.update_where(
            |record| record.date_text.is_some(),
            |record| {
                let raw = record.date_text.take();
                match raw.as_deref().and_then(convert::try_date) {
                    Some(date) => {
                        record.date = Some(date);
                        dates_parsed += 1;
                    }
                    None => {
                        // Try-conversion policy: the field goes absent, the
                        // row is retained.
                        record.date = None;
                        dates_failed += 1;
                    }
                }
            },
        );
        // The staging column has been consumed; remove it from the schema.
        store.drop_field(Column::DateText)?;

        if dates_failed > 0 {
            warn!("{} date values did not parse and were nulled", dates_failed);
        }

        crate::observability::metrics::standardize::companies_trimmed(trimmed as u64);
        crate::observability::metrics::standardize::industries_canonicalized(industries as u64);
        crate::observability::metrics::standardize::countries_canonicalized(countries as u64);
        crate::observability::metrics::standardize::dates_parsed(dates_parsed as u64);
        crate::observability::metrics::standardize::date_parse_failures(dates_failed as u64);

        let processed = trimmed + industries + countries + dates_parsed;
        let message = format!(
            "Standardization trimmed {} companies, canonicalized {} industries and {} countries, parsed {} dates ({} unparseable)",
            trimmed, industries, countries, dates_parsed, dates_failed
        );
        info!("🧹 {}", message);

        Ok(StepResult::with_failures(processed, dates_failed, message))
    }

    fn step_name(&self) -> &'static str {
        "standardize"
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["dedup"]
    }
}
