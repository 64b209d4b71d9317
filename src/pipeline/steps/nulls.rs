use anyhow::Result;
use tracing::info;

use crate::store::RecordStore;

use super::{PipelineStep, StepResult};

/// Pipeline step that unifies the three "no value" encodings.
///
/// Raw data encodes missingness as true absence, empty/whitespace-only text,
/// or a literal placeholder token, interchangeably. This step rewrites the
/// textual encodings in `percentage_laid_off` and `industry` to true absence
/// so every later stage can test a single null representation.
pub struct NullNormalizeStep {
    null_tokens: Vec<String>,
}

impl NullNormalizeStep {
    pub fn new(null_tokens: Option<Vec<String>>) -> Self {
        Self {
            null_tokens: null_tokens.unwrap_or_else(|| vec!["NULL".to_string()]),
        }
    }

    fn is_missing(&self, value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || self
                .null_tokens
                .iter()
                .any(|token| trimmed.eq_ignore_ascii_case(token))
    }
}

impl Default for NullNormalizeStep {
    fn default() -> Self {
        Self::new(None)
    }
}

impl PipelineStep for NullNormalizeStep {
    fn execute(&self, store: &mut RecordStore) -> Result<StepResult> {
        let percentages = store.update_where(
            |record| {
                record
                    .percentage_laid_off
                    .as_deref()
                    .is_some_and(|value| self.is_missing(value))
            },
            |record| record.percentage_laid_off = None,
        );

        let industries = store.update_where(
            |record| {
                record
                    .industry
                    .as_deref()
                    .is_some_and(|value| self.is_missing(value))
            },
            |record| record.industry = None,
        );

        crate::observability::metrics::null_normalize::fields_cleared(
            (percentages + industries) as u64,
        );

        let message = format!(
            "Null normalization cleared {} percentage and {} industry placeholder values",
            percentages, industries
        );
        info!("🫙 {}", message);

        Ok(StepResult::success(percentages + industries, message))
    }

    fn step_name(&self) -> &'static str {
        "null_normalize"
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["standardize"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawLayoffRow;

    fn raw(industry: Option<&str>, percentage: Option<&str>) -> RawLayoffRow {
        RawLayoffRow {
            company: Some("Acme".to_string()),
            industry: industry.map(|s| s.to_string()),
            percentage_laid_off: percentage.map(|s| s.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn placeholder_encodings_become_true_absence() {
        let mut store = RecordStore::load(vec![
            raw(Some(""), Some("NULL")),
            raw(Some("   "), Some("null")),
            raw(Some("NULL"), Some("0.25")),
            raw(Some("Retail"), None),
        ]);

        let result = NullNormalizeStep::default().execute(&mut store).unwrap();
        assert_eq!(result.processed_count, 5);

        for record in store.select_where(|_| true) {
            if let Some(industry) = record.industry.as_deref() {
                assert!(!industry.trim().is_empty());
                assert!(!industry.eq_ignore_ascii_case("NULL"));
            }
            if let Some(percentage) = record.percentage_laid_off.as_deref() {
                assert!(!percentage.trim().is_empty());
                assert!(!percentage.eq_ignore_ascii_case("NULL"));
            }
        }
    }

    #[test]
    fn custom_tokens_extend_the_placeholder_set() {
        let mut store = RecordStore::load(vec![raw(Some("n/a"), None)]);

        let step = NullNormalizeStep::new(Some(vec!["NULL".to_string(), "n/a".to_string()]));
        step.execute(&mut store).unwrap();

        assert!(store.select_where(|r| r.industry.is_some()).next().is_none());
    }

    #[test]
    fn rerun_on_normalized_data_is_a_no_op() {
        let mut store = RecordStore::load(vec![raw(Some("NULL"), Some(""))]);

        NullNormalizeStep::default().execute(&mut store).unwrap();
        let second = NullNormalizeStep::default().execute(&mut store).unwrap();
        assert_eq!(second.processed_count, 0);
    }
}
