use std::collections::HashMap;

use anyhow::Result;
use tracing::info;

use crate::domain::StagedRecord;
use crate::pipeline::convert;
use crate::store::RecordStore;

use super::{PipelineStep, StepResult};

/// Pipeline step that recovers missing `industry` values from sibling rows.
///
/// Rows sharing the identifying key describe the same company, so a row with
/// an absent industry borrows the value from any sibling that has one. The
/// self-join is implemented as an index from key to the first non-missing
/// industry seen, then a single fill pass. Donors that are themselves missing
/// industry never contribute.
pub struct BackfillStep {
    require_location: bool,
}

impl BackfillStep {
    pub fn new(require_location: bool) -> Self {
        Self { require_location }
    }

    fn key(&self, record: &StagedRecord) -> (String, String) {
        if self.require_location {
            (record.company.clone(), record.location.clone())
        } else {
            (record.company.clone(), String::new())
        }
    }

    fn industry_missing(record: &StagedRecord) -> bool {
        match record.industry.as_deref() {
            None => true,
            Some(value) => convert::is_missing_token(value),
        }
    }
}

impl Default for BackfillStep {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PipelineStep for BackfillStep {
    fn execute(&self, store: &mut RecordStore) -> Result<StepResult> {
        // Index pass: first eligible donor per key wins, in table order.
        let mut donors: HashMap<(String, String), String> = HashMap::new();
        for record in store.select_where(|record| !Self::industry_missing(record)) {
            if let Some(industry) = record.industry.clone() {
                donors.entry(self.key(record)).or_insert(industry);
            }
        }

        let filled = store.update_where(
            |record| Self::industry_missing(record) && donors.contains_key(&self.key(record)),
            |record| {
                if let Some(industry) = donors.get(&self.key(record)) {
                    record.industry = Some(industry.clone());
                }
            },
        );

        crate::observability::metrics::backfill::donors_indexed(donors.len() as u64);
        crate::observability::metrics::backfill::industries_filled(filled as u64);

        let message = format!(
            "Backfill filled {} missing industries from {} donor keys",
            filled,
            donors.len()
        );
        info!("🔗 {}", message);

        Ok(StepResult::success(filled, message))
    }

    fn step_name(&self) -> &'static str {
        "backfill"
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["null_normalize"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawLayoffRow;

    fn raw(company: &str, location: &str, industry: Option<&str>) -> RawLayoffRow {
        RawLayoffRow {
            company: Some(company.to_string()),
            location: Some(location.to_string()),
            industry: industry.map(|s| s.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn missing_industry_borrows_from_sibling_with_same_key() {
        let mut store = RecordStore::load(vec![
            raw("Acme", "Seattle", Some("Retail")),
            raw("Acme", "Seattle", None),
        ]);

        let result = BackfillStep::default().execute(&mut store).unwrap();
        assert_eq!(result.processed_count, 1);

        let industries: Vec<Option<String>> =
            store.select_where(|_| true).map(|r| r.industry.clone()).collect();
        assert_eq!(
            industries,
            vec![Some("Retail".to_string()), Some("Retail".to_string())]
        );
    }

    #[test]
    fn donor_must_share_the_full_key() {
        let mut store = RecordStore::load(vec![
            raw("Acme", "Seattle", Some("Retail")),
            raw("Acme", "Austin", None),
        ]);

        let result = BackfillStep::default().execute(&mut store).unwrap();
        assert_eq!(result.processed_count, 0);
        assert!(store
            .select_where(|r| r.location == "Austin")
            .next()
            .unwrap()
            .industry
            .is_none());
    }

    #[test]
    fn company_only_key_ignores_location() {
        let mut store = RecordStore::load(vec![
            raw("Acme", "Seattle", Some("Retail")),
            raw("Acme", "Austin", None),
        ]);

        let result = BackfillStep::new(false).execute(&mut store).unwrap();
        assert_eq!(result.processed_count, 1);
    }

    #[test]
    fn rows_missing_industry_never_donate() {
        let mut store = RecordStore::load(vec![
            raw("Acme", "Seattle", None),
            raw("Acme", "Seattle", Some("NULL")),
        ]);

        let result = BackfillStep::default().execute(&mut store).unwrap();
        assert_eq!(result.processed_count, 0);
    }

    #[test]
    fn no_eligible_donor_leaves_industry_absent() {
        let mut store = RecordStore::load(vec![raw("Solo", "Remote", None)]);

        let result = BackfillStep::default().execute(&mut store).unwrap();
        assert_eq!(result.processed_count, 0);
        assert!(store.select_where(|_| true).next().unwrap().industry.is_none());
    }
}
