use tracing::debug;

use crate::common::error::{CleanerError, Result};
use crate::domain::{Column, LayoffRecord, RawLayoffRow, StagedRecord};
use crate::pipeline::convert;

/// In-memory table of staged layoff records.
///
/// Every cleaning stage reads and mutates this store through whole-table
/// scans. Mutating operations treat zero matches as a normal outcome, so
/// re-applying any of them to already-clean data is a no-op.
pub struct RecordStore {
    records: Vec<StagedRecord>,
    columns: Vec<Column>,
}

impl RecordStore {
    /// Builds the store from raw rows, preserving original order.
    ///
    /// The only transformation applied here is schema typing: numeric columns
    /// arrive as text and are coerced with try-conversions (parse-or-absent).
    /// Date text is staged untouched in the internal `date_text` column for
    /// the standardizer to consume.
    pub fn load(rows: Vec<RawLayoffRow>) -> Self {
        let records = rows
            .into_iter()
            .map(|row| StagedRecord {
                company: row.company.unwrap_or_default(),
                location: row.location.unwrap_or_default(),
                industry: row.industry,
                total_laid_off: row.total_laid_off.as_deref().and_then(convert::try_int),
                percentage_laid_off: row.percentage_laid_off,
                date: None,
                date_text: row.date,
                stage: row.stage.unwrap_or_default(),
                country: row.country.unwrap_or_default(),
                funds_raised_millions: row
                    .funds_raised_millions
                    .as_deref()
                    .and_then(convert::try_int),
            })
            .collect::<Vec<_>>();

        debug!("Loaded {} raw rows into the record store", records.len());

        Self {
            records,
            columns: Column::ALL.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Columns currently part of the schema.
    pub fn schema(&self) -> &[Column] {
        &self.columns
    }

    /// Lazy, non-mutating scan over records matching `predicate`. Each call
    /// yields a fresh iterator, so the sequence is restartable.
    pub fn select_where<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a StagedRecord>
    where
        P: Fn(&StagedRecord) -> bool + 'a,
    {
        self.records.iter().filter(move |record| predicate(record))
    }

    /// Applies `mutator` to every record satisfying `predicate`; returns the
    /// number of records mutated.
    pub fn update_where<P, M>(&mut self, predicate: P, mut mutator: M) -> usize
    where
        P: Fn(&StagedRecord) -> bool,
        M: FnMut(&mut StagedRecord),
    {
        let mut updated = 0;
        for record in self.records.iter_mut() {
            if predicate(record) {
                mutator(record);
                updated += 1;
            }
        }
        updated
    }

    /// Removes every record satisfying `predicate`; returns the number
    /// removed. The predicate may carry state (e.g. a seen-set), so it is
    /// `FnMut` and observes records in table order.
    pub fn delete_where<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&StagedRecord) -> bool,
    {
        let before = self.records.len();
        self.records.retain(|record| !predicate(record));
        before - self.records.len()
    }

    /// Removes a column from the schema and clears it in all records.
    ///
    /// Only internal staging columns may be dropped; the nine business
    /// columns are a fixed schema. Dropping a column that is already gone is
    /// a no-op.
    pub fn drop_field(&mut self, column: Column) -> Result<()> {
        if !column.is_droppable() {
            return Err(CleanerError::Schema(format!(
                "column '{}' is part of the fixed schema and cannot be dropped",
                column.as_str()
            )));
        }
        if !self.columns.contains(&column) {
            return Ok(());
        }
        self.columns.retain(|c| *c != column);
        for record in self.records.iter_mut() {
            if column == Column::DateText {
                record.date_text = None;
            }
        }
        debug!("Dropped column '{}' from the schema", column.as_str());
        Ok(())
    }

    /// Exports the final typed table. Internal staging columns are never part
    /// of the snapshot.
    pub fn snapshot(&self) -> Vec<LayoffRecord> {
        self.records
            .iter()
            .map(|record| LayoffRecord {
                company: record.company.clone(),
                location: record.location.clone(),
                industry: record.industry.clone(),
                total_laid_off: record.total_laid_off,
                percentage_laid_off: record.percentage_laid_off.clone(),
                date: record.date,
                stage: record.stage.clone(),
                country: record.country.clone(),
                funds_raised_millions: record.funds_raised_millions,
            })
            .collect()
    }
}
