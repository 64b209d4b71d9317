use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One layoff event exactly as it arrives from the upstream loader: every
/// field is loosely typed text, and missing values show up interchangeably as
/// absent fields, empty strings, or the literal token "NULL".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLayoffRow {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub total_laid_off: Option<String>,
    #[serde(default)]
    pub percentage_laid_off: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub funds_raised_millions: Option<String>,
}

/// The working shape held by the record store while the pipeline runs.
///
/// Numeric columns are typed at load time; `date_text` is an internal staging
/// column that carries the raw date text until the standardizer parses it,
/// after which the column is dropped from the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedRecord {
    pub company: String,
    pub location: String,
    pub industry: Option<String>,
    pub total_laid_off: Option<i64>,
    pub percentage_laid_off: Option<String>,
    pub date: Option<NaiveDate>,
    pub date_text: Option<String>,
    pub stage: String,
    pub country: String,
    pub funds_raised_millions: Option<i64>,
}

/// A cleaned, strictly typed layoff record as exported to the reporting layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoffRecord {
    pub company: String,
    pub location: String,
    pub industry: Option<String>,
    pub total_laid_off: Option<i64>,
    pub percentage_laid_off: Option<String>,
    pub date: Option<NaiveDate>,
    pub stage: String,
    pub country: String,
    pub funds_raised_millions: Option<i64>,
}

impl From<LayoffRecord> for RawLayoffRow {
    /// Renders a cleaned record back into the loose input shape, so cleaned
    /// output can be fed through the pipeline again (re-runs must be no-ops).
    fn from(record: LayoffRecord) -> Self {
        Self {
            company: Some(record.company),
            location: Some(record.location),
            industry: record.industry,
            total_laid_off: record.total_laid_off.map(|n| n.to_string()),
            percentage_laid_off: record.percentage_laid_off,
            date: record.date.map(|d| d.to_string()),
            stage: Some(record.stage),
            country: Some(record.country),
            funds_raised_millions: record.funds_raised_millions.map(|n| n.to_string()),
        }
    }
}

/// Columns of the layoffs table. `DateText` is internal staging state and is
/// the only column the store will drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Company,
    Location,
    Industry,
    TotalLaidOff,
    PercentageLaidOff,
    Date,
    DateText,
    Stage,
    Country,
    FundsRaisedMillions,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::Company,
        Column::Location,
        Column::Industry,
        Column::TotalLaidOff,
        Column::PercentageLaidOff,
        Column::Date,
        Column::DateText,
        Column::Stage,
        Column::Country,
        Column::FundsRaisedMillions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Company => "company",
            Column::Location => "location",
            Column::Industry => "industry",
            Column::TotalLaidOff => "total_laid_off",
            Column::PercentageLaidOff => "percentage_laid_off",
            Column::Date => "date",
            Column::DateText => "date_text",
            Column::Stage => "stage",
            Column::Country => "country",
            Column::FundsRaisedMillions => "funds_raised_millions",
        }
    }

    /// Whether the store may remove this column. Business columns are part of
    /// the fixed schema; only internal staging columns are droppable.
    pub fn is_droppable(&self) -> bool {
        matches!(self, Column::DateText)
    }
}
