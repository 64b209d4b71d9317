use chrono::NaiveDate;

/// Source date format: month/day/year, the convention the upstream exporter
/// writes. ISO dates are also accepted so re-cleaning exported data parses
/// back to the same value.
const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

/// Parse-or-absent integer conversion. Never errors: any text that is not a
/// whole number (including the literal "NULL" token) becomes an absent value.
pub fn try_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Parse-or-absent date conversion. Malformed text yields an absent date;
/// the row is never dropped for it.
pub fn try_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// True for values that encode "no value" as text: empty or whitespace-only
/// strings and the case-insensitive literal "NULL".
pub fn is_missing_token(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("NULL")
}
