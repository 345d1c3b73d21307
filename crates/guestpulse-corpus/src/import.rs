use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    review::Review,
    store::{CorpusError, ReviewStore},
};

/// Author used when the export has no username for a row.
const UNKNOWN_USER: &str = "Unknown";
/// Product used when the export has no hotel name for a row.
const UNKNOWN_PRODUCT: &str = "Unknown Hotel";

/// Outcome of a CSV import.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ImportReport {
    /// Rows appended to the store.
    pub imported: usize,
    /// Rows stored without a usable timestamp.
    pub rows_without_date: usize,
}

/// One row of the hotel-review CSV export.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "reviews.username")]
    username: Option<String>,
    #[serde(default, rename = "reviews.rating")]
    rating: Option<String>,
    #[serde(default, rename = "reviews.title")]
    title: Option<String>,
    #[serde(default, rename = "reviews.text")]
    text: Option<String>,
    #[serde(default, rename = "reviews.date")]
    date: Option<String>,
}

/// Parses a review date in the export's mixed formats.
///
/// Accepts RFC 3339 (with `Z` or an offset), a bare ISO datetime with
/// optional fractional seconds, and a bare `YYYY-MM-DD` which maps to
/// midnight UTC. Anything else is treated as no date.
#[must_use]
pub fn parse_review_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    None
}

fn parse_rating(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if let Ok(rating) = trimmed.parse::<i32>() {
        return Some(rating);
    }
    trimmed.parse::<f64>().ok().map(|value| value.trunc() as i32)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn review_from_row(row: CsvRow, report: &mut ImportReport) -> Review {
    let product = non_blank(row.name)
        .map_or_else(|| UNKNOWN_PRODUCT.to_string(), |name| name.trim().to_string());
    let user = non_blank(row.username).unwrap_or_else(|| UNKNOWN_USER.to_string());

    let mut review = Review::new(product, user);
    if let Some(rating) = row.rating.as_deref().and_then(parse_rating) {
        review = review.with_rating(rating);
    }
    if let Some(title) = row.title {
        review = review.with_title(title);
    }
    if let Some(text) = row.text {
        review = review.with_text(text);
    }
    match row.date.as_deref().and_then(parse_review_date) {
        Some(timestamp) => review = review.with_timestamp(timestamp),
        None => report.rows_without_date += 1,
    }
    review
}

/// Imports every row of a CSV export into the store.
pub fn import_csv(store: &ReviewStore, csv_path: &Path) -> Result<ImportReport, CorpusError> {
    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut report = ImportReport::default();
    let mut reviews = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        let row = row?;
        reviews.push(review_from_row(row, &mut report));
    }
    store.append_all(&reviews)?;
    report.imported = reviews.len();
    Ok(report)
}
