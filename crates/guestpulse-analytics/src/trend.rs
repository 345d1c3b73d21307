use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{Datelike, NaiveDate, Weekday};
use guestpulse_corpus::Review;
use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

/// Time coarsening used to bucket reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per calendar date.
    Daily,
    /// One bucket per ISO-8601 week.
    Weekly,
    /// One bucket per calendar month.
    #[default]
    Monthly,
}

impl Granularity {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(AnalyticsError::UnknownGranularity(other.to_string())),
        }
    }
}

/// Average polarity within one time bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Bucket label, e.g. `2015-07-14`, `2015-W29` or `2015-07`.
    pub bucket: String,
    /// Arithmetic mean of review polarity in the bucket.
    pub average_polarity: f64,
    /// Number of reviews averaged.
    pub review_count: usize,
}

/// Outcome of a trend aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrendReport {
    /// The filtered snapshot held no usable review.
    NoData,
    /// Chronologically ordered bucket series.
    Series {
        /// Coarsening the series was computed at.
        granularity: Granularity,
        /// Buckets ordered by bucket start date.
        points: Vec<TrendPoint>,
    },
}

/// Averages review polarity per time bucket.
///
/// Reviews without a polarity or timestamp are skipped. An empty result is
/// reported as [`TrendReport::NoData`], never as an empty series.
#[must_use]
pub fn sentiment_trend(reviews: &[Review], granularity: Granularity) -> TrendReport {
    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for review in reviews {
        let (Some(polarity), Some(timestamp)) = (review.polarity, review.timestamp) else {
            continue;
        };
        let Some(start) = bucket_start(timestamp.date_naive(), granularity) else {
            continue;
        };
        let slot = buckets.entry(start).or_insert((0.0, 0));
        slot.0 += polarity;
        slot.1 += 1;
    }

    if buckets.is_empty() {
        return TrendReport::NoData;
    }

    let points = buckets
        .into_iter()
        .map(|(start, (sum, count))| TrendPoint {
            bucket: bucket_label(start, granularity),
            average_polarity: sum / count as f64,
            review_count: count,
        })
        .collect();
    TrendReport::Series {
        granularity,
        points,
    }
}

/// First calendar date of the bucket containing `date`.
fn bucket_start(date: NaiveDate, granularity: Granularity) -> Option<NaiveDate> {
    match granularity {
        Granularity::Daily => Some(date),
        Granularity::Weekly => {
            let iso = date.iso_week();
            NaiveDate::from_isoywd_opt(iso.year(), iso.week(), Weekday::Mon)
        }
        Granularity::Monthly => NaiveDate::from_ymd_opt(date.year(), date.month(), 1),
    }
}

fn bucket_label(start: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Daily => start.format("%Y-%m-%d").to_string(),
        Granularity::Weekly => {
            let iso = start.iso_week();
            format!("{:04}-W{:02}", iso.year(), iso.week())
        }
        Granularity::Monthly => start.format("%Y-%m").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn scored(polarity: f64, year: i32, month: u32, day: u32) -> Review {
        let mut review = Review::new("hotel-aurora", "guest-1")
            .with_text("x")
            .with_timestamp(Utc.with_ymd_and_hms(year, month, day, 9, 30, 0).unwrap());
        review.set_sentiment("positive", polarity, false);
        review
    }

    fn series(report: TrendReport) -> Vec<TrendPoint> {
        match report {
            TrendReport::Series { points, .. } => points,
            TrendReport::NoData => panic!("expected a series"),
        }
    }

    #[test]
    fn granularity_parses_known_names_only() {
        assert_eq!("daily".parse::<Granularity>().unwrap(), Granularity::Daily);
        assert_eq!(
            "monthly".parse::<Granularity>().unwrap(),
            Granularity::Monthly
        );
        assert_eq!(Granularity::default(), Granularity::Monthly);
        assert!(matches!(
            "hourly".parse::<Granularity>(),
            Err(AnalyticsError::UnknownGranularity(name)) if name == "hourly"
        ));
    }

    #[test]
    fn same_day_reviews_average_into_one_bucket() {
        let reviews = vec![scored(0.2, 2015, 7, 14), scored(0.8, 2015, 7, 14)];
        let points = series(sentiment_trend(&reviews, Granularity::Daily));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].bucket, "2015-07-14");
        assert!((points[0].average_polarity - 0.5).abs() < 1e-12);
        assert_eq!(points[0].review_count, 2);
    }

    #[test]
    fn empty_input_reports_no_data() {
        assert_eq!(
            sentiment_trend(&[], Granularity::Monthly),
            TrendReport::NoData
        );
        let unusable = vec![Review::new("h", "u").with_text("no polarity, no date")];
        assert_eq!(
            sentiment_trend(&unusable, Granularity::Monthly),
            TrendReport::NoData
        );
    }

    #[test]
    fn monthly_buckets_order_chronologically() {
        let reviews = vec![
            scored(0.9, 2016, 2, 1),
            scored(0.1, 2015, 11, 20),
            scored(0.5, 2015, 11, 3),
        ];
        let points = series(sentiment_trend(&reviews, Granularity::Monthly));
        let buckets: Vec<&str> = points.iter().map(|p| p.bucket.as_str()).collect();
        assert_eq!(buckets, vec!["2015-11", "2016-02"]);
        assert!((points[0].average_polarity - 0.3).abs() < 1e-12);
        assert_eq!(points[0].review_count, 2);
    }

    #[test]
    fn weekly_buckets_follow_iso_weeks() {
        // 2015-07-13 is a Monday; the 19th closes that week, the 20th opens the next.
        let reviews = vec![
            scored(0.4, 2015, 7, 13),
            scored(0.6, 2015, 7, 19),
            scored(1.0, 2015, 7, 20),
        ];
        let points = series(sentiment_trend(&reviews, Granularity::Weekly));
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].bucket, "2015-W29");
        assert!((points[0].average_polarity - 0.5).abs() < 1e-12);
        assert_eq!(points[1].bucket, "2015-W30");
    }

    #[test]
    fn iso_week_years_cross_january_first() {
        // 2016-01-01 falls in ISO week 53 of 2015.
        let reviews = vec![scored(0.7, 2016, 1, 1), scored(0.3, 2016, 1, 4)];
        let points = series(sentiment_trend(&reviews, Granularity::Weekly));
        let buckets: Vec<&str> = points.iter().map(|p| p.bucket.as_str()).collect();
        assert_eq!(buckets, vec!["2015-W53", "2016-W01"]);
    }

    #[test]
    fn single_review_bucket_is_its_own_mean() {
        let reviews = vec![scored(0.42, 2015, 3, 5)];
        let points = series(sentiment_trend(&reviews, Granularity::Monthly));
        assert_eq!(points.len(), 1);
        assert!((points[0].average_polarity - 0.42).abs() < 1e-12);
        assert_eq!(points[0].review_count, 1);
    }

    #[test]
    fn report_json_is_status_tagged() {
        let no_data = serde_json::to_value(TrendReport::NoData).unwrap();
        assert_eq!(no_data, serde_json::json!({ "status": "no_data" }));

        let reviews = vec![scored(0.5, 2015, 7, 14)];
        let value = serde_json::to_value(sentiment_trend(&reviews, Granularity::Daily)).unwrap();
        assert_eq!(value["status"], "series");
        assert_eq!(value["granularity"], "daily");
        assert_eq!(value["points"][0]["bucket"], "2015-07-14");
        assert_eq!(value["points"][0]["review_count"], 1);
    }
}
