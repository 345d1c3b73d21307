use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use guestpulse_analytics::{
    rating_length_correlation, rating_length_sample, sentiment_trend, word_frequency,
    CorrelationReport, Granularity, TopK,
};
use guestpulse_corpus::{
    import_csv, CorpusSummary, Review, ReviewFilter, ReviewStore, TextRequirement,
};
use guestpulse_render::{render_scatter, render_trend};
use guestpulse_sentiment::{score, score_reviews};
use guestpulse_telemetry::{run_log_path, LogLevel, Telemetry};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "guestpulse", version, about = "Review corpus analytics toolkit")]
struct Cli {
    /// JSON config file; command-line flags win over its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Review store (JSONL file).
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    /// Directory run logs are written under.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Imports reviews from a CSV export.
    Import {
        /// CSV file to ingest.
        #[arg(long)]
        csv: PathBuf,
    },
    /// Adds one review, scoring its text inline.
    Add(AddArgs),
    /// Removes a review by id.
    Remove {
        /// Identifier of the review to delete.
        id: Uuid,
    },
    /// Lists stored reviews.
    List(ListArgs),
    /// Prints corpus summary statistics.
    Summary,
    /// Scores a piece of text without touching the store.
    Analyze {
        /// Text to score.
        #[arg(long)]
        text: String,
    },
    /// Scores every stored review that lacks a sentiment label.
    ScoreBatch,
    /// Counts lexicon words over the stored reviews.
    WordFrequency {
        /// How many words per lexicon to report (1-100).
        #[arg(long)]
        top_k: Option<usize>,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Averages sentiment polarity per time bucket.
    Trend {
        /// Bucket granularity: daily, weekly or monthly.
        #[arg(long, default_value_t = Granularity::Monthly)]
        granularity: Granularity,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Relates star rating to review length.
    Correlation {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Renders the trend series as an SVG line chart.
    RenderTrend {
        /// Bucket granularity: daily, weekly or monthly.
        #[arg(long, default_value_t = Granularity::Monthly)]
        granularity: Granularity,
        #[command(flatten)]
        range: RangeArgs,
        /// Output SVG path.
        #[arg(long, default_value = "trend.svg")]
        out: PathBuf,
    },
    /// Renders the correlation sample as an SVG scatter chart.
    RenderScatter {
        #[command(flatten)]
        range: RangeArgs,
        /// Output SVG path.
        #[arg(long, default_value = "scatter.svg")]
        out: PathBuf,
    },
}

#[derive(Args, Debug)]
struct AddArgs {
    /// Product (hotel) identifier.
    #[arg(long)]
    product: String,
    /// Review author.
    #[arg(long)]
    user: String,
    /// Star rating (1-5).
    #[arg(long)]
    rating: Option<i32>,
    /// Headline.
    #[arg(long)]
    title: Option<String>,
    /// Review body.
    #[arg(long)]
    text: Option<String>,
    /// Review date (YYYY-MM-DD), stored at midnight UTC.
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Only reviews for this product.
    #[arg(long)]
    product: Option<String>,
    /// Only reviews by this author.
    #[arg(long)]
    user: Option<String>,
    /// Lowest rating kept.
    #[arg(long)]
    min_rating: Option<i32>,
    /// Highest rating kept.
    #[arg(long)]
    max_rating: Option<i32>,
    /// Maximum number of rows printed.
    #[arg(long, default_value_t = 100)]
    limit: usize,
    /// Matching rows skipped first.
    #[arg(long, default_value_t = 0)]
    offset: usize,
}

#[derive(Args, Debug, Clone, Copy)]
struct RangeArgs {
    /// Inclusive start date (YYYY-MM-DD).
    #[arg(long)]
    start_date: Option<NaiveDate>,
    /// Inclusive end date (YYYY-MM-DD).
    #[arg(long)]
    end_date: Option<NaiveDate>,
}

impl RangeArgs {
    /// Expands the dates to inclusive whole-day bounds on the filter.
    fn bound(self, mut filter: ReviewFilter) -> ReviewFilter {
        if let Some(date) = self.start_date {
            filter = filter.since(day_start(date));
        }
        if let Some(date) = self.end_date {
            filter = filter.until(day_end(date));
        }
        filter
    }
}

/// Optional JSON config; any missing key falls back to the default.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct CliConfig {
    store: PathBuf,
    log_dir: PathBuf,
    top_k: Option<usize>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            store: PathBuf::from("data/reviews.jsonl"),
            log_dir: PathBuf::from("logs"),
            top_k: None,
        }
    }
}

fn main() -> Result<()> {
    let Cli {
        config: config_path,
        store,
        log_dir,
        command,
    } = Cli::parse();

    let config = load_config(config_path.as_deref())?;
    let store = ReviewStore::new(store.unwrap_or_else(|| config.store.clone()));
    let log_dir = log_dir.unwrap_or_else(|| config.log_dir.clone());

    let run_id = format!("run-{}", Uuid::new_v4());
    let telemetry = Telemetry::builder("cli")
        .log_path(run_log_path(&log_dir)?)
        .run_id(run_id)
        .build()?;

    let command_name = command.name();
    telemetry.log(
        LogLevel::Info,
        "run started",
        json!({ "command": command_name, "store": store.path() }),
    )?;

    match run_command(command, &store, &config, &telemetry) {
        Ok(()) => {
            telemetry.log(
                LogLevel::Info,
                "run completed",
                json!({ "command": command_name }),
            )?;
            Ok(())
        }
        Err(err) => {
            telemetry.log(
                LogLevel::Error,
                "run failed",
                json!({ "command": command_name, "error": err.to_string() }),
            )?;
            Err(err)
        }
    }
}

fn run_command(
    command: Commands,
    store: &ReviewStore,
    config: &CliConfig,
    telemetry: &Telemetry,
) -> Result<()> {
    match command {
        Commands::Import { csv } => {
            let report =
                import_csv(store, &csv).with_context(|| format!("importing {}", csv.display()))?;
            telemetry.log(
                LogLevel::Info,
                "csv imported",
                json!({
                    "imported": report.imported,
                    "rows_without_date": report.rows_without_date,
                }),
            )?;
            print_json(&report)
        }
        Commands::Add(args) => {
            let review = build_review(args);
            store.append(&review)?;
            telemetry.log(LogLevel::Info, "review added", json!({ "id": review.id }))?;
            print_json(&review)
        }
        Commands::Remove { id } => {
            let removed = store.remove(id)?;
            telemetry.log(LogLevel::Info, "review removed", json!({ "id": id }))?;
            print_json(&removed)
        }
        Commands::List(args) => {
            let reviews = store.load()?;
            let page = args.into_filter().apply(&reviews);
            telemetry.log(
                LogLevel::Info,
                "reviews listed",
                json!({ "matched": page.len(), "stored": reviews.len() }),
            )?;
            print_json(&page)
        }
        Commands::Summary => {
            let reviews = store.load()?;
            let summary = CorpusSummary::compute(&reviews);
            telemetry.log(
                LogLevel::Info,
                "summary computed",
                json!({ "total_reviews": summary.total_reviews }),
            )?;
            print_json(&summary)
        }
        Commands::Analyze { text } => {
            let verdict = score(&text);
            telemetry.log(
                LogLevel::Info,
                "text analyzed",
                json!({ "label": verdict.label.as_str(), "stars": verdict.stars }),
            )?;
            print_json(&verdict)
        }
        Commands::ScoreBatch => {
            let mut reviews = store.load()?;
            let report = score_reviews(&mut reviews);
            store.rewrite(&reviews)?;
            telemetry.log(
                LogLevel::Info,
                "batch scored",
                json!({ "scored": report.scored, "skipped": report.skipped }),
            )?;
            print_json(&report)
        }
        Commands::WordFrequency { top_k, range } => {
            let top_k = TopK::new(top_k.or(config.top_k).unwrap_or(TopK::DEFAULT))?;
            let reviews = store.load()?;
            let snapshot = range
                .bound(ReviewFilter::new().text(TextRequirement::Present))
                .apply(&reviews);
            let report = word_frequency(&snapshot, top_k);
            telemetry.log(
                LogLevel::Info,
                "word frequency computed",
                json!({ "scanned": report.total_reviews_scanned, "top_k": top_k.get() }),
            )?;
            print_json(&report)
        }
        Commands::Trend { granularity, range } => {
            let reviews = store.load()?;
            let snapshot = range
                .bound(ReviewFilter::new().require_polarity().require_timestamp())
                .apply(&reviews);
            let report = sentiment_trend(&snapshot, granularity);
            telemetry.log(
                LogLevel::Info,
                "trend computed",
                json!({ "granularity": granularity.as_str(), "reviews": snapshot.len() }),
            )?;
            print_json(&report)
        }
        Commands::Correlation { range } => {
            let reviews = store.load()?;
            let snapshot = range
                .bound(
                    ReviewFilter::new()
                        .require_rating()
                        .text(TextRequirement::NonEmpty),
                )
                .apply(&reviews);
            let report = rating_length_correlation(&snapshot);
            telemetry.log(
                LogLevel::Info,
                "correlation computed",
                json!({ "sample": snapshot.len() }),
            )?;
            print_json(&report)
        }
        Commands::RenderTrend {
            granularity,
            range,
            out,
        } => {
            let reviews = store.load()?;
            let snapshot = range
                .bound(ReviewFilter::new().require_polarity().require_timestamp())
                .apply(&reviews);
            let report = sentiment_trend(&snapshot, granularity);
            render_trend(&report, &out).with_context(|| format!("rendering {}", out.display()))?;
            telemetry.log(
                LogLevel::Info,
                "trend chart rendered",
                json!({ "chart": out, "granularity": granularity.as_str() }),
            )?;
            print_json(&json!({ "chart": out, "granularity": granularity.as_str() }))
        }
        Commands::RenderScatter { range, out } => {
            let reviews = store.load()?;
            let snapshot = range
                .bound(
                    ReviewFilter::new()
                        .require_rating()
                        .text(TextRequirement::NonEmpty),
                )
                .apply(&reviews);
            let sample = rating_length_sample(&snapshot);
            let pearson_r = match rating_length_correlation(&snapshot) {
                CorrelationReport::Computed { pearson_r, .. } => Some(pearson_r),
                _ => None,
            };
            render_scatter(&sample, pearson_r, &out)
                .with_context(|| format!("rendering {}", out.display()))?;
            telemetry.log(
                LogLevel::Info,
                "scatter chart rendered",
                json!({ "chart": out, "points": sample.len() }),
            )?;
            print_json(&json!({ "chart": out, "points": sample.len(), "pearson_r": pearson_r }))
        }
    }
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Import { .. } => "import",
            Self::Add(_) => "add",
            Self::Remove { .. } => "remove",
            Self::List(_) => "list",
            Self::Summary => "summary",
            Self::Analyze { .. } => "analyze",
            Self::ScoreBatch => "score-batch",
            Self::WordFrequency { .. } => "word-frequency",
            Self::Trend { .. } => "trend",
            Self::Correlation { .. } => "correlation",
            Self::RenderTrend { .. } => "render-trend",
            Self::RenderScatter { .. } => "render-scatter",
        }
    }
}

impl ListArgs {
    fn into_filter(self) -> ReviewFilter {
        let mut filter = ReviewFilter::new().offset(self.offset).limit(self.limit);
        if let Some(product) = self.product {
            filter = filter.product(product);
        }
        if let Some(user) = self.user {
            filter = filter.user(user);
        }
        if let Some(min) = self.min_rating {
            filter = filter.min_rating(min);
        }
        if let Some(max) = self.max_rating {
            filter = filter.max_rating(max);
        }
        filter
    }
}

fn build_review(args: AddArgs) -> Review {
    let mut review = Review::new(args.product, args.user);
    if let Some(rating) = args.rating {
        review = review.with_rating(rating);
    }
    if let Some(title) = args.title {
        review = review.with_title(title);
    }
    if let Some(date) = args.date {
        review = review.with_timestamp(day_start(date));
    }
    if let Some(text) = args.text {
        let verdict = score(&text);
        review = review.with_text(text);
        if verdict.stars.is_some() {
            review.set_sentiment(verdict.label.as_str(), verdict.score, verdict.is_sarcastic);
        }
    }
    review
}

fn load_config(path: Option<&Path>) -> Result<CliConfig> {
    let Some(path) = path else {
        return Ok(CliConfig::default());
    };
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn day_end(date: NaiveDate) -> DateTime<Utc> {
    day_start(date) + Duration::days(1) - Duration::nanoseconds(1)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
