use anyhow::Result;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::warn;

use crate::models::{ProgressReport, ProgressSummary, UserProfile, WeightObservation};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Append-only record store plus the aggregation pipeline that turns the raw
/// submission log into a cleaned weight series.
#[derive(Clone)]
pub struct ProgressService {
    db: SqlitePool,
}

impl ProgressService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Append one row for a profile submission. Rows are never updated or
    /// deleted; the date is stored as ISO-8601 text at day granularity.
    pub async fn record(&self, profile: &UserProfile, date: NaiveDate) -> Result<()> {
        sqlx::query(
            "INSERT INTO progress (age, gender, height, weight, goal, calories, date)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(i64::from(profile.age))
        .bind(profile.gender.as_str())
        .bind(profile.height_cm)
        .bind(profile.weight_kg)
        .bind(profile.goal.as_str())
        .bind(profile.daily_calories)
        .bind(date.to_string())
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// All (date, weight) rows in insertion order.
    pub async fn read_all(&self) -> Result<Vec<(String, f64)>> {
        let rows = sqlx::query_as::<_, (String, f64)>("SELECT date, weight FROM progress")
            .fetch_all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn report(&self) -> Result<ProgressReport> {
        Ok(aggregate(self.read_all().await?))
    }
}

/// Clean and summarize raw (date, weight) rows.
///
/// Malformed rows are dropped, the rest are sorted by date, and same-day
/// duplicates collapse to the last-submitted value. Zero valid rows yields
/// the explicit no-data report.
pub fn aggregate(rows: Vec<(String, f64)>) -> ProgressReport {
    let mut observations: Vec<WeightObservation> = Vec::with_capacity(rows.len());
    for (date, weight) in rows {
        match date.parse::<NaiveDate>() {
            Ok(date) if weight.is_finite() => observations.push(WeightObservation { date, weight }),
            _ => warn!(%date, weight, "discarding malformed progress row"),
        }
    }

    if observations.is_empty() {
        return ProgressReport::NoData;
    }

    // stable sort keeps same-day rows in submission order
    observations.sort_by_key(|o| o.date);

    let mut series: Vec<WeightObservation> = Vec::with_capacity(observations.len());
    for observation in observations {
        match series.last_mut() {
            // last submission wins, not the maximum
            Some(last) if last.date == observation.date => *last = observation,
            _ => series.push(observation),
        }
    }

    let start_weight = series[0].weight;
    let latest_weight = series[series.len() - 1].weight;
    let days_tracked = series.len();

    ProgressReport::Summary(ProgressSummary {
        series,
        latest_weight,
        start_weight,
        weight_change: round2(latest_weight - start_weight),
        days_tracked,
    })
}
