use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One cleaned (date, weight) point of the progress series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightObservation {
    pub date: NaiveDate,
    pub weight: f64,
}

/// Summary derived from the cleaned series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub series: Vec<WeightObservation>,
    pub latest_weight: f64,
    pub start_weight: f64,
    pub weight_change: f64,
    pub days_tracked: usize,
}

/// Aggregation outcome. An empty history is a reportable state of its own,
/// not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProgressReport {
    NoData,
    Summary(ProgressSummary),
}

/// Direction of the weight change between the first and latest observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightTrend {
    Lost,
    Gained,
    Stable,
}

impl WeightTrend {
    pub fn from_change(weight_change: f64) -> Self {
        if weight_change < 0.0 {
            WeightTrend::Lost
        } else if weight_change > 0.0 {
            WeightTrend::Gained
        } else {
            WeightTrend::Stable
        }
    }
}
